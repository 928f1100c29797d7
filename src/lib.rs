//! Globe Plot Library.
//! Scope-gebundene Render-Collections und interaktives Plotten auf einem 3D-Globus.

pub mod app;
pub mod core;
pub mod json;
pub mod shared;

pub use app::{
    InputFeedback, Key, OperateTarget, PlotCommand, PlotCompletion, PlotController, PlotError,
    PlotFeature, PlotFeatureOptions, PlotIntent, PlotLifecycle, PlotOutcome, PlotSession,
    PointerButton,
};
pub use crate::core::{
    Cartographic, CollectionKind, MemoryViewer, Packable, PlotId, SampleInterpolation,
    SampledProperty, ScopeError, ScopedCollection, Viewer,
};
pub use json::{parse_plot_json, write_plot_json};
pub use shared::PlotOptions;
