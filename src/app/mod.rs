//! Application-Layer: Controller, State, Events, Skeletons und Schemata.

pub mod command_log;
pub mod completion;
pub mod controller;
mod error;
pub mod events;
pub mod feature;
pub mod handlers;
mod intent_mapping;
pub mod render;
pub mod scheme;
/// Interaktive Kontrollpunkte
///
/// Skeletons beschreiben Darstellung und Drag-/Tasten-Verhalten der
/// Punkte, über die ein Plot bearbeitet wird.
pub mod skeleton;
pub mod state;

pub use command_log::CommandLog;
pub use completion::{PlotCompletion, PlotOutcome, PlotSession};
pub use controller::{InputFeedback, PlotController};
pub use error::PlotError;
pub use events::{Key, PlotCommand, PlotIntent, PointerButton};
pub use feature::{PlotFeature, PlotFeatureOptions, PlotLifecycle};
pub use handlers::lifecycle::OperateTarget;
pub use scheme::{
    PlotRender, PlotScheme, PolygonScheme, PolylineScheme, RenderContext, SchemeRegistry,
};
pub use skeleton::{PlotAction, Skeleton, SkeletonState};
pub use state::{CurrentChange, PlotState, PointerState};
