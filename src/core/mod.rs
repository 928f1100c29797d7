//! Core-Domänentypen: Render-Objekte, Scopes, Sample-Properties, Viewer-Vertrag.

pub mod event;
pub mod geo;
pub mod graphic;
pub mod memory_viewer;
pub mod packable;
pub mod sampled;
/// Scope-gebundene Render-Collections
///
/// Garantiert idempotentes Einfügen und vollständiges Austragen beim
/// Schließen eines Scopes.
pub mod scope;
pub mod viewer;

pub use event::{ChangeEvent, ListenerId};
pub use geo::{centroid, midpoint, Cartographic, EARTH_RADIUS};
pub use graphic::{
    CallbackPositions, CollectionKind, Graphic, GraphicCollection, GraphicHandle, GraphicId,
    GraphicTag, PlotId, PointGraphic, PolygonGraphic, PolylineGraphic, Rgba, SkeletonMarker,
};
pub use memory_viewer::MemoryViewer;
pub use packable::Packable;
pub use sampled::{SampleInterpolation, SampledProperty};
pub use scope::{RenderCollection, ScopeError, ScopedCollection};
pub use viewer::{CameraPose, PickedGraphic, Viewer};
