//! Plot-Schemata: Formtyp-Policies (Skeletons, Abschluss-Regel, Rendering).
//!
//! Ein Schema wird einmal in der `SchemeRegistry` registriert und von
//! beliebig vielen `PlotFeature`s geteilt.

/// Polygon-Schema (≥ 3 Vertices).
pub mod polygon;
/// Polyline-Schema (≥ 2 Vertices).
pub mod polyline;

pub use polygon::PolygonScheme;
pub use polyline::PolylineScheme;

use std::fmt;
use std::rc::Rc;

use glam::DVec3;
use indexmap::IndexMap;

use super::skeleton::Skeleton;
use crate::core::{CollectionKind, GraphicHandle, Packable};
use crate::shared::PlotOptions;

/// Gerenderte Objekte eines Plots, je Scene-Collection.
#[derive(Debug, Clone, Default)]
pub struct PlotRender {
    /// Objekte in `entities`
    pub entities: Vec<GraphicHandle>,
    /// Objekte in `primitives`
    pub primitives: Vec<GraphicHandle>,
    /// Objekte in `groundPrimitives`
    pub ground_primitives: Vec<GraphicHandle>,
}

impl PlotRender {
    /// Objekte einer Collection.
    pub fn get(&self, kind: CollectionKind) -> &[GraphicHandle] {
        match kind {
            CollectionKind::Entities => &self.entities,
            CollectionKind::Primitives => &self.primitives,
            CollectionKind::GroundPrimitives => &self.ground_primitives,
        }
    }

    /// Alle Objekte über alle Collections.
    pub fn iter(&self) -> impl Iterator<Item = &GraphicHandle> {
        self.entities
            .iter()
            .chain(&self.primitives)
            .chain(&self.ground_primitives)
    }

    /// Keine Objekte?
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.primitives.is_empty() && self.ground_primitives.is_empty()
    }
}

/// Eingaben eines Render-Durchlaufs.
#[derive(Debug)]
pub struct RenderContext<'a> {
    /// Aktueller Snapshot
    pub packable: &'a Packable,
    /// Maus-Vorschau (nur während der Definition)
    pub mouse: Option<DVec3>,
    /// Plot wird definiert
    pub defining: bool,
    /// Plot ist der aktuelle
    pub active: bool,
    /// Ergebnis des letzten Durchlaufs
    pub previous: &'a PlotRender,
}

/// Policy eines Formtyps.
pub trait PlotScheme: fmt::Debug {
    /// Typ-Kennung (z.B. `"polygon"`)
    fn kind(&self) -> &str;

    /// Anwendbare Skeletons in Render-Reihenfolge.
    fn skeletons(&self) -> &[Rc<dyn Skeleton>];

    /// Darf die Definition manuell abgeschlossen werden?
    fn allow_manual_complete(&self, packable: &Packable) -> bool;

    /// Muss die Definition nach dem letzten Vertex sofort enden?
    fn force_complete(&self, _packable: &Packable) -> bool {
        false
    }

    /// Startobjekte vor dem ersten Render-Durchlauf.
    fn init_render(&self) -> PlotRender;

    /// Rendert den Snapshot (Maus-Vorschau eingeschlossen).
    fn render(&self, ctx: &RenderContext<'_>) -> PlotRender;
}

/// Registrierte Schemata nach Typ-Kennung.
#[derive(Debug, Clone, Default)]
pub struct SchemeRegistry {
    schemes: IndexMap<String, Rc<dyn PlotScheme>>,
}

impl SchemeRegistry {
    /// Leere Registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry mit den eingebauten Schemata (Polygon, Polyline).
    pub fn with_defaults(options: &PlotOptions) -> Self {
        let mut registry = Self::new();
        registry.register(Rc::new(PolygonScheme::new(options)));
        registry.register(Rc::new(PolylineScheme::new(options)));
        registry
    }

    /// Registriert ein Schema. Ein gleichnamiges wird ersetzt.
    pub fn register(&mut self, scheme: Rc<dyn PlotScheme>) {
        let kind = scheme.kind().to_string();
        if self.schemes.insert(kind.clone(), scheme).is_some() {
            log::debug!("Schema `{}` ersetzt", kind);
        }
    }

    /// Schema nach Typ-Kennung.
    pub fn get(&self, kind: &str) -> Option<Rc<dyn PlotScheme>> {
        self.schemes.get(kind).cloned()
    }

    /// Alle Typ-Kennungen in Registrierungsreihenfolge.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.schemes.keys().map(String::as_str)
    }
}
