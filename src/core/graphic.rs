//! Render-Objekte (Entities/Primitives) und ihre Collections.
//!
//! Jedes Objekt trägt einen expliziten `GraphicTag`, damit Picking zwischen
//! Plot-Geometrie, Skeleton-Markern und fremden Objekten unterscheiden kann.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::scope::RenderCollection;

/// RGBA-Farbe (0.0..=1.0).
pub type Rgba = [f32; 4];

/// Eindeutige ID eines Render-Objekts (Identitäts-Semantik).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphicId(pub u64);

impl GraphicId {
    /// Vergibt die nächste freie ID.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Eindeutige ID eines Plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlotId(pub u64);

impl PlotId {
    /// Vergibt die nächste freie ID.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for PlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "plot#{}", self.0)
    }
}

/// Verweis auf einen einzelnen Skeleton-Punkt eines Plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkeletonMarker {
    /// Besitzender Plot
    pub plot: PlotId,
    /// Index des Skeletons im Schema
    pub skeleton: usize,
    /// Index des Punkts innerhalb von `Skeleton::format`
    pub index: usize,
}

/// Diskriminante für Render-Metadaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GraphicTag {
    /// Geometrie eines Plots (Linie/Polygon)
    Plot(PlotId),
    /// Interaktiver Kontrollpunkt
    Skeleton(SkeletonMarker),
    /// Objekt, das nicht von dieser Library verwaltet wird
    #[default]
    Foreign,
}

/// Welche der drei Scene-Collections gemeint ist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// `viewer.entities`
    Entities,
    /// `scene.primitives`
    Primitives,
    /// `scene.groundPrimitives`
    GroundPrimitives,
}

impl CollectionKind {
    /// Alle Collections in Pick-Reihenfolge.
    pub const ALL: [CollectionKind; 3] = [
        CollectionKind::Entities,
        CollectionKind::Primitives,
        CollectionKind::GroundPrimitives,
    ];

    /// Label für Logs und Fehlermeldungen.
    pub fn label(self) -> &'static str {
        match self {
            CollectionKind::Entities => "entities",
            CollectionKind::Primitives => "primitives",
            CollectionKind::GroundPrimitives => "groundPrimitives",
        }
    }
}

/// Punkt-Darstellung (Skeleton-Marker).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointGraphic {
    /// Größe in Screen-Pixeln
    pub pixel_size: f32,
    /// Füllfarbe
    pub color: Rgba,
    /// Outline-Breite in Pixeln
    pub outline_width: f32,
    /// Outline-Farbe
    pub outline_color: Rgba,
    /// Tiefentest aus (immer über dem Gelände sichtbar)
    pub disable_depth_test: bool,
}

/// Lazy ausgewertete Positionsliste (Gegenstück zu einer Callback-Property).
///
/// Bei `closed` wird der erste Vertex erst bei der Auswertung angehängt,
/// die gespeicherten Vertices bleiben unverändert.
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackPositions {
    vertices: Rc<[DVec3]>,
    closed: bool,
}

impl CallbackPositions {
    /// Offene Positionsfolge (Linie).
    pub fn open(vertices: Vec<DVec3>) -> Self {
        Self {
            vertices: vertices.into(),
            closed: false,
        }
    }

    /// Geschlossener Ring (Polygon).
    pub fn closed(vertices: Vec<DVec3>) -> Self {
        Self {
            vertices: vertices.into(),
            closed: true,
        }
    }

    /// Ist der Ring geschlossen?
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Anzahl gespeicherter Vertices (ohne Schließ-Vertex).
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Wertet die Positionen aus.
    pub fn evaluate(&self) -> Vec<DVec3> {
        let mut out = Vec::with_capacity(self.vertices.len() + 1);
        out.extend_from_slice(&self.vertices);
        if self.closed {
            if let Some(first) = self.vertices.first() {
                out.push(*first);
            }
        }
        out
    }
}

/// Linien-Darstellung.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineGraphic {
    /// `None` = nichts zeichnen
    pub positions: Option<CallbackPositions>,
    /// Linienfarbe
    pub material: Rgba,
    /// Linienbreite in Pixeln
    pub width: f32,
}

/// Flächen-Darstellung.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonGraphic {
    /// `None` = nichts zeichnen
    pub hierarchy: Option<CallbackPositions>,
    /// Füllfarbe
    pub material: Rgba,
}

/// Ein Render-Objekt mit optionalen Teil-Graphics.
#[derive(Debug, Clone)]
pub struct Graphic {
    /// Identität
    pub id: GraphicId,
    /// Diskriminante für Picking
    pub tag: GraphicTag,
    /// Anker-Position (für Punkte)
    pub position: Option<DVec3>,
    /// Punkt-Graphic
    pub point: Option<PointGraphic>,
    /// Linien-Graphic
    pub polyline: Option<PolylineGraphic>,
    /// Flächen-Graphic
    pub polygon: Option<PolygonGraphic>,
    /// Wurde beim Entfernen zerstört?
    pub destroyed: bool,
}

impl Graphic {
    /// Erstellt ein leeres Objekt mit neuer ID.
    pub fn new(tag: GraphicTag) -> Self {
        Self {
            id: GraphicId::next(),
            tag,
            position: None,
            point: None,
            polyline: None,
            polygon: None,
            destroyed: false,
        }
    }

    /// Erstellt einen Punkt-Marker.
    pub fn point(tag: GraphicTag, position: DVec3, point: PointGraphic) -> Self {
        Self {
            position: Some(position),
            point: Some(point),
            ..Self::new(tag)
        }
    }
}

/// Geteiltes Handle auf ein Render-Objekt.
///
/// Die ID liegt außerhalb der `RefCell`, damit Identitätsvergleiche nie
/// mit laufenden Borrows kollidieren.
#[derive(Clone)]
pub struct GraphicHandle {
    id: GraphicId,
    inner: Rc<RefCell<Graphic>>,
}

impl GraphicHandle {
    /// Verpackt ein Objekt in ein Handle.
    pub fn new(graphic: Graphic) -> Self {
        Self {
            id: graphic.id,
            inner: Rc::new(RefCell::new(graphic)),
        }
    }

    /// Identität des Objekts.
    pub fn id(&self) -> GraphicId {
        self.id
    }

    /// Lesezugriff.
    pub fn borrow(&self) -> Ref<'_, Graphic> {
        self.inner.borrow()
    }

    /// Schreibzugriff.
    pub fn borrow_mut(&self) -> RefMut<'_, Graphic> {
        self.inner.borrow_mut()
    }
}

impl PartialEq for GraphicHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for GraphicHandle {}

impl fmt::Debug for GraphicHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(g) => f
                .debug_struct("GraphicHandle")
                .field("id", &self.id)
                .field("tag", &g.tag)
                .finish(),
            Err(_) => f
                .debug_struct("GraphicHandle")
                .field("id", &self.id)
                .finish_non_exhaustive(),
        }
    }
}

/// Geordnete Scene-Collection (Entities, Primitives oder GroundPrimitives).
#[derive(Debug, Default)]
pub struct GraphicCollection {
    items: Vec<GraphicHandle>,
}

impl GraphicCollection {
    /// Erstellt eine leere Collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Anzahl enthaltener Objekte.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Ist die Collection leer?
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Objekte in Einfüge-Reihenfolge.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &GraphicHandle> {
        self.items.iter()
    }

    /// Sucht ein Objekt per ID.
    pub fn get(&self, id: GraphicId) -> Option<&GraphicHandle> {
        self.items.iter().find(|h| h.id() == id)
    }
}

impl RenderCollection for GraphicCollection {
    type Item = GraphicHandle;
    type Key = GraphicId;

    fn key_of(item: &GraphicHandle) -> GraphicId {
        item.id()
    }

    fn contains(&self, key: GraphicId) -> bool {
        self.items.iter().any(|h| h.id() == key)
    }

    fn add(&mut self, item: GraphicHandle) {
        self.items.push(item);
    }

    fn remove(&mut self, key: GraphicId, destroy: bool) -> bool {
        let Some(pos) = self.items.iter().position(|h| h.id() == key) else {
            return false;
        };
        let handle = self.items.remove(pos);
        if destroy {
            handle.borrow_mut().destroyed = true;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_callback_appends_first_vertex_on_every_query() {
        let cb = CallbackPositions::closed(vec![DVec3::X, DVec3::Y, DVec3::Z]);
        let first = cb.evaluate();
        let second = cb.evaluate();
        assert_eq!(first.len(), 4);
        assert_eq!(first, second, "Auswertung darf den Zustand nicht verändern");
        assert_eq!(first[3], DVec3::X);
        assert_eq!(cb.vertex_count(), 3);
    }

    #[test]
    fn test_collection_remove_with_destroy_marks_graphic() {
        let mut collection = GraphicCollection::new();
        let handle = GraphicHandle::new(Graphic::new(GraphicTag::Foreign));
        collection.add(handle.clone());
        assert!(collection.contains(handle.id()));

        assert!(collection.remove(handle.id(), true));
        assert!(!collection.contains(handle.id()));
        assert!(handle.borrow().destroyed);
        assert!(!collection.remove(handle.id(), true));
    }
}
