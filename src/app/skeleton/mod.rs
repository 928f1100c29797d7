//! Skeleton-System: interaktive Kontrollpunkte eines Plots.
//!
//! Jedes Skeleton implementiert den `Skeleton`-Trait und wird von einem
//! Schema referenziert. Skeletons sind zustandslos: Drag-Fortschritt liegt in
//! der `DragSession` des Controllers und wird per `DragContext` hineingereicht.

/// Kontrollpunkt an jedem Vertex (Drag + Pfeiltasten).
pub mod control;
/// Zwischenpunkte auf Kanten (geschlossen und offen).
pub mod interval;
/// Verschiebe-Punkt im Schwerpunkt.
pub mod moved;


pub use control::ControlSkeleton;
pub use interval::{IntervalNonclosedSkeleton, IntervalSkeleton};
pub use moved::MovedSkeleton;

use std::fmt;

use glam::{DVec2, DVec3};

use super::events::Key;
use crate::core::{Packable, PointGraphic, Rgba, SkeletonMarker, Viewer};

/// Interaktionszustand eines einzelnen Punkts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotAction {
    /// Keine Interaktion
    #[default]
    Idle,
    /// Maus über dem Punkt
    Hover,
    /// Punkt gedrückt / selektiert
    Active,
}

/// Zustand, den ein Skeleton pro Punkt sieht.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkeletonState {
    /// Plot ist der aktuelle
    pub active: bool,
    /// Plot wird noch definiert
    pub defining: bool,
    /// Position des Punkts
    pub position: DVec3,
    /// Interaktionszustand (vom Controller bestimmt)
    pub action: PlotAction,
    /// Index in `Skeleton::format`
    pub index: usize,
}

/// Punkt-Stil pro Interaktionszustand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointStyle {
    /// Farben für Idle, Hover, Active
    pub colors: [Rgba; 3],
    /// Größe in Pixeln
    pub pixel_size: f32,
    /// Outline-Breite
    pub outline_width: f32,
    /// Outline-Farbe
    pub outline_color: Rgba,
}

impl PointStyle {
    /// Baut die Punkt-Graphic für einen Interaktionszustand.
    pub fn point(&self, action: PlotAction) -> PointGraphic {
        let color = match action {
            PlotAction::Idle => self.colors[0],
            PlotAction::Hover => self.colors[1],
            PlotAction::Active => self.colors[2],
        };
        PointGraphic {
            pixel_size: self.pixel_size,
            color,
            outline_width: self.outline_width,
            outline_color: self.outline_color,
            disable_depth_test: true,
        }
    }
}

/// Zustand einer laufenden Drag-Geste (gehört dem Controller).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    /// Gezogener Skeleton-Punkt
    pub marker: SkeletonMarker,
    /// Während der Geste eingefügter Vertex
    pub inserted: Option<usize>,
    /// Wurde seit Drag-Start bewegt?
    pub moved: bool,
    /// Skeleton hat die Kamera gesperrt
    pub camera_locked: bool,
}

impl DragSession {
    /// Startet eine Geste auf einem Punkt.
    pub fn new(marker: SkeletonMarker) -> Self {
        Self {
            marker,
            inserted: None,
            moved: false,
            camera_locked: false,
        }
    }
}

/// Kontext eines Drag-Events.
pub struct DragContext<'a> {
    /// Viewer für Screen→Welt
    pub viewer: &'a dyn Viewer,
    /// Aktueller Snapshot des Plots
    pub packable: &'a Packable,
    /// Index des gezogenen Punkts in `format`
    pub index: usize,
    /// Aktuelle Screen-Position
    pub screen: DVec2,
    /// `false` beim abschließenden Event der Geste
    pub dragging: bool,
    /// Gesten-Zustand
    pub session: &'a mut DragSession,
}

impl DragContext<'_> {
    /// Sperrt die Kamera-Steuerung für die Dauer der Geste.
    pub fn lock_camera(&mut self) {
        self.session.camera_locked = true;
    }

    /// Geländeposition unter dem Cursor.
    pub fn ground_position(&self) -> Option<DVec3> {
        self.viewer.screen_to_world(self.screen)
    }
}

/// Kontext eines Tastatur-Events.
pub struct KeyContext<'a> {
    /// Viewer für Kamera-Abfragen
    pub viewer: &'a dyn Viewer,
    /// Aktueller Snapshot des Plots
    pub packable: &'a Packable,
    /// Index des selektierten Punkts
    pub index: usize,
    /// Gedrückte Taste
    pub key: &'a Key,
    default_prevented: bool,
}

impl<'a> KeyContext<'a> {
    /// Erstellt den Kontext.
    pub fn new(viewer: &'a dyn Viewer, packable: &'a Packable, index: usize, key: &'a Key) -> Self {
        Self {
            viewer,
            packable,
            index,
            key,
            default_prevented: false,
        }
    }

    /// Markiert das Event als verbraucht.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Wurde das Event verbraucht?
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Schnittstelle einer Kontrollpunkt-Familie.
///
/// Rückgabewerte `Some(packable)` sind neue Samples, die der Controller
/// in die Sample-Property schreibt. `None` heißt: nichts zu tun.
pub trait Skeleton: fmt::Debug {
    /// Name für Logs
    fn name(&self) -> &'static str;

    /// Punkt ist nicht interaktiv (kein Cursor, kein Drag, keine Tasten).
    fn disabled(&self, state: &SkeletonState) -> bool;

    /// Cursor-Hinweis über dem Punkt.
    fn cursor(&self) -> &str;

    /// Cursor-Hinweis während des Drags.
    fn drag_cursor(&self) -> &str;

    /// Leitet die Punkt-Positionen aus den Vertices ab.
    fn format(&self, packable: &Packable) -> Vec<DVec3> {
        packable.positions.clone()
    }

    /// Drag-Event auf einem Punkt.
    fn on_drag(&self, ctx: &mut DragContext<'_>) -> Option<Packable>;

    /// Tastendruck bei selektiertem Punkt.
    fn on_key_pressed(&self, _ctx: &mut KeyContext<'_>) -> Option<Packable> {
        None
    }

    /// Punkt-Darstellung, `None` = nicht rendern.
    fn render(&self, state: &SkeletonState) -> Option<PointGraphic>;
}

/// Gemeinsame Drag-Logik der Zwischenpunkte: erster Drag fügt hinter
/// `index` einen Vertex ein, weitere Events verschieben diesen Vertex.
pub(crate) fn drag_inserted_vertex(ctx: &mut DragContext<'_>) -> Option<Packable> {
    ctx.lock_camera();
    let Some(position) = ctx.ground_position() else {
        if !ctx.dragging {
            ctx.session.inserted = None;
        }
        return None;
    };

    let mut positions = ctx.packable.positions.clone();
    match ctx.session.inserted {
        Some(inserted) if inserted < positions.len() => positions[inserted] = position,
        _ => {
            let at = (ctx.index + 1).min(positions.len());
            positions.insert(at, position);
            ctx.session.inserted = Some(at);
        }
    }
    if !ctx.dragging {
        ctx.session.inserted = None;
    }
    Some(ctx.packable.with_positions(positions))
}
