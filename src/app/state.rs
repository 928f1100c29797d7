//! Plot State: zentrale Datenhaltung des Controllers.

use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec3;
use indexmap::IndexMap;

use super::feature::{InvalidationQueue, PlotFeature};
use super::render::SkeletonLayer;
use super::scheme::SchemeRegistry;
use super::skeleton::{DragSession, PlotAction, Skeleton, SkeletonState};
use super::CommandLog;
use crate::core::{ChangeEvent, Packable, PlotId, SkeletonMarker, Viewer};
use crate::shared::PlotOptions;

/// Zustand von Maus und Skeleton-Interaktion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerState {
    /// Punkt unter der Maus
    pub hovered: Option<SkeletonMarker>,
    /// Zuletzt gedrückter Punkt (Ziel der Pfeiltasten)
    pub selected: Option<SkeletonMarker>,
    /// Laufende Drag-Geste
    pub drag: Option<DragSession>,
    /// Cursor-Hinweis für die Oberfläche
    pub cursor: Option<String>,
    /// Nächster Klick gehört zur gerade beendeten Drag-Geste
    pub suppress_click: bool,
}

impl PointerState {
    /// Interaktionszustand eines Punkts.
    pub fn action_for(&self, marker: SkeletonMarker) -> PlotAction {
        if self.drag.is_some_and(|d| d.marker == marker) || self.selected == Some(marker) {
            PlotAction::Active
        } else if self.hovered == Some(marker) {
            PlotAction::Hover
        } else {
            PlotAction::Idle
        }
    }

    /// Setzt alles außer der Klick-Unterdrückung zurück.
    pub fn reset(&mut self) {
        self.hovered = None;
        self.selected = None;
        self.drag = None;
        self.cursor = None;
    }

    /// Ist die Kamera durch einen Drag gesperrt?
    pub fn camera_locked(&self) -> bool {
        self.drag.is_some_and(|d| d.camera_locked)
    }
}

/// Payload von `current_changed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentChange {
    /// Bisher aktueller Plot
    pub previous: Option<PlotId>,
    /// Neuer aktueller Plot
    pub current: Option<PlotId>,
}

/// Gesamter Zustand eines Plot-Controllers.
pub struct PlotState {
    /// Globus-Viewer
    pub viewer: Rc<dyn Viewer>,
    /// Registrierte Schemata
    pub schemes: SchemeRegistry,
    /// Verwaltete Plots in Einfügereihenfolge
    pub features: IndexMap<PlotId, PlotFeature>,
    /// Aktueller Plot (höchstens einer)
    pub current: Option<PlotId>,
    /// Zeit-Cursor für alle Sample-Properties
    pub time: f64,
    /// Snapshot des aktuellen Plots zum Zeit-Cursor
    pub packable: Option<Packable>,
    /// Maus-Vorschau während der Definition
    pub mouse: Option<DVec3>,
    /// Maus- und Skeleton-Interaktion
    pub pointer: PointerState,
    /// Gerenderte Skeleton-Punkte
    pub skeletons: SkeletonLayer,
    /// Plots mit geänderten Samples
    pub(crate) invalidated: InvalidationQueue,
    /// Laufzeit-Optionen
    pub options: PlotOptions,
    /// Ausgeführte Commands
    pub command_log: CommandLog,
    /// Wird bei jedem Wechsel des aktuellen Plots ausgelöst
    pub current_changed: ChangeEvent<CurrentChange>,
}

impl PlotState {
    /// Erstellt den Zustand mit den eingebauten Schemata.
    pub fn new(viewer: Rc<dyn Viewer>, options: PlotOptions) -> Self {
        let skeletons = SkeletonLayer::new(viewer.as_ref());
        Self {
            schemes: SchemeRegistry::with_defaults(&options),
            features: IndexMap::new(),
            current: None,
            time: 0.0,
            packable: None,
            mouse: None,
            pointer: PointerState::default(),
            skeletons,
            invalidated: Rc::new(RefCell::new(Vec::new())),
            command_log: CommandLog::with_capacity(options.command_log_capacity),
            current_changed: ChangeEvent::new(),
            options,
            viewer,
        }
    }

    /// Aktueller Plot.
    pub fn current_feature(&self) -> Option<&PlotFeature> {
        self.current.and_then(|id| self.features.get(&id))
    }

    /// Aktueller Plot (mutierbar).
    pub fn current_feature_mut(&mut self) -> Option<&mut PlotFeature> {
        let id = self.current?;
        self.features.get_mut(&id)
    }

    /// Wird der aktuelle Plot gerade definiert?
    pub fn is_defining(&self) -> bool {
        self.current_feature().is_some_and(PlotFeature::is_defining)
    }

    /// Markiert einen Plot für den nächsten Render-Durchlauf.
    pub fn invalidate(&self, id: PlotId) {
        self.invalidated.borrow_mut().push(id);
    }

    /// Markiert alle Plots.
    pub fn invalidate_all(&self) {
        self.invalidated
            .borrow_mut()
            .extend(self.features.keys().copied());
    }

    /// Skeleton hinter einem Punkt.
    pub fn skeleton_of(&self, marker: SkeletonMarker) -> Option<Rc<dyn Skeleton>> {
        let feature = self.features.get(&marker.plot)?;
        feature.scheme().skeletons().get(marker.skeleton).cloned()
    }

    /// Zustand, den das Skeleton für diesen Punkt sieht.
    pub fn marker_state(&self, marker: SkeletonMarker) -> Option<SkeletonState> {
        let feature = self.features.get(&marker.plot)?;
        let skeleton = self.skeleton_of(marker)?;
        let position = *skeleton
            .format(&feature.value_at(self.time))
            .get(marker.index)?;
        Some(SkeletonState {
            active: feature.is_active(),
            defining: feature.is_defining(),
            position,
            action: self.pointer.action_for(marker),
            index: marker.index,
        })
    }

    /// Ist der Punkt interaktiv? Nur Punkte des aktuellen Plots kommen in Frage.
    pub fn marker_enabled(&self, marker: SkeletonMarker) -> bool {
        if self.current != Some(marker.plot) {
            return false;
        }
        match (self.skeleton_of(marker), self.marker_state(marker)) {
            (Some(skeleton), Some(state)) => !skeleton.disabled(&state),
            _ => false,
        }
    }

    /// Aktualisiert den veröffentlichten Snapshot des aktuellen Plots.
    pub fn republish(&mut self) {
        self.packable = self.current_feature().map(|f| f.value_at(self.time));
    }
}
