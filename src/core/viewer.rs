//! Schnittstelle zum Globus-Viewer (Picking, Kamera, Scene-Collections).

use std::cell::RefCell;
use std::rc::Rc;

use glam::{DVec2, DVec3};

use super::geo::Cartographic;
use super::graphic::{CollectionKind, GraphicCollection, GraphicId, GraphicTag};

/// Kamera-Pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Blickrichtung in Radiant (0 = Norden, im Uhrzeigersinn)
    pub heading: f64,
    /// Kamera-Position (kartesisch)
    pub position: DVec3,
}

impl CameraPose {
    /// Höhe der Kamera über der Oberfläche. `None` wenn nicht bestimmbar.
    pub fn height(&self) -> Option<f64> {
        Cartographic::from_cartesian(self.position).map(|c| c.height)
    }
}

/// Ergebnis eines Scene-Picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickedGraphic {
    /// Getroffenes Objekt
    pub id: GraphicId,
    /// Dessen Diskriminante
    pub tag: GraphicTag,
}

/// Vom Viewer bereitgestellte Fähigkeiten.
///
/// Misses (`None`) sind erwartete Ergebnisse, keine Fehler.
pub trait Viewer {
    /// Scene-Pick an einer Screen-Position.
    fn pick(&self, screen: DVec2) -> Option<PickedGraphic>;

    /// Screen-Position auf Geländeposition abbilden.
    fn screen_to_world(&self, screen: DVec2) -> Option<DVec3>;

    /// Aktuelle Kamera.
    fn camera(&self) -> CameraPose;

    /// Scene-Collection. `None` wenn keine Scene aktiv ist.
    fn collection(&self, kind: CollectionKind) -> Option<Rc<RefCell<GraphicCollection>>>;
}
