//! In-Memory-Viewer ohne GPU: planare Screen-Abbildung auf die Kugel und
//! Picking in Screen-Pixeln. Für Tests, Benchmarks und das Demo-Binary.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::{DVec2, DVec3};

use super::geo::Cartographic;
use super::graphic::{CollectionKind, Graphic, GraphicCollection, GraphicHandle};
use super::viewer::{CameraPose, PickedGraphic, Viewer};

/// Standard-Viewport in Pixeln.
pub const DEFAULT_VIEWPORT: [f64; 2] = [1280.0, 720.0];
/// Winkel pro Screen-Pixel (≈ 6.4 m am Äquator).
pub const DEFAULT_RADIANS_PER_PIXEL: f64 = 1.0e-6;
/// Pick-Toleranz in Pixeln.
pub const DEFAULT_PICK_TOLERANCE_PX: f64 = 4.0;
/// Kamera-Höhe beim Start.
pub const DEFAULT_CAMERA_HEIGHT: f64 = 10_000.0;

/// Viewer-Implementierung im Speicher.
///
/// Die Bildschirmmitte liegt bei Länge/Breite 0. Screen-Y wächst nach unten.
#[derive(Debug)]
pub struct MemoryViewer {
    collections: Option<[Rc<RefCell<GraphicCollection>>; 3]>,
    camera: Cell<CameraPose>,
    viewport: DVec2,
    radians_per_pixel: f64,
    pick_tolerance_px: f64,
}

impl MemoryViewer {
    /// Viewer mit drei leeren Collections.
    pub fn new() -> Self {
        Self {
            collections: Some([
                Rc::new(RefCell::new(GraphicCollection::new())),
                Rc::new(RefCell::new(GraphicCollection::new())),
                Rc::new(RefCell::new(GraphicCollection::new())),
            ]),
            camera: Cell::new(CameraPose {
                heading: 0.0,
                position: Cartographic {
                    longitude: 0.0,
                    latitude: 0.0,
                    height: DEFAULT_CAMERA_HEIGHT,
                }
                .to_cartesian(),
            }),
            viewport: DVec2::from(DEFAULT_VIEWPORT),
            radians_per_pixel: DEFAULT_RADIANS_PER_PIXEL,
            pick_tolerance_px: DEFAULT_PICK_TOLERANCE_PX,
        }
    }

    /// Viewer ohne Scene (jede Collection-Abfrage liefert `None`).
    pub fn detached() -> Self {
        Self {
            collections: None,
            ..Self::new()
        }
    }

    /// Setzt die Pick-Toleranz.
    pub fn with_pick_tolerance(mut self, pixels: f64) -> Self {
        self.pick_tolerance_px = pixels;
        self
    }

    /// Viewport-Größe in Pixeln.
    pub fn viewport(&self) -> DVec2 {
        self.viewport
    }

    /// Setzt die Kamera.
    pub fn set_camera(&self, camera: CameraPose) {
        self.camera.set(camera);
    }

    /// Setzt Heading und Höhe der Kamera über der Bildschirmmitte.
    pub fn set_camera_heading_height(&self, heading: f64, height: f64) {
        self.camera.set(CameraPose {
            heading,
            position: Cartographic {
                longitude: 0.0,
                latitude: 0.0,
                height,
            }
            .to_cartesian(),
        });
    }

    /// Anzahl Objekte in einer Collection (0 ohne Scene).
    pub fn count(&self, kind: CollectionKind) -> usize {
        self.collection(kind).map(|c| c.borrow().len()).unwrap_or(0)
    }

    /// Projiziert eine Weltposition auf den Screen.
    pub fn project(&self, world: DVec3) -> Option<DVec2> {
        let carto = Cartographic::from_cartesian(world)?;
        let half = self.viewport * 0.5;
        Some(DVec2::new(
            half.x + carto.longitude / self.radians_per_pixel,
            half.y - carto.latitude / self.radians_per_pixel,
        ))
    }

    fn handles_in_pick_order(&self) -> Vec<GraphicHandle> {
        let Some(collections) = &self.collections else {
            return Vec::new();
        };
        collections
            .iter()
            .flat_map(|c| c.borrow().iter().rev().cloned().collect::<Vec<_>>())
            .collect()
    }

    fn hits_point(&self, graphic: &Graphic, screen: DVec2) -> bool {
        let (Some(point), Some(position)) = (graphic.point, graphic.position) else {
            return false;
        };
        self.project(position).is_some_and(|p| {
            p.distance(screen) <= self.pick_tolerance_px + f64::from(point.pixel_size) * 0.5
        })
    }

    fn hits_polyline(&self, graphic: &Graphic, screen: DVec2) -> bool {
        let Some(positions) = graphic.polyline.as_ref().and_then(|l| l.positions.as_ref()) else {
            return false;
        };
        let width = graphic.polyline.as_ref().map(|l| l.width).unwrap_or(1.0);
        let projected: Vec<DVec2> = positions
            .evaluate()
            .into_iter()
            .filter_map(|p| self.project(p))
            .collect();
        projected.windows(2).any(|seg| {
            distance_to_segment(screen, seg[0], seg[1])
                <= self.pick_tolerance_px + f64::from(width) * 0.5
        })
    }

    fn hits_polygon(&self, graphic: &Graphic, screen: DVec2) -> bool {
        let Some(ring) = graphic.polygon.as_ref().and_then(|p| p.hierarchy.as_ref()) else {
            return false;
        };
        let projected: Vec<DVec2> = ring
            .evaluate()
            .into_iter()
            .filter_map(|p| self.project(p))
            .collect();
        projected.len() >= 3 && point_in_polygon(screen, &projected)
    }
}

impl Default for MemoryViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewer for MemoryViewer {
    fn pick(&self, screen: DVec2) -> Option<PickedGraphic> {
        let handles = self.handles_in_pick_order();
        // Punkte liegen immer oben, dann Linien, dann Flächen
        let checks: [fn(&Self, &Graphic, DVec2) -> bool; 3] =
            [Self::hits_point, Self::hits_polyline, Self::hits_polygon];
        for check in checks {
            for handle in &handles {
                let graphic = handle.borrow();
                if !graphic.destroyed && check(self, &graphic, screen) {
                    return Some(PickedGraphic {
                        id: graphic.id,
                        tag: graphic.tag,
                    });
                }
            }
        }
        None
    }

    fn screen_to_world(&self, screen: DVec2) -> Option<DVec3> {
        if screen.x < 0.0
            || screen.y < 0.0
            || screen.x > self.viewport.x
            || screen.y > self.viewport.y
        {
            return None;
        }
        let half = self.viewport * 0.5;
        Some(
            Cartographic {
                longitude: (screen.x - half.x) * self.radians_per_pixel,
                latitude: (half.y - screen.y) * self.radians_per_pixel,
                height: 0.0,
            }
            .to_cartesian(),
        )
    }

    fn camera(&self) -> CameraPose {
        self.camera.get()
    }

    fn collection(&self, kind: CollectionKind) -> Option<Rc<RefCell<GraphicCollection>>> {
        let collections = self.collections.as_ref()?;
        let index = match kind {
            CollectionKind::Entities => 0,
            CollectionKind::Primitives => 1,
            CollectionKind::GroundPrimitives => 2,
        };
        Some(collections[index].clone())
    }
}

fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f64::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

fn point_in_polygon(p: DVec2, ring: &[DVec2]) -> bool {
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}
