use std::rc::Rc;

use super::{PlotRender, PlotScheme, RenderContext};
use crate::app::skeleton::{ControlSkeleton, IntervalSkeleton, MovedSkeleton, Skeleton};
use crate::core::{
    CallbackPositions, Graphic, GraphicHandle, GraphicTag, Packable, PolygonGraphic,
    PolylineGraphic, Rgba,
};
use crate::shared::PlotOptions;

/// Minimale Vertex-Anzahl eines Polygons.
pub const POLYGON_MIN_VERTICES: usize = 3;

/// Eingebautes Polygon-Schema.
///
/// Ein einziges Entity mit Linie und Fläche wird über alle Durchläufe
/// wiederverwendet; nur dessen Geometrie wechselt.
#[derive(Debug)]
pub struct PolygonScheme {
    skeletons: Vec<Rc<dyn Skeleton>>,
    material: Rgba,
    line_width: f32,
}

impl PolygonScheme {
    /// Erstellt das Schema aus den Optionen.
    pub fn new(options: &PlotOptions) -> Self {
        Self {
            skeletons: vec![
                Rc::new(ControlSkeleton::new(options)),
                Rc::new(IntervalSkeleton::new(options)),
                Rc::new(MovedSkeleton::new(options)),
            ],
            material: options.shape_material,
            line_width: options.line_width,
        }
    }

    fn seed_entity(&self) -> GraphicHandle {
        let mut graphic = Graphic::new(GraphicTag::Foreign);
        graphic.polyline = Some(PolylineGraphic {
            positions: None,
            material: self.material,
            width: self.line_width,
        });
        graphic.polygon = Some(PolygonGraphic {
            hierarchy: None,
            material: self.material,
        });
        GraphicHandle::new(graphic)
    }
}

impl Default for PolygonScheme {
    fn default() -> Self {
        Self::new(&PlotOptions::default())
    }
}

impl PlotScheme for PolygonScheme {
    fn kind(&self) -> &str {
        "polygon"
    }

    fn skeletons(&self) -> &[Rc<dyn Skeleton>] {
        &self.skeletons
    }

    fn allow_manual_complete(&self, packable: &Packable) -> bool {
        packable.len() >= POLYGON_MIN_VERTICES
    }

    fn init_render(&self) -> PlotRender {
        PlotRender {
            entities: vec![self.seed_entity()],
            ..PlotRender::default()
        }
    }

    fn render(&self, ctx: &RenderContext<'_>) -> PlotRender {
        let entity = ctx
            .previous
            .entities
            .first()
            .cloned()
            .unwrap_or_else(|| self.seed_entity());

        let mut positions = ctx.packable.positions.clone();
        positions.extend(ctx.mouse);

        let (line, ring) = match positions.len() {
            2 => (Some(CallbackPositions::open(positions)), None),
            n if n >= POLYGON_MIN_VERTICES => (None, Some(CallbackPositions::closed(positions))),
            _ => (None, None),
        };

        {
            let mut graphic = entity.borrow_mut();
            graphic.polyline = Some(PolylineGraphic {
                positions: line,
                material: self.material,
                width: self.line_width,
            });
            graphic.polygon = Some(PolygonGraphic {
                hierarchy: ring,
                material: self.material,
            });
        }

        PlotRender {
            entities: vec![entity],
            ..PlotRender::default()
        }
    }
}
