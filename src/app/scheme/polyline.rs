use std::rc::Rc;

use super::{PlotRender, PlotScheme, RenderContext};
use crate::app::skeleton::{ControlSkeleton, IntervalNonclosedSkeleton, MovedSkeleton, Skeleton};
use crate::core::{
    CallbackPositions, Graphic, GraphicHandle, GraphicTag, Packable, PolylineGraphic, Rgba,
};
use crate::shared::PlotOptions;

/// Minimale Vertex-Anzahl einer Linie.
pub const POLYLINE_MIN_VERTICES: usize = 2;

/// Eingebautes Schema für offene Linien.
#[derive(Debug)]
pub struct PolylineScheme {
    skeletons: Vec<Rc<dyn Skeleton>>,
    material: Rgba,
    line_width: f32,
}

impl PolylineScheme {
    /// Erstellt das Schema aus den Optionen.
    pub fn new(options: &PlotOptions) -> Self {
        Self {
            skeletons: vec![
                Rc::new(ControlSkeleton::new(options)),
                Rc::new(IntervalNonclosedSkeleton::new(options)),
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
        GraphicHandle::new(graphic)
    }
}

impl Default for PolylineScheme {
    fn default() -> Self {
        Self::new(&PlotOptions::default())
    }
}

impl PlotScheme for PolylineScheme {
    fn kind(&self) -> &str {
        "polyline"
    }

    fn skeletons(&self) -> &[Rc<dyn Skeleton>] {
        &self.skeletons
    }

    fn allow_manual_complete(&self, packable: &Packable) -> bool {
        packable.len() >= POLYLINE_MIN_VERTICES
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
        let line = (positions.len() >= POLYLINE_MIN_VERTICES)
            .then(|| CallbackPositions::open(positions));

        entity.borrow_mut().polyline = Some(PolylineGraphic {
            positions: line,
            material: self.material,
            width: self.line_width,
        });

        PlotRender {
            entities: vec![entity],
            ..PlotRender::default()
        }
    }
}
