use glam::DVec3;

use super::{DragContext, PointStyle, Skeleton, SkeletonState};
use crate::core::{centroid, Packable, PointGraphic};
use crate::shared::PlotOptions;

/// Ein Punkt im Schwerpunkt, Drag verschiebt den ganzen Plot.
#[derive(Debug, Clone)]
pub struct MovedSkeleton {
    style: PointStyle,
    cursor: String,
    drag_cursor: String,
}

impl MovedSkeleton {
    /// Erstellt das Skeleton aus den Optionen.
    pub fn new(options: &PlotOptions) -> Self {
        Self {
            style: PointStyle {
                colors: options.moved_colors,
                pixel_size: options.moved_pixel_size,
                outline_width: options.outline_width,
                outline_color: options.outline_color,
            },
            cursor: options.cursor_pointer.clone(),
            drag_cursor: options.cursor_drag.clone(),
        }
    }
}

impl Default for MovedSkeleton {
    fn default() -> Self {
        Self::new(&PlotOptions::default())
    }
}

impl Skeleton for MovedSkeleton {
    fn name(&self) -> &'static str {
        "moved"
    }

    fn disabled(&self, state: &SkeletonState) -> bool {
        !state.active || state.defining
    }

    fn cursor(&self) -> &str {
        &self.cursor
    }

    fn drag_cursor(&self) -> &str {
        &self.drag_cursor
    }

    fn format(&self, packable: &Packable) -> Vec<DVec3> {
        centroid(&packable.positions).into_iter().collect()
    }

    fn on_drag(&self, ctx: &mut DragContext<'_>) -> Option<Packable> {
        ctx.lock_camera();
        let target = ctx.ground_position()?;
        let center = centroid(&ctx.packable.positions)?;
        let delta = target - center;
        let positions = ctx.packable.positions.iter().map(|p| *p + delta).collect();
        Some(ctx.packable.with_positions(positions))
    }

    fn render(&self, state: &SkeletonState) -> Option<PointGraphic> {
        if !state.active || state.defining {
            return None;
        }
        Some(self.style.point(state.action))
    }
}
