use glam::DVec3;

use super::{drag_inserted_vertex, DragContext, PointStyle, Skeleton, SkeletonState};
use crate::core::{midpoint, Packable, PointGraphic};
use crate::shared::PlotOptions;

fn interval_style(options: &PlotOptions) -> PointStyle {
    PointStyle {
        colors: options.interval_colors,
        pixel_size: options.interval_pixel_size,
        outline_width: options.outline_width,
        outline_color: options.outline_color,
    }
}

/// Zwischenpunkte eines geschlossenen Rings (Polygon).
///
/// N Vertices ergeben N Mittelpunkte, der letzte liegt zwischen letztem und
/// erstem Vertex. Drag fügt einen neuen Vertex ein.
#[derive(Debug, Clone)]
pub struct IntervalSkeleton {
    style: PointStyle,
    cursor: String,
    drag_cursor: String,
}

impl IntervalSkeleton {
    /// Erstellt das Skeleton aus den Optionen.
    pub fn new(options: &PlotOptions) -> Self {
        Self {
            style: interval_style(options),
            cursor: options.cursor_pointer.clone(),
            drag_cursor: options.cursor_drag.clone(),
        }
    }
}

impl Default for IntervalSkeleton {
    fn default() -> Self {
        Self::new(&PlotOptions::default())
    }
}

impl Skeleton for IntervalSkeleton {
    fn name(&self) -> &'static str {
        "interval"
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
        let positions = &packable.positions;
        if positions.len() < 2 {
            return Vec::new();
        }
        positions
            .iter()
            .enumerate()
            .map(|(i, p)| midpoint(*p, positions[(i + 1) % positions.len()]))
            .collect()
    }

    fn on_drag(&self, ctx: &mut DragContext<'_>) -> Option<Packable> {
        drag_inserted_vertex(ctx)
    }

    fn render(&self, state: &SkeletonState) -> Option<PointGraphic> {
        if !state.active {
            return None;
        }
        Some(self.style.point(state.action))
    }
}

/// Zwischenpunkte einer offenen Linie.
///
/// N Vertices ergeben N−1 Mittelpunkte (kein Wrap-Around).
#[derive(Debug, Clone)]
pub struct IntervalNonclosedSkeleton {
    style: PointStyle,
    cursor: String,
    drag_cursor: String,
}

impl IntervalNonclosedSkeleton {
    /// Erstellt das Skeleton aus den Optionen.
    pub fn new(options: &PlotOptions) -> Self {
        Self {
            style: interval_style(options),
            cursor: options.cursor_pointer.clone(),
            drag_cursor: options.cursor_drag.clone(),
        }
    }
}

impl Default for IntervalNonclosedSkeleton {
    fn default() -> Self {
        Self::new(&PlotOptions::default())
    }
}

impl Skeleton for IntervalNonclosedSkeleton {
    fn name(&self) -> &'static str {
        "interval_nonclosed"
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
        packable
            .positions
            .windows(2)
            .map(|pair| midpoint(pair[0], pair[1]))
            .collect()
    }

    fn on_drag(&self, ctx: &mut DragContext<'_>) -> Option<Packable> {
        drag_inserted_vertex(ctx)
    }

    fn render(&self, state: &SkeletonState) -> Option<PointGraphic> {
        Some(self.style.point(state.action))
    }
}
