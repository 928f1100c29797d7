use std::f64::consts::{FRAC_PI_2, PI, TAU};

use super::{DragContext, KeyContext, PointStyle, Skeleton, SkeletonState};
use crate::app::events::Key;
use crate::core::{Cartographic, Packable, PointGraphic};
use crate::shared::PlotOptions;

/// Kontrollpunkt an jedem Vertex.
///
/// Drag überschreibt den Vertex, Pfeiltasten verschieben ihn relativ zur
/// Blickrichtung der Kamera.
#[derive(Debug, Clone)]
pub struct ControlSkeleton {
    style: PointStyle,
    cursor: String,
    drag_cursor: String,
    nudge_height_divisor: f64,
}

impl ControlSkeleton {
    /// Erstellt das Skeleton aus den Optionen.
    pub fn new(options: &PlotOptions) -> Self {
        Self {
            style: PointStyle {
                colors: options.control_colors,
                pixel_size: options.control_pixel_size,
                outline_width: options.outline_width,
                outline_color: options.outline_color,
            },
            cursor: options.cursor_pointer.clone(),
            drag_cursor: options.cursor_drag.clone(),
            nudge_height_divisor: options.nudge_height_divisor,
        }
    }

    /// Winkel-Schrittweite in Radiant für eine Kamera-Höhe.
    pub fn nudge_distance(&self, height: f64) -> f64 {
        height / self.nudge_height_divisor * PI / 180.0 / 1000.0
    }
}

impl Default for ControlSkeleton {
    fn default() -> Self {
        Self::new(&PlotOptions::default())
    }
}

/// Heading-Versatz der Pfeiltasten (0 = Blickrichtung).
fn heading_offset(key: &Key) -> Option<f64> {
    match key {
        Key::ArrowUp => Some(0.0),
        Key::ArrowRight => Some(FRAC_PI_2),
        Key::ArrowDown => Some(PI),
        Key::ArrowLeft => Some(-FRAC_PI_2),
        _ => None,
    }
}

impl Skeleton for ControlSkeleton {
    fn name(&self) -> &'static str {
        "control"
    }

    fn disabled(&self, state: &SkeletonState) -> bool {
        !state.active
    }

    fn cursor(&self) -> &str {
        &self.cursor
    }

    fn drag_cursor(&self) -> &str {
        &self.drag_cursor
    }

    fn on_drag(&self, ctx: &mut DragContext<'_>) -> Option<Packable> {
        ctx.lock_camera();
        let position = ctx.ground_position()?;
        let mut positions = ctx.packable.positions.clone();
        *positions.get_mut(ctx.index)? = position;
        Some(ctx.packable.with_positions(positions))
    }

    fn on_key_pressed(&self, ctx: &mut KeyContext<'_>) -> Option<Packable> {
        let offset = heading_offset(ctx.key)?;
        let camera = ctx.viewer.camera();
        let height = camera.height().filter(|h| *h > 0.0)?;
        let vertex = *ctx.packable.positions.get(ctx.index)?;
        let mut carto = Cartographic::from_cartesian(vertex)?;

        ctx.prevent_default();
        let heading = (camera.heading + offset) % TAU;
        let distance = self.nudge_distance(height);
        carto.latitude += distance * heading.cos();
        carto.longitude += distance * heading.sin();

        let mut positions = ctx.packable.positions.clone();
        positions[ctx.index] = carto.to_cartesian();
        Some(ctx.packable.with_positions(positions))
    }

    fn render(&self, state: &SkeletonState) -> Option<PointGraphic> {
        Some(self.style.point(state.action))
    }
}
