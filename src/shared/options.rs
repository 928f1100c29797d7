//! Zentrale Konfiguration für Plot-Darstellung und Interaktion.
//!
//! `PlotOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

use crate::core::{Rgba, SampleInterpolation};

// ── Skeleton-Punkte ─────────────────────────────────────────────────

/// Kontrollpunkt-Farben: Idle / Hover / Active (Blau → Aqua).
pub const CONTROL_COLORS: [Rgba; 3] = [
    [0.0, 0.0, 1.0, 0.4],
    [0.0, 0.0, 1.0, 0.6],
    [0.0, 1.0, 1.0, 1.0],
];
/// Kontrollpunkt-Größe in Pixeln.
pub const CONTROL_PIXEL_SIZE: f32 = 8.0;
/// Zwischenpunkt-Farben: Idle / Hover / Active (Grün).
pub const INTERVAL_COLORS: [Rgba; 3] = [
    [0.0, 0.5, 0.0, 0.4],
    [0.0, 0.5, 0.0, 0.6],
    [0.0, 0.5, 0.0, 1.0],
];
/// Zwischenpunkt-Größe in Pixeln.
pub const INTERVAL_PIXEL_SIZE: f32 = 6.0;
/// Verschiebe-Punkt-Farben: Idle / Hover / Active (Weiß).
pub const MOVED_COLORS: [Rgba; 3] = [
    [1.0, 1.0, 1.0, 0.4],
    [1.0, 1.0, 1.0, 0.6],
    [1.0, 1.0, 1.0, 1.0],
];
/// Verschiebe-Punkt-Größe in Pixeln.
pub const MOVED_PIXEL_SIZE: f32 = 10.0;
/// Outline-Farbe aller Skeleton-Punkte.
pub const SKELETON_OUTLINE_COLOR: Rgba = [1.0, 1.0, 1.0, 0.4];
/// Outline-Breite aller Skeleton-Punkte.
pub const SKELETON_OUTLINE_WIDTH: f32 = 1.0;

// ── Plot-Geometrie ──────────────────────────────────────────────────

/// Füllfarbe von Linien und Polygonen (Gelb, halbtransparent).
pub const SHAPE_MATERIAL: Rgba = [1.0, 1.0, 0.0, 0.5];
/// Linienbreite in Pixeln.
pub const SHAPE_LINE_WIDTH: f32 = 2.0;

// ── Interaktion ─────────────────────────────────────────────────────

/// Cursor über interaktiven Punkten.
pub const CURSOR_POINTER: &str = "pointer";
/// Cursor während eines Drags.
pub const CURSOR_DRAG: &str = "crosshair";
/// Kamera-Höhe wird durch diesen Wert geteilt, um die Pfeiltasten-Schrittweite zu bestimmen.
pub const NUDGE_HEIGHT_DIVISOR: f64 = 100_000.0;
/// Maximale Anzahl Einträge im Command-Log.
pub const COMMAND_LOG_CAPACITY: usize = 1000;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Plot-Optionen.
/// Wird als `globe_plot.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotOptions {
    // ── Skeleton ────────────────────────────────────────────────
    /// Kontrollpunkt-Farben (Idle, Hover, Active)
    pub control_colors: [Rgba; 3],
    /// Kontrollpunkt-Größe
    pub control_pixel_size: f32,
    /// Zwischenpunkt-Farben (Idle, Hover, Active)
    pub interval_colors: [Rgba; 3],
    /// Zwischenpunkt-Größe
    pub interval_pixel_size: f32,
    /// Verschiebe-Punkt-Farben (Idle, Hover, Active)
    #[serde(default = "default_moved_colors")]
    pub moved_colors: [Rgba; 3],
    /// Verschiebe-Punkt-Größe
    #[serde(default = "default_moved_pixel_size")]
    pub moved_pixel_size: f32,
    /// Outline-Farbe
    pub outline_color: Rgba,
    /// Outline-Breite
    pub outline_width: f32,

    // ── Geometrie ───────────────────────────────────────────────
    /// Füllfarbe für Linien/Polygone
    pub shape_material: Rgba,
    /// Linienbreite
    pub line_width: f32,

    // ── Interaktion ─────────────────────────────────────────────
    /// Cursor-Hinweis über Punkten
    pub cursor_pointer: String,
    /// Cursor-Hinweis während eines Drags
    pub cursor_drag: String,
    /// Teiler für die Pfeiltasten-Schrittweite (Kamera-Höhe / Teiler)
    pub nudge_height_divisor: f64,

    // ── Sampling ────────────────────────────────────────────────
    /// Standard-Interpolation neuer Plots
    #[serde(default)]
    pub interpolation: SampleInterpolation,
    /// Kapazität des Command-Logs
    #[serde(default = "default_command_log_capacity")]
    pub command_log_capacity: usize,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            control_colors: CONTROL_COLORS,
            control_pixel_size: CONTROL_PIXEL_SIZE,
            interval_colors: INTERVAL_COLORS,
            interval_pixel_size: INTERVAL_PIXEL_SIZE,
            moved_colors: MOVED_COLORS,
            moved_pixel_size: MOVED_PIXEL_SIZE,
            outline_color: SKELETON_OUTLINE_COLOR,
            outline_width: SKELETON_OUTLINE_WIDTH,

            shape_material: SHAPE_MATERIAL,
            line_width: SHAPE_LINE_WIDTH,

            cursor_pointer: CURSOR_POINTER.to_string(),
            cursor_drag: CURSOR_DRAG.to_string(),
            nudge_height_divisor: NUDGE_HEIGHT_DIVISOR,

            interpolation: SampleInterpolation::Hold,
            command_log_capacity: COMMAND_LOG_CAPACITY,
        }
    }
}

/// Serde-Default für `moved_colors` (Abwärtskompatibilität).
fn default_moved_colors() -> [Rgba; 3] {
    MOVED_COLORS
}

/// Serde-Default für `moved_pixel_size` (Abwärtskompatibilität).
fn default_moved_pixel_size() -> f32 {
    MOVED_PIXEL_SIZE
}

/// Serde-Default für `command_log_capacity`.
fn default_command_log_capacity() -> usize {
    COMMAND_LOG_CAPACITY
}

impl PlotOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("globe_plot"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("globe_plot.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("globe_plot_does_not_exist.toml");
        assert_eq!(PlotOptions::load_from_file(&path), PlotOptions::default());
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!(
            "globe_plot_malformed_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "control_pixel_size = \"gross\"").expect("schreibbar");
        assert_eq!(PlotOptions::load_from_file(&path), PlotOptions::default());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_saved_options_load_back() {
        let path = std::env::temp_dir().join(format!(
            "globe_plot_saved_{}.toml",
            std::process::id()
        ));
        let mut options = PlotOptions::default();
        options.control_pixel_size = 12.0;
        options.interpolation = SampleInterpolation::Linear;
        options.save_to_file(&path).expect("speicherbar");

        let loaded = PlotOptions::load_from_file(&path);
        assert_eq!(loaded.control_pixel_size, 12.0);
        assert_eq!(loaded.interpolation, SampleInterpolation::Linear);
        let _ = std::fs::remove_file(&path);
    }
}
