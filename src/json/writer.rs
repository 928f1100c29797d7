//! Writer für Plot-JSON.

use anyhow::{Context, Result};

use super::PlotRecord;
use crate::app::PlotFeature;

/// Baut den Datensatz eines Plots.
pub fn plot_record(feature: &PlotFeature) -> PlotRecord {
    PlotRecord {
        kind: feature.kind().to_string(),
        interpolation: Some(feature.sampled().interpolation()),
        samples: feature.sampled().samples().to_vec(),
    }
}

/// Schreibt einen Plot als JSON (eingerückt).
pub fn write_plot_json(feature: &PlotFeature) -> Result<String> {
    let record = plot_record(feature);
    serde_json::to_string_pretty(&record)
        .with_context(|| format!("{} konnte nicht serialisiert werden", feature.id()))
}
