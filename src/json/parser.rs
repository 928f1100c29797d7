//! Parser für Plot-JSON.

use anyhow::{bail, Context, Result};

use super::PlotRecord;
use crate::app::{PlotFeature, PlotFeatureOptions, SchemeRegistry};
use crate::core::SampleInterpolation;

/// Liest einen Plot-Datensatz aus JSON.
pub fn parse_plot_record(json: &str) -> Result<PlotRecord> {
    let record: PlotRecord =
        serde_json::from_str(json).context("Plot-JSON konnte nicht gelesen werden")?;
    for sample in &record.samples {
        if !sample.time.is_finite() {
            bail!("Ungültiger Sample-Zeitpunkt: {}", sample.time);
        }
        if let Some(derivative) = &sample.derivative {
            if derivative.len() != sample.positions.len() {
                bail!(
                    "Ableitung bei t={} hat {} statt {} Einträge",
                    sample.time,
                    derivative.len(),
                    sample.positions.len()
                );
            }
        }
    }
    Ok(record)
}

/// Baut aus JSON einen neuen (noch nicht verwalteten) Plot.
///
/// Das Schema wird über die Registry aufgelöst; ohne Interpolations-Angabe
/// gilt `default_interpolation`.
pub fn parse_plot_json(
    json: &str,
    schemes: &SchemeRegistry,
    default_interpolation: SampleInterpolation,
) -> Result<PlotFeature> {
    let record = parse_plot_record(json)?;
    let mut options = PlotFeatureOptions::new(record.kind.as_str()).with_samples(record.samples);
    if let Some(interpolation) = record.interpolation {
        options = options.with_interpolation(interpolation);
    }
    let feature = PlotFeature::from_options(&options, schemes, default_interpolation)
        .with_context(|| format!("Plot vom Typ `{}` nicht importierbar", record.kind))?;
    log::info!(
        "{}: importiert ({}, {} Sample(s))",
        feature.id(),
        feature.kind(),
        feature.sampled().len()
    );
    Ok(feature)
}
