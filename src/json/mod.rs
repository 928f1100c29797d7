//! JSON Import/Export für Plots.
//!
//! Format: `{ "type": "polygon", "samples": [{ "time", "positions": [[x,y,z], ...], "derivative"? }] }`.

pub mod parser;
pub mod writer;

pub use parser::parse_plot_json;
pub use writer::write_plot_json;

use serde::{Deserialize, Serialize};

use crate::core::{Packable, SampleInterpolation};

/// Serialisierte Form eines Plots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotRecord {
    /// Schema-Kennung
    #[serde(rename = "type")]
    pub kind: String,
    /// Interpolation der Samples (fehlt = Standard der Optionen)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpolation: Option<SampleInterpolation>,
    /// Samples in Zeitreihenfolge
    #[serde(default)]
    pub samples: Vec<Packable>,
}
