//! Geteilte Typen und Hilfsfunktionen für layer-übergreifende Verträge.

pub mod diff;
pub mod options;

pub use diff::{list_diff, ListDiff};
pub use options::PlotOptions;
