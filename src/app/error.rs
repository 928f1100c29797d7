//! Fehlertypen der Plot-Steuerung.

use crate::core::{PlotId, ScopeError};

/// Fehler bei Controller-Operationen.
///
/// Pick-Misses und unterbesetzte Formen sind keine Fehler.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlotError {
    /// Backing-Collection fehlt oder ist ausgeliehen
    #[error(transparent)]
    Scope(#[from] ScopeError),
    /// Kein Schema mit dieser Typ-Kennung registriert
    #[error("Unbekanntes Plot-Schema `{0}`")]
    UnknownScheme(String),
    /// Plot wird vom Controller nicht verwaltet
    #[error("Unbekannter Plot {0}")]
    UnknownPlot(PlotId),
}

impl PlotError {
    /// Plot-ID, falls der Fehler einen Plot betrifft.
    pub fn plot(&self) -> Option<PlotId> {
        match self {
            PlotError::UnknownPlot(id) => Some(*id),
            _ => None,
        }
    }
}
