//! Packable: zeitgestempelter Snapshot der Vertex-Positionen eines Plots.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Snapshot der Geometrie zu einem Zeitpunkt.
///
/// `positions` ist in Vertex-Reihenfolge (= Klick-Reihenfolge). Eine leere
/// Liste bedeutet "noch nichts gezeichnet".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Packable {
    /// Zeitpunkt in Sekunden (Zeit-Cursor des Controllers)
    pub time: f64,
    /// Vertex-Positionen
    #[serde(default)]
    pub positions: Vec<DVec3>,
    /// Optionale Ableitung je Vertex
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derivative: Option<Vec<DVec3>>,
}

impl Packable {
    /// Erstellt einen Snapshot ohne Ableitung.
    pub fn new(time: f64, positions: Vec<DVec3>) -> Self {
        Self {
            time,
            positions,
            derivative: None,
        }
    }

    /// Leerer Snapshot.
    pub fn empty(time: f64) -> Self {
        Self::new(time, Vec::new())
    }

    /// Anzahl Vertices.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Noch keine Vertices?
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Gleicher Zeitpunkt und Ableitung, neue Positionen.
    pub fn with_positions(&self, positions: Vec<DVec3>) -> Self {
        Self {
            time: self.time,
            positions,
            derivative: self.derivative.clone(),
        }
    }
}
