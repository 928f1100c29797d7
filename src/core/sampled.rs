//! Zeitindizierte Sample-Property für Packables.

use serde::{Deserialize, Serialize};

use super::event::ChangeEvent;
use super::packable::Packable;

/// Auswertungsstrategie zwischen zwei Samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleInterpolation {
    /// Letztes Sample vor oder am Zeitpunkt halten
    #[default]
    Hold,
    /// Linear zwischen Nachbar-Samples gleicher Vertex-Anzahl, sonst `Hold`
    Linear,
}

/// Zeitreihe von Packables mit Upsert und Change-Event.
///
/// Samples liegen nach Zeit sortiert; pro Zeitpunkt existiert höchstens eins.
#[derive(Debug, Default)]
pub struct SampledProperty {
    samples: Vec<Packable>,
    interpolation: SampleInterpolation,
    definition_changed: ChangeEvent<Packable>,
}

impl SampledProperty {
    /// Erstellt eine leere Property.
    pub fn new(interpolation: SampleInterpolation) -> Self {
        Self {
            samples: Vec::new(),
            interpolation,
            definition_changed: ChangeEvent::new(),
        }
    }

    /// Erstellt eine Property aus vorhandenen Samples (ohne Event).
    pub fn with_samples(interpolation: SampleInterpolation, samples: Vec<Packable>) -> Self {
        let mut property = Self::new(interpolation);
        for sample in samples {
            property.upsert(sample);
        }
        property
    }

    /// Aktive Interpolation.
    pub fn interpolation(&self) -> SampleInterpolation {
        self.interpolation
    }

    /// Alle Samples in Zeitreihenfolge.
    pub fn samples(&self) -> &[Packable] {
        &self.samples
    }

    /// Anzahl Samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Keine Samples vorhanden?
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Event, das nach jeder Änderung mit dem betroffenen Sample ausgelöst wird.
    pub fn definition_changed(&mut self) -> &mut ChangeEvent<Packable> {
        &mut self.definition_changed
    }

    /// Liefert den zum Zeitpunkt gültigen Snapshot.
    ///
    /// - vor dem ersten Sample: das erste Sample
    /// - ohne Samples: leerer Snapshot zum Zeitpunkt `time`
    pub fn get_value(&self, time: f64) -> Packable {
        let Some(first) = self.samples.first() else {
            return Packable::empty(time);
        };
        let upper = self.samples.partition_point(|s| s.time <= time);
        if upper == 0 {
            return first.clone();
        }
        let left = &self.samples[upper - 1];
        if self.interpolation == SampleInterpolation::Hold || left.time == time {
            return left.clone();
        }
        match self.samples.get(upper) {
            Some(right) if right.positions.len() == left.positions.len() => {
                interpolate(left, right, time)
            }
            _ => left.clone(),
        }
    }

    /// Upsert am Zeitpunkt `packable.time`, danach Change-Event.
    pub fn set_sample(&mut self, packable: Packable) {
        self.upsert(packable.clone());
        self.definition_changed.raise(&packable);
    }

    /// Entfernt das Sample am Zeitpunkt. Gibt `true` zurück wenn vorhanden.
    pub fn remove_sample(&mut self, time: f64) -> bool {
        let Some(pos) = self.samples.iter().position(|s| s.time == time) else {
            return false;
        };
        self.samples.remove(pos);
        self.definition_changed.raise(&Packable::empty(time));
        true
    }

    /// Entfernt alle Samples.
    pub fn clear(&mut self) {
        if self.samples.is_empty() {
            return;
        }
        let time = self.samples[0].time;
        self.samples.clear();
        self.definition_changed.raise(&Packable::empty(time));
    }

    fn upsert(&mut self, packable: Packable) {
        let pos = self.samples.partition_point(|s| s.time < packable.time);
        match self.samples.get_mut(pos) {
            Some(existing) if existing.time == packable.time => *existing = packable,
            _ => self.samples.insert(pos, packable),
        }
    }
}

fn interpolate(left: &Packable, right: &Packable, time: f64) -> Packable {
    let span = right.time - left.time;
    let t = if span > 0.0 {
        (time - left.time) / span
    } else {
        0.0
    };
    let positions = left
        .positions
        .iter()
        .zip(&right.positions)
        .map(|(a, b)| a.lerp(*b, t))
        .collect();
    Packable {
        time,
        positions,
        derivative: left.derivative.clone(),
    }
}
