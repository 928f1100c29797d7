//! Handler für die Definitionsphase: Vertices anhängen, Vorschau, Abschluss, Abbruch.

use glam::DVec2;

use crate::app::completion::PlotOutcome;
use crate::app::state::CurrentChange;
use crate::app::PlotState;
use crate::core::Packable;

/// Hängt die Geländeposition unter dem Klick an den aktuellen Plot an.
///
/// Erzwingt das Schema danach den Abschluss, endet die Definition sofort.
pub fn append_vertex(state: &mut PlotState, position: DVec2) -> bool {
    let Some(world) = state.viewer.screen_to_world(position) else {
        log::debug!("Klick bei {:?} trifft kein Gelände", position);
        return false;
    };
    let time = state.time;
    state.mouse = None;

    let force_complete = {
        let Some(feature) = state.current_feature_mut() else {
            return false;
        };
        if !feature.is_defining() {
            return false;
        }
        let current = feature.value_at(time);
        let mut positions = current.positions;
        positions.push(world);
        let next = Packable {
            time,
            positions,
            derivative: current.derivative,
        };
        let force = feature.scheme().force_complete(&next);
        log::debug!("{}: Vertex {} gesetzt", feature.id(), next.len());
        feature.sampled_mut().set_sample(next);
        force
    };

    if force_complete {
        complete_definition(state);
    }
    true
}

/// Aktualisiert die Maus-Vorschau des definierten Plots.
pub fn update_preview(state: &mut PlotState, position: DVec2) {
    if !state.is_defining() {
        return;
    }
    state.mouse = state.viewer.screen_to_world(position);
    if let Some(id) = state.current {
        state.invalidate(id);
    }
}

/// Schließt die Definition manuell ab, sofern das Schema es erlaubt.
pub fn complete_definition(state: &mut PlotState) -> bool {
    let time = state.time;
    let Some(feature) = state.current_feature_mut() else {
        return false;
    };
    if !feature.is_defining() {
        return false;
    }
    if !feature
        .scheme()
        .allow_manual_complete(&feature.value_at(time))
    {
        log::debug!("{}: noch nicht abschließbar", feature.id());
        return false;
    }
    feature.commit();
    let id = feature.id();

    state.mouse = None;
    state.pointer.reset();
    state.invalidate(id);
    state.republish();
    true
}

/// Bricht die laufende Definition ab: Plot verwerfen, Completion `Cancelled`.
pub fn cancel_definition(state: &mut PlotState) -> bool {
    if !state.is_defining() {
        return false;
    }
    let Some(id) = state.current.take() else {
        return false;
    };
    if let Some(feature) = state.features.shift_remove(&id) {
        feature.dispose(PlotOutcome::Cancelled(id));
    }
    log::info!("{}: Definition abgebrochen", id);

    state.pointer.reset();
    state.mouse = None;
    state.republish();
    state.current_changed.raise(&CurrentChange {
        previous: Some(id),
        current: None,
    });
    true
}
