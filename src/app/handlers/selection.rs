//! Handler für die Auswahl des aktuellen Plots.

use glam::DVec2;

use crate::app::completion::PlotOutcome;
use crate::app::state::CurrentChange;
use crate::app::{PlotFeature, PlotState};
use crate::core::{GraphicTag, PlotId};

/// Selektiert den Plot unter der Klick-Position.
///
/// - Miss: aktueller Plot wird abgewählt
/// - Skeleton-Punkt: ignoriert
/// - eigenes Render-Objekt eines Plots: dieser Plot wird aktuell
/// - fremdes Objekt: aktueller Plot wird abgewählt
pub fn select_at(state: &mut PlotState, position: DVec2) -> bool {
    let Some(picked) = state.viewer.pick(position) else {
        log::debug!("Pick ins Leere bei {:?}", position);
        set_current(state, None);
        return false;
    };
    if let GraphicTag::Skeleton(marker) = picked.tag {
        log::debug!("Klick auf Skeleton-Punkt {:?} ignoriert", marker);
        return false;
    }

    let owner = state
        .features
        .values()
        .find(|feature| feature.owns_graphic(picked.id))
        .map(PlotFeature::id);
    set_current(state, owner);
    owner.is_some()
}

/// Wechselt den aktuellen Plot.
///
/// Ein noch definierter Vorgänger wird übernommen, wenn sein Schema den
/// Abschluss erlaubt, sonst verworfen.
pub fn set_current(state: &mut PlotState, next: Option<PlotId>) {
    let previous = state.current;
    if previous == next {
        return;
    }

    state.current = None;
    if let Some(id) = previous {
        deactivate(state, id);
    }

    let next = next.filter(|id| state.features.contains_key(id));
    state.current = next;
    if let Some(id) = next {
        if let Some(feature) = state.features.get_mut(&id) {
            feature.set_active(true);
        }
        state.invalidate(id);
    }

    state.pointer.reset();
    state.mouse = None;
    state.republish();
    log::debug!("Aktueller Plot: {:?} → {:?}", previous, next);
    state.current_changed.raise(&CurrentChange {
        previous,
        current: next,
    });
}

fn deactivate(state: &mut PlotState, id: PlotId) {
    let time = state.time;
    let completable = {
        let Some(feature) = state.features.get_mut(&id) else {
            return;
        };
        feature.set_active(false);
        if !feature.is_defining() {
            state.invalidated.borrow_mut().push(id);
            return;
        }
        feature
            .scheme()
            .allow_manual_complete(&feature.value_at(time))
    };

    if completable {
        if let Some(feature) = state.features.get_mut(&id) {
            feature.commit();
        }
        state.invalidate(id);
    } else if let Some(feature) = state.features.shift_remove(&id) {
        log::info!("{}: unvollständig, wird verworfen", id);
        feature.dispose(PlotOutcome::Discarded(id));
    }
}
