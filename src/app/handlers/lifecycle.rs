//! Handler für das Plot-Set: operate, übernehmen, entfernen.

use super::selection;
use crate::app::completion::{PlotOutcome, PlotSession};
use crate::app::feature::{PlotFeature, PlotFeatureOptions};
use crate::app::{PlotError, PlotState};
use crate::core::PlotId;

/// Ziel von `operate()`.
#[derive(Debug)]
pub enum OperateTarget {
    /// Neuen Plot aus Optionen bauen
    New(PlotFeatureOptions),
    /// Außerhalb gebauten Plot übernehmen
    Detached(PlotFeature),
    /// Verwalteten Plot erneut aktuell machen
    Existing(PlotId),
}

impl From<PlotFeatureOptions> for OperateTarget {
    fn from(options: PlotFeatureOptions) -> Self {
        OperateTarget::New(options)
    }
}

impl From<PlotFeature> for OperateTarget {
    fn from(feature: PlotFeature) -> Self {
        OperateTarget::Detached(feature)
    }
}

impl From<PlotId> for OperateTarget {
    fn from(id: PlotId) -> Self {
        OperateTarget::Existing(id)
    }
}

/// Baut oder übernimmt einen Plot und macht ihn aktuell.
///
/// Kehrt sofort zurück; das Ende der Definition meldet `PlotSession::completion`.
pub fn operate(state: &mut PlotState, target: OperateTarget) -> Result<PlotSession, PlotError> {
    let id = match target {
        OperateTarget::Existing(id) => {
            if !state.features.contains_key(&id) {
                return Err(PlotError::UnknownPlot(id));
            }
            id
        }
        OperateTarget::New(options) => {
            let feature =
                PlotFeature::from_options(&options, &state.schemes, state.options.interpolation)?;
            track(state, feature, options.defining)?
        }
        OperateTarget::Detached(feature) => track(state, feature, true)?,
    };

    selection::set_current(state, Some(id));
    let feature = state
        .features
        .get(&id)
        .ok_or(PlotError::UnknownPlot(id))?;
    log::info!("{}: operate ({:?})", id, feature.lifecycle());
    Ok(PlotSession {
        plot: id,
        completion: feature.completion(),
    })
}

/// Übernimmt einen Plot in das verwaltete Set.
///
/// Die Startobjekte des Schemas werden vor der Übernahme in die Scene
/// gelegt; schlägt das fehl, bleibt das Set unverändert.
pub fn track(
    state: &mut PlotState,
    mut feature: PlotFeature,
    defining: bool,
) -> Result<PlotId, PlotError> {
    feature.bind(state.viewer.as_ref());
    let seed = feature.scheme().init_render();
    if let Err(e) = feature.apply_render(seed) {
        log::error!("{}: Scene nicht verfügbar: {}", feature.id(), e);
        return Err(e.into());
    }

    if defining {
        feature.begin_defining();
    } else {
        feature.commit();
    }
    feature.listen(&state.invalidated);

    let id = feature.id();
    state.features.insert(id, feature);
    state.invalidate(id);
    Ok(id)
}

/// Entfernt einen Plot. Gibt `true` zurück, wenn er verwaltet war.
pub fn remove(state: &mut PlotState, id: PlotId) -> bool {
    if !state.features.contains_key(&id) {
        return false;
    }
    if state.current == Some(id) {
        selection::set_current(state, None);
    }
    if let Some(feature) = state.features.shift_remove(&id) {
        feature.dispose(PlotOutcome::Discarded(id));
    }
    true
}
