//! Render-Synchronisation: invalidierte Plots neu rendern, Skeleton-Punkte abgleichen.

use std::collections::HashSet;

use glam::DVec3;
use indexmap::IndexMap;

use super::scheme::RenderContext;
use super::skeleton::SkeletonState;
use super::{PlotError, PlotState};
use crate::core::{
    CollectionKind, Graphic, GraphicCollection, GraphicHandle, GraphicTag, PlotId, PointGraphic,
    ScopeError, ScopedCollection, SkeletonMarker, Viewer,
};

/// Skeleton-Punkte aller Plots in der `entities`-Collection.
///
/// Handles bleiben pro Punkt stabil, solange der Punkt gerendert wird.
#[derive(Debug)]
pub struct SkeletonLayer {
    scope: ScopedCollection<GraphicCollection>,
    markers: IndexMap<SkeletonMarker, GraphicHandle>,
}

impl SkeletonLayer {
    /// Bindet die Ebene an die `entities` des Viewers (falls vorhanden).
    pub fn new(viewer: &dyn Viewer) -> Self {
        let label = CollectionKind::Entities.label();
        let scope = match viewer.collection(CollectionKind::Entities) {
            Some(collection) => ScopedCollection::new(label, &collection),
            None => ScopedCollection::unbound(label),
        };
        Self {
            scope,
            markers: IndexMap::new(),
        }
    }

    /// Anzahl gerenderter Punkte.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Keine Punkte gerendert?
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Handle eines Punkts.
    pub fn handle(&self, marker: SkeletonMarker) -> Option<&GraphicHandle> {
        self.markers.get(&marker)
    }

    /// Alle gerenderten Punkte.
    pub fn markers(&self) -> impl Iterator<Item = &SkeletonMarker> {
        self.markers.keys()
    }

    fn apply(&mut self, desired: Vec<(SkeletonMarker, DVec3, PointGraphic)>) -> Result<(), ScopeError> {
        let keep: HashSet<SkeletonMarker> = desired.iter().map(|(m, _, _)| *m).collect();
        let stale: Vec<SkeletonMarker> = self
            .markers
            .keys()
            .filter(|m| !keep.contains(m))
            .copied()
            .collect();
        for marker in stale {
            if let Some(handle) = self.markers.shift_remove(&marker) {
                self.scope.remove(handle.id(), true);
            }
        }

        for (marker, position, point) in desired {
            match self.markers.get(&marker) {
                Some(handle) => {
                    let mut graphic = handle.borrow_mut();
                    graphic.position = Some(position);
                    graphic.point = Some(point);
                }
                None => {
                    let handle = GraphicHandle::new(Graphic::point(
                        GraphicTag::Skeleton(marker),
                        position,
                        point,
                    ));
                    self.scope.add(handle.clone())?;
                    self.markers.insert(marker, handle);
                }
            }
        }
        Ok(())
    }
}

/// Rendert alle invalidierten Plots, veröffentlicht den aktuellen Snapshot
/// und gleicht die Skeleton-Punkte ab.
pub fn sync(state: &mut PlotState) -> Result<(), PlotError> {
    let dirty: Vec<PlotId> = std::mem::take(&mut *state.invalidated.borrow_mut());
    let mut dirty = dirty.into_iter();
    let mut seen = HashSet::new();
    while let Some(id) = dirty.next() {
        if !seen.insert(id) {
            continue;
        }
        if let Err(e) = render_plot(state, id) {
            // nicht gerenderte Plots bleiben invalidiert
            state
                .invalidated
                .borrow_mut()
                .extend(std::iter::once(id).chain(dirty.filter(|id| !seen.contains(id))));
            return Err(e);
        }
    }
    state.republish();
    sync_skeletons(state)
}

/// Rendert einen Plot über sein Schema.
pub fn render_plot(state: &mut PlotState, id: PlotId) -> Result<(), PlotError> {
    let is_current = state.current == Some(id);
    let time = state.time;
    let mouse = state.mouse;
    let Some(feature) = state.features.get_mut(&id) else {
        return Ok(());
    };

    let packable = feature.value_at(time);
    let defining = feature.is_defining();
    let scheme = feature.scheme();
    let next = scheme.render(&RenderContext {
        packable: &packable,
        mouse: if is_current && defining { mouse } else { None },
        defining,
        active: feature.is_active(),
        previous: feature.rendered(),
    });
    feature.apply_render(next).map_err(|e| {
        log::error!("{}: Render konnte nicht übernommen werden: {}", id, e);
        PlotError::from(e)
    })
}

/// Gleicht die Skeleton-Punkte aller Plots mit der Scene ab.
pub fn sync_skeletons(state: &mut PlotState) -> Result<(), PlotError> {
    let mut desired = Vec::new();
    for (id, feature) in &state.features {
        let packable = feature.value_at(state.time);
        let scheme = feature.scheme();
        for (skeleton_index, skeleton) in scheme.skeletons().iter().enumerate() {
            for (index, position) in skeleton.format(&packable).into_iter().enumerate() {
                let marker = SkeletonMarker {
                    plot: *id,
                    skeleton: skeleton_index,
                    index,
                };
                let point_state = SkeletonState {
                    active: feature.is_active(),
                    defining: feature.is_defining(),
                    position,
                    action: state.pointer.action_for(marker),
                    index,
                };
                if let Some(point) = skeleton.render(&point_state) {
                    desired.push((marker, position, point));
                }
            }
        }
    }
    state.skeletons.apply(desired)?;
    Ok(())
}
