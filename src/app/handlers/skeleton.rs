//! Handler für Skeleton-Interaktion: Drag, Hover, Pfeiltasten.

use glam::DVec2;

use crate::app::events::Key;
use crate::app::skeleton::{DragContext, DragSession, KeyContext};
use crate::app::PlotState;
use crate::core::{GraphicTag, SkeletonMarker};

/// Interaktiver Skeleton-Punkt unter der Position.
fn enabled_marker_at(state: &PlotState, position: DVec2) -> Option<SkeletonMarker> {
    match state.viewer.pick(position)?.tag {
        GraphicTag::Skeleton(marker) if state.marker_enabled(marker) => Some(marker),
        _ => None,
    }
}

/// Startet eine Drag-Geste, wenn ein interaktiver Punkt getroffen wird.
pub fn begin_drag(state: &mut PlotState, position: DVec2) -> bool {
    state.pointer.suppress_click = false;
    let Some(marker) = enabled_marker_at(state, position) else {
        return false;
    };
    state.pointer.drag = Some(DragSession::new(marker));
    state.pointer.selected = Some(marker);
    state.pointer.cursor = state
        .skeleton_of(marker)
        .map(|skeleton| skeleton.drag_cursor().to_string());
    log::debug!("Drag gestartet auf {:?}", marker);
    true
}

/// Setzt die laufende Geste fort.
pub fn update_drag(state: &mut PlotState, position: DVec2) -> bool {
    apply_drag(state, position, true)
}

/// Beendet die laufende Geste. Nach einer Bewegung wird der folgende Klick verworfen.
pub fn end_drag(state: &mut PlotState, position: DVec2) -> bool {
    let Some(session) = state.pointer.drag else {
        return false;
    };
    if session.moved {
        apply_drag(state, position, false);
    }
    state.pointer.drag = None;
    state.pointer.suppress_click = session.moved;
    hover_at(state, position);
    log::debug!("Drag beendet auf {:?}", session.marker);
    true
}

fn apply_drag(state: &mut PlotState, position: DVec2, dragging: bool) -> bool {
    let Some(mut session) = state.pointer.drag else {
        return false;
    };
    let Some(skeleton) = state.skeleton_of(session.marker) else {
        state.pointer.drag = None;
        return false;
    };
    let viewer = state.viewer.clone();
    let time = state.time;
    let Some(feature) = state.features.get_mut(&session.marker.plot) else {
        state.pointer.drag = None;
        return false;
    };

    let packable = feature.value_at(time);
    let next = skeleton.on_drag(&mut DragContext {
        viewer: viewer.as_ref(),
        packable: &packable,
        index: session.marker.index,
        screen: position,
        dragging,
        session: &mut session,
    });
    session.moved = true;
    if let Some(next) = next {
        feature.sampled_mut().set_sample(next);
    }
    state.pointer.drag = Some(session);
    true
}

/// Aktualisiert Hover-Punkt und Cursor-Hinweis.
pub fn hover_at(state: &mut PlotState, position: DVec2) {
    if state.pointer.drag.is_some() {
        return;
    }
    let hovered = enabled_marker_at(state, position);
    let cursor = hovered
        .and_then(|marker| state.skeleton_of(marker))
        .map(|skeleton| skeleton.cursor().to_string());
    state.pointer.hovered = hovered;
    state.pointer.cursor = cursor;
}

/// Leitet einen Tastendruck an das Skeleton des selektierten Punkts.
/// Gibt `true` zurück, wenn das Skeleton das Event verbraucht hat.
pub fn nudge_selected(state: &mut PlotState, key: &Key) -> bool {
    let Some(marker) = state.pointer.selected else {
        return false;
    };
    if !state.marker_enabled(marker) {
        return false;
    }
    let Some(skeleton) = state.skeleton_of(marker) else {
        return false;
    };
    let viewer = state.viewer.clone();
    let time = state.time;
    let Some(feature) = state.features.get_mut(&marker.plot) else {
        return false;
    };

    let packable = feature.value_at(time);
    let mut ctx = KeyContext::new(viewer.as_ref(), &packable, marker.index, key);
    let next = skeleton.on_key_pressed(&mut ctx);
    let consumed = ctx.is_default_prevented();
    if let Some(next) = next {
        feature.sampled_mut().set_sample(next);
    }
    consumed
}

/// Verwirft den Klick, der auf eine Drag-Geste folgt.
pub fn swallow_click(state: &mut PlotState) -> bool {
    state.pointer.suppress_click = false;
    true
}
