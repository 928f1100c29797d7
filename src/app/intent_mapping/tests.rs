use std::rc::Rc;

use glam::DVec2;

use crate::app::events::{Key, PointerButton};
use crate::app::handlers::lifecycle::{self, OperateTarget};
use crate::app::skeleton::DragSession;
use crate::app::{PlotCommand, PlotFeatureOptions, PlotIntent, PlotState};
use crate::core::{MemoryViewer, PlotId, SkeletonMarker};
use crate::shared::PlotOptions;

use super::map_intent_to_commands;

const AT: DVec2 = DVec2::new(100.0, 100.0);

fn idle_state() -> PlotState {
    PlotState::new(Rc::new(MemoryViewer::new()), PlotOptions::default())
}

fn defining_state() -> PlotState {
    let mut state = idle_state();
    lifecycle::operate(
        &mut state,
        OperateTarget::New(PlotFeatureOptions::new("polygon")),
    )
    .expect("Scene vorhanden");
    state
}

fn click(button: PointerButton) -> PlotIntent {
    PlotIntent::Click {
        button,
        position: AT,
    }
}

#[test]
fn left_click_selects_when_idle_and_appends_while_defining() {
    let commands = map_intent_to_commands(&idle_state(), click(PointerButton::Left));
    assert_eq!(commands, vec![PlotCommand::SelectAt { position: AT }]);

    let commands = map_intent_to_commands(&defining_state(), click(PointerButton::Left));
    assert_eq!(commands, vec![PlotCommand::AppendVertex { position: AT }]);
}

#[test]
fn click_after_drag_is_swallowed() {
    let mut state = defining_state();
    state.pointer.suppress_click = true;
    let commands = map_intent_to_commands(&state, click(PointerButton::Left));
    assert_eq!(commands, vec![PlotCommand::SwallowClick]);
}

#[test]
fn right_click_and_double_click_complete_only_while_defining() {
    let state = defining_state();
    assert_eq!(
        map_intent_to_commands(&state, click(PointerButton::Right)),
        vec![PlotCommand::CompleteDefinition]
    );
    assert_eq!(
        map_intent_to_commands(
            &state,
            PlotIntent::DoubleClick {
                button: PointerButton::Left,
                position: AT
            }
        ),
        vec![PlotCommand::CompleteDefinition]
    );
    assert!(map_intent_to_commands(&idle_state(), click(PointerButton::Right)).is_empty());
}

#[test]
fn pointer_move_routes_by_drag_and_definition() {
    let moved = PlotIntent::PointerMove { position: AT };
    assert_eq!(
        map_intent_to_commands(&idle_state(), moved.clone()),
        vec![PlotCommand::HoverAt { position: AT }]
    );

    let state = defining_state();
    assert_eq!(
        map_intent_to_commands(&state, moved.clone()),
        vec![
            PlotCommand::UpdatePreview { position: AT },
            PlotCommand::HoverAt { position: AT }
        ]
    );

    let mut state = idle_state();
    state.pointer.drag = Some(DragSession::new(SkeletonMarker {
        plot: PlotId(1),
        skeleton: 0,
        index: 0,
    }));
    assert_eq!(
        map_intent_to_commands(&state, moved),
        vec![PlotCommand::UpdateSkeletonDrag { position: AT }]
    );
}

#[test]
fn pointer_up_without_drag_maps_to_nothing() {
    let up = PlotIntent::PointerUp {
        button: PointerButton::Left,
        position: AT,
    };
    assert!(map_intent_to_commands(&idle_state(), up).is_empty());
}

#[test]
fn keys_map_by_definition_state() {
    let state = defining_state();
    assert_eq!(
        map_intent_to_commands(&state, PlotIntent::KeyPressed { key: Key::Escape }),
        vec![PlotCommand::CancelDefinition]
    );
    assert_eq!(
        map_intent_to_commands(&state, PlotIntent::KeyPressed { key: Key::Enter }),
        vec![PlotCommand::CompleteDefinition]
    );

    let idle = idle_state();
    assert!(map_intent_to_commands(&idle, PlotIntent::KeyPressed { key: Key::Escape }).is_empty());
    // ohne selektierten Punkt keine Pfeiltasten
    assert!(map_intent_to_commands(&idle, PlotIntent::KeyPressed { key: Key::ArrowUp }).is_empty());
}
