//! Mapping von Eingabe-Intents auf mutierende Plot-Commands.

use super::events::{Key, PointerButton};
use super::{PlotCommand, PlotIntent, PlotState};

/// Übersetzt einen `PlotIntent` in eine Sequenz ausführbarer `PlotCommand`s.
pub fn map_intent_to_commands(state: &PlotState, intent: PlotIntent) -> Vec<PlotCommand> {
    let defining = state.is_defining();
    match intent {
        PlotIntent::Click {
            button: PointerButton::Left,
            position,
        } => {
            if state.pointer.suppress_click {
                vec![PlotCommand::SwallowClick]
            } else if defining {
                vec![PlotCommand::AppendVertex { position }]
            } else {
                vec![PlotCommand::SelectAt { position }]
            }
        }
        PlotIntent::Click {
            button: PointerButton::Right,
            ..
        }
        | PlotIntent::DoubleClick {
            button: PointerButton::Left,
            ..
        } if defining => vec![PlotCommand::CompleteDefinition],
        PlotIntent::Click { .. } | PlotIntent::DoubleClick { .. } => vec![],

        PlotIntent::PointerDown {
            button: PointerButton::Left,
            position,
        } => vec![PlotCommand::BeginSkeletonDrag { position }],
        PlotIntent::PointerUp {
            button: PointerButton::Left,
            position,
        } if state.pointer.drag.is_some() => vec![PlotCommand::EndSkeletonDrag { position }],
        PlotIntent::PointerDown { .. } | PlotIntent::PointerUp { .. } => vec![],

        PlotIntent::PointerMove { position } => {
            if state.pointer.drag.is_some() {
                vec![PlotCommand::UpdateSkeletonDrag { position }]
            } else if defining {
                vec![
                    PlotCommand::UpdatePreview { position },
                    PlotCommand::HoverAt { position },
                ]
            } else {
                vec![PlotCommand::HoverAt { position }]
            }
        }

        PlotIntent::KeyPressed { key } => match key {
            Key::Escape if defining => vec![PlotCommand::CancelDefinition],
            Key::Enter if defining => vec![PlotCommand::CompleteDefinition],
            key if key.is_arrow() && state.pointer.selected.is_some() => {
                vec![PlotCommand::NudgeSelectedPoint { key }]
            }
            _ => vec![],
        },
    }
}

#[cfg(test)]
mod tests;
