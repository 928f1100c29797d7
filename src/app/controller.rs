//! Plot Controller für zentrale Event-Verarbeitung und das Plot-Set.

use std::rc::Rc;

use super::completion::PlotSession;
use super::handlers::lifecycle::OperateTarget;
use super::scheme::{PlotScheme, SchemeRegistry};
use super::state::CurrentChange;
use super::{render, CommandLog, PlotCommand, PlotError, PlotFeature, PlotIntent, PlotState};
use crate::core::{ListenerId, Packable, PlotId, Viewer};
use crate::shared::PlotOptions;

/// Rückmeldung an die Event-Quelle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputFeedback {
    /// Event wurde verbraucht (`preventDefault`)
    pub consumed: bool,
    /// Cursor-Hinweis
    pub cursor: Option<String>,
    /// Kamera-Steuerung gesperrt (laufender Drag)
    pub camera_locked: bool,
}

/// Orchestriert Eingaben, den aktuellen Plot und das Plot-Set.
pub struct PlotController {
    state: PlotState,
}

impl PlotController {
    /// Erstellt einen Controller über einem Viewer.
    pub fn new(viewer: Rc<dyn Viewer>, options: PlotOptions) -> Self {
        Self {
            state: PlotState::new(viewer, options),
        }
    }

    /// Zustand (read-only).
    pub fn state(&self) -> &PlotState {
        &self.state
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(&mut self, intent: PlotIntent) -> Result<InputFeedback, PlotError> {
        let commands = super::intent_mapping::map_intent_to_commands(&self.state, intent);
        let mut consumed = false;
        for command in commands {
            consumed |= self.execute(command);
        }
        self.sync()?;
        Ok(InputFeedback {
            consumed,
            cursor: self.state.pointer.cursor.clone(),
            camera_locked: self.state.pointer.camera_locked(),
        })
    }

    /// Führt einen Command aus und rendert nach.
    /// Gibt zurück, ob das auslösende Event verbraucht wurde.
    pub fn handle_command(&mut self, command: PlotCommand) -> Result<bool, PlotError> {
        let consumed = self.execute(command);
        self.sync()?;
        Ok(consumed)
    }

    /// Dispatcht an Feature-Handler in `handlers/`.
    fn execute(&mut self, command: PlotCommand) -> bool {
        use super::handlers;

        let state = &mut self.state;
        state.command_log.record(&command);
        log::debug!("Command: {:?}", command);

        match command {
            // === Auswahl ===
            PlotCommand::SelectAt { position } => handlers::selection::select_at(state, position),

            // === Definition ===
            PlotCommand::AppendVertex { position } => {
                handlers::sampling::append_vertex(state, position)
            }
            PlotCommand::UpdatePreview { position } => {
                handlers::sampling::update_preview(state, position);
                false
            }
            PlotCommand::CompleteDefinition => handlers::sampling::complete_definition(state),
            PlotCommand::CancelDefinition => handlers::sampling::cancel_definition(state),

            // === Skeleton ===
            PlotCommand::BeginSkeletonDrag { position } => {
                handlers::skeleton::begin_drag(state, position)
            }
            PlotCommand::UpdateSkeletonDrag { position } => {
                handlers::skeleton::update_drag(state, position)
            }
            PlotCommand::EndSkeletonDrag { position } => {
                handlers::skeleton::end_drag(state, position)
            }
            PlotCommand::HoverAt { position } => {
                handlers::skeleton::hover_at(state, position);
                false
            }
            PlotCommand::NudgeSelectedPoint { key } => {
                handlers::skeleton::nudge_selected(state, &key)
            }
            PlotCommand::SwallowClick => handlers::skeleton::swallow_click(state),
        }
    }

    fn sync(&mut self) -> Result<(), PlotError> {
        render::sync(&mut self.state)
    }

    /// Startet die Bearbeitung eines Plots und macht ihn aktuell.
    ///
    /// Kehrt sofort mit einer Session zurück; `PlotSession::completion`
    /// löst beim Ende der Definition auf.
    pub fn operate(&mut self, target: impl Into<OperateTarget>) -> Result<PlotSession, PlotError> {
        let session = super::handlers::lifecycle::operate(&mut self.state, target.into())?;
        self.sync()?;
        Ok(session)
    }

    /// Übernimmt einen fertigen Plot (z.B. importiert), ohne ihn aktuell zu machen.
    pub fn add(&mut self, feature: PlotFeature) -> Result<PlotId, PlotError> {
        let id = super::handlers::lifecycle::track(&mut self.state, feature, false)?;
        self.sync()?;
        Ok(id)
    }

    /// Bricht die laufende Definition ab. Gibt `true` zurück, wenn eine lief.
    pub fn cancel(&mut self) -> Result<bool, PlotError> {
        self.handle_command(PlotCommand::CancelDefinition)
    }

    /// Schließt die laufende Definition ab, sofern das Schema es erlaubt.
    pub fn complete(&mut self) -> Result<bool, PlotError> {
        self.handle_command(PlotCommand::CompleteDefinition)
    }

    /// Entfernt einen Plot. Gibt `true` zurück, wenn er verwaltet war.
    pub fn remove(&mut self, id: PlotId) -> Result<bool, PlotError> {
        let removed = super::handlers::lifecycle::remove(&mut self.state, id);
        self.sync()?;
        Ok(removed)
    }

    /// Setzt den aktuellen Plot (`None` = abwählen).
    pub fn set_current(&mut self, id: Option<PlotId>) -> Result<(), PlotError> {
        if let Some(id) = id {
            if !self.state.features.contains_key(&id) {
                return Err(PlotError::UnknownPlot(id));
            }
        }
        super::handlers::selection::set_current(&mut self.state, id);
        self.sync()
    }

    /// Aktueller Plot.
    pub fn current(&self) -> Option<PlotId> {
        self.state.current
    }

    /// Aktueller Plot als Referenz.
    pub fn current_feature(&self) -> Option<&PlotFeature> {
        self.state.current_feature()
    }

    /// Alle Plots in Einfügereihenfolge.
    pub fn plots(&self) -> impl Iterator<Item = &PlotFeature> {
        self.state.features.values()
    }

    /// Plot nach ID.
    pub fn plot(&self, id: PlotId) -> Option<&PlotFeature> {
        self.state.features.get(&id)
    }

    /// Schreibt ein Sample in einen Plot (Upsert) und rendert nach.
    pub fn set_sample(&mut self, id: PlotId, packable: Packable) -> Result<(), PlotError> {
        let feature = self
            .state
            .features
            .get_mut(&id)
            .ok_or(PlotError::UnknownPlot(id))?;
        feature.sampled_mut().set_sample(packable);
        self.sync()
    }

    /// Rendert alle Plots neu.
    pub fn refresh(&mut self) -> Result<(), PlotError> {
        self.state.invalidate_all();
        self.sync()
    }

    /// Zeit-Cursor.
    pub fn time(&self) -> f64 {
        self.state.time
    }

    /// Setzt den Zeit-Cursor und rendert alle Plots neu.
    pub fn set_time(&mut self, time: f64) -> Result<(), PlotError> {
        self.state.time = time;
        self.refresh()
    }

    /// Snapshot des aktuellen Plots zum Zeit-Cursor.
    pub fn packable(&self) -> Option<&Packable> {
        self.state.packable.as_ref()
    }

    /// Registrierte Schemata.
    pub fn schemes(&self) -> &SchemeRegistry {
        &self.state.schemes
    }

    /// Registriert ein zusätzliches Schema.
    pub fn register_scheme(&mut self, scheme: Rc<dyn PlotScheme>) {
        self.state.schemes.register(scheme);
    }

    /// Beobachtet Wechsel des aktuellen Plots.
    pub fn on_current_changed(
        &mut self,
        listener: impl FnMut(&CurrentChange) + 'static,
    ) -> ListenerId {
        self.state.current_changed.subscribe(listener)
    }

    /// Entfernt einen Beobachter.
    pub fn off_current_changed(&mut self, id: ListenerId) -> bool {
        self.state.current_changed.unsubscribe(id)
    }

    /// Cursor-Hinweis.
    pub fn cursor(&self) -> Option<&str> {
        self.state.pointer.cursor.as_deref()
    }

    /// Ist die Kamera durch einen Drag gesperrt?
    pub fn camera_locked(&self) -> bool {
        self.state.pointer.camera_locked()
    }

    /// Ausgeführte Commands.
    pub fn command_log(&self) -> &CommandLog {
        &self.state.command_log
    }
}
