use cucumber::World;
use treasure_hunt_core::{
    MasterTemplateStore, MemoryStore, PropagationReport, Quest, QuestCommand, QuestEvent,
    QuestEventLoop, QuestState, QuestStateStore,
};

#[derive(Debug, World, Default)]
pub struct QuestWorld {
    /// Quest service over an in-memory store (the system under test)
    pub service: QuestEventLoop<MemoryStore>,

    /// Master quest being edited by the administrator, not yet published
    pub draft: Option<Quest>,

    /// Last event emitted (for assertions)
    pub last_event: Option<QuestEvent>,

    pub last_error: Option<String>,

    pub last_report: Option<PropagationReport>,

    /// Id of the most recently submitted unlock request
    pub last_request_id: Option<String>,
}

impl QuestWorld {
    /// Execute a command and store the result
    pub fn execute(&mut self, command: QuestCommand) -> &QuestEvent {
        let event = self.service.handle_command(command);

        match &event {
            QuestEvent::CommandFailed { reason, .. } => self.last_error = Some(reason.clone()),
            QuestEvent::TemplatePublished { report } => self.last_report = Some(report.clone()),
            QuestEvent::UnlockRequestSubmitted { request } => {
                self.last_request_id = Some(request.id.clone())
            }
            _ => {}
        }

        self.last_event.insert(event)
    }

    /// Get the last event (panics if none)
    pub fn last_event(&self) -> &QuestEvent {
        self.last_event.as_ref().expect("No command executed yet")
    }

    /// Execute a command that must succeed
    pub fn execute_ok(&mut self, command: QuestCommand) -> QuestEvent {
        let event = self.execute(command).clone();
        assert!(!event.is_failure(), "Command failed: {:?}", event);
        event
    }

    pub fn last_command_failed(&self) -> bool {
        matches!(self.last_event, Some(QuestEvent::CommandFailed { .. }))
    }

    pub fn last_error_message(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn store(&self) -> &MemoryStore {
        self.service.store()
    }

    /// Stored quest state (panics if the player has none)
    pub fn state(&self, username: &str) -> QuestState {
        QuestStateStore::new(self.store())
            .read(username)
            .expect("Failed to read quest state")
            .unwrap_or_else(|| panic!("No quest state for '{}'", username))
    }

    /// The administrator's working copy, starting from the stored master quest
    pub fn draft_mut(&mut self) -> &mut Quest {
        if self.draft.is_none() {
            let master = MasterTemplateStore::new(self.store())
                .ensure_initialized()
                .expect("Failed to load master quest");
            self.draft = Some(master);
        }
        self.draft.get_or_insert_with(Quest::default_template)
    }

    /// Tick every sub-task of the current task, then complete it
    pub fn finish_current_task(&mut self, username: &str, task_id: &str) {
        let state = self.state(username);
        let current = state.current_task().expect("Quest already finished");
        assert_eq!(current.id, task_id, "'{}' is on another task", username);

        for subtask in &current.sub_tasks {
            self.execute_ok(QuestCommand::CompleteSubTask {
                username: username.to_string(),
                task_id: task_id.to_string(),
                subtask_id: subtask.id.clone(),
                completed: true,
            });
        }
        self.execute_ok(QuestCommand::CompleteCurrentTask {
            username: username.to_string(),
            location: None,
        });
    }
}
