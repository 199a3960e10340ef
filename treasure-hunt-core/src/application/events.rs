use crate::application::{PropagationReport, ReviewOutcome};
use crate::domain::{LocationFix, QuestState, SosAlert, UnlockRequest, User, UserAsset};

/// Events emitted by the quest service after handling a command
#[derive(Debug, Clone, PartialEq)]
pub enum QuestEvent {
    DefaultsInitialized { quest_title: String, users: usize },

    /// Template saved and propagated
    TemplatePublished { report: PropagationReport },

    QuestLoaded { username: String, state: QuestState },

    QuestReset { username: String },

    SubTaskUpdated {
        username: String,
        task_id: String,
        subtask_id: String,
        completed: bool,
    },

    /// A riddle was answered; `correct` is false for a wrong guess
    RiddleAnswered {
        username: String,
        subtask_id: String,
        correct: bool,
    },

    TaskCompleted {
        username: String,
        task_id: String,
        cursor: usize,
        finished: bool,
    },

    NotificationDismissed {
        username: String,
        notification_id: String,
    },

    TaskUnlocked { username: String, index: usize },

    SubTaskUnlocked {
        username: String,
        task_id: String,
        subtask_id: String,
        changed: bool,
    },

    UnlockRequestSubmitted { request: UnlockRequest },

    UnlockRequestReviewed { outcome: ReviewOutcome },

    UserAdded { user: User },

    UserUpdated { user: User },

    UserDeleted { username: String },

    UserRestored { username: String },

    UserRemoved { user: User },

    Authenticated { user: User },

    ActivityRecorded { username: String },

    LocationRecorded { username: String, fix: LocationFix },

    SosAlertRaised { alert: SosAlert },

    AssetSaved { asset: UserAsset },

    /// Command failed
    CommandFailed { command: String, reason: String },
}

impl QuestEvent {
    pub fn is_failure(&self) -> bool {
        matches!(self, QuestEvent::CommandFailed { .. })
    }
}
