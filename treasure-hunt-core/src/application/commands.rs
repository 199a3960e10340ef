use crate::domain::{
    ActivityData, GeoPoint, NewUnlockRequest, NewUser, NewUserAsset, Quest, UserChanges,
};

/// Commands accepted by the quest service
#[derive(Debug, Clone, PartialEq)]
pub enum QuestCommand {
    /// Seed the default template and users if the store is empty
    InitializeDefaults,

    /// Save an edited master quest and sync every player
    PublishTemplate { quest: Quest },

    /// Load the player's quest, creating it on first access
    StartQuest { username: String },

    /// Discard the player's quest and activity record
    ResetQuest { username: String },

    CompleteSubTask {
        username: String,
        task_id: String,
        subtask_id: String,
        completed: bool,
    },

    AnswerRiddle {
        username: String,
        task_id: String,
        subtask_id: String,
        answer: String,
    },

    /// Finish the task under the cursor (all sub-tasks must be done)
    CompleteCurrentTask {
        username: String,
        location: Option<GeoPoint>,
    },

    DismissNotification {
        username: String,
        notification_id: String,
    },

    /// Move a player's cursor (admin only)
    UnlockTask { username: String, index: usize },

    /// Force-complete a sub-task (admin only)
    UnlockSubTask {
        username: String,
        task_id: String,
        subtask_id: String,
    },

    SubmitUnlockRequest { request: NewUnlockRequest },

    ApproveUnlockRequest { request_id: String },

    RejectUnlockRequest { request_id: String },

    AddUser { user: NewUser },

    /// Edit names, master key or profile of an existing user
    UpdateUser { username: String, changes: UserChanges },

    SoftDeleteUser { username: String },

    RestoreUser { username: String },

    RemoveUser { username: String },

    Authenticate { master_key: String },

    /// Replace the player's distance and effort record
    RecordActivity { username: String, data: ActivityData },

    /// Store the player's current position for the live map
    RecordLocation { username: String, location: GeoPoint },

    /// Raise an emergency alert at the player's position
    SendSosAlert { username: String, location: GeoPoint },

    /// Keep a photo captured for a sub-task
    SaveAsset { asset: NewUserAsset },
}

impl QuestCommand {
    /// Name reported in `CommandFailed` events
    pub fn name(&self) -> &'static str {
        match self {
            QuestCommand::InitializeDefaults => "InitializeDefaults",
            QuestCommand::PublishTemplate { .. } => "PublishTemplate",
            QuestCommand::StartQuest { .. } => "StartQuest",
            QuestCommand::ResetQuest { .. } => "ResetQuest",
            QuestCommand::CompleteSubTask { .. } => "CompleteSubTask",
            QuestCommand::AnswerRiddle { .. } => "AnswerRiddle",
            QuestCommand::CompleteCurrentTask { .. } => "CompleteCurrentTask",
            QuestCommand::DismissNotification { .. } => "DismissNotification",
            QuestCommand::UnlockTask { .. } => "UnlockTask",
            QuestCommand::UnlockSubTask { .. } => "UnlockSubTask",
            QuestCommand::SubmitUnlockRequest { .. } => "SubmitUnlockRequest",
            QuestCommand::ApproveUnlockRequest { .. } => "ApproveUnlockRequest",
            QuestCommand::RejectUnlockRequest { .. } => "RejectUnlockRequest",
            QuestCommand::AddUser { .. } => "AddUser",
            QuestCommand::UpdateUser { .. } => "UpdateUser",
            QuestCommand::SoftDeleteUser { .. } => "SoftDeleteUser",
            QuestCommand::RestoreUser { .. } => "RestoreUser",
            QuestCommand::RemoveUser { .. } => "RemoveUser",
            QuestCommand::Authenticate { .. } => "Authenticate",
            QuestCommand::RecordActivity { .. } => "RecordActivity",
            QuestCommand::RecordLocation { .. } => "RecordLocation",
            QuestCommand::SendSosAlert { .. } => "SendSosAlert",
            QuestCommand::SaveAsset { .. } => "SaveAsset",
        }
    }
}
