use crate::application::{PropagationEngine, QuestCommand, QuestEvent, UnlockReview};
use crate::domain::{LocationFix, QuestError, QuestState, SosAlert, User, UserAsset};
use crate::error::{CoreError, Result};
use crate::storage::{
    ActivityStore, AssetStore, KeyValueStore, LocationStore, MasterTemplateStore,
    QuestStateStore, SosAlertStore, UserDirectory,
};
use chrono::{SubsecRound, Utc};

/// Quest service: processes commands against a key-value store and emits events
#[derive(Debug, Clone)]
pub struct QuestEventLoop<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> QuestEventLoop<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Process a single command and return the resulting event
    pub fn handle_command(&mut self, command: QuestCommand) -> QuestEvent {
        let name = command.name();

        match self.execute(command) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("{} failed: {}", name, e);
                QuestEvent::CommandFailed {
                    command: name.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }

    fn execute(&self, command: QuestCommand) -> Result<QuestEvent> {
        let kv = &self.store;

        match command {
            QuestCommand::InitializeDefaults => {
                let quest = MasterTemplateStore::new(kv).ensure_initialized()?;
                let users = UserDirectory::new(kv).ensure_initialized()?;
                Ok(QuestEvent::DefaultsInitialized {
                    quest_title: quest.title,
                    users: users.len(),
                })
            }

            QuestCommand::PublishTemplate { quest } => {
                let report = PropagationEngine::new(kv).propagate(&quest)?;
                Ok(QuestEvent::TemplatePublished { report })
            }

            QuestCommand::StartQuest { username } => {
                if self.require_user(&username)?.is_admin() {
                    return Err(CoreError::AdminHasNoQuest(username));
                }
                let state = QuestStateStore::new(kv).read_or_create(&username)?;
                Ok(QuestEvent::QuestLoaded { username, state })
            }

            QuestCommand::ResetQuest { username } => {
                QuestStateStore::new(kv).reset(&username)?;
                Ok(QuestEvent::QuestReset { username })
            }

            QuestCommand::CompleteSubTask {
                username,
                task_id,
                subtask_id,
                completed,
            } => {
                self.update_state(&username, |state| {
                    state.complete_subtask(&task_id, &subtask_id, completed)
                })?;
                Ok(QuestEvent::SubTaskUpdated {
                    username,
                    task_id,
                    subtask_id,
                    completed,
                })
            }

            QuestCommand::AnswerRiddle {
                username,
                task_id,
                subtask_id,
                answer,
            } => {
                let correct = self.update_state(&username, |state| {
                    state.answer_riddle(&task_id, &subtask_id, &answer)
                })?;
                Ok(QuestEvent::RiddleAnswered {
                    username,
                    subtask_id,
                    correct,
                })
            }

            QuestCommand::CompleteCurrentTask { username, location } => {
                let (task_id, cursor, finished) = self.update_state(&username, |state| {
                    let task_id = state
                        .current_task()
                        .map(|t| t.id.clone())
                        .ok_or(QuestError::QuestFinished)?;
                    let cursor = state.complete_current_task(location)?;
                    Ok((task_id, cursor, state.is_finished()))
                })?;
                Ok(QuestEvent::TaskCompleted {
                    username,
                    task_id,
                    cursor,
                    finished,
                })
            }

            QuestCommand::DismissNotification {
                username,
                notification_id,
            } => {
                self.update_state(&username, |state| {
                    state.dismiss_notification(&notification_id)
                })?;
                Ok(QuestEvent::NotificationDismissed {
                    username,
                    notification_id,
                })
            }

            QuestCommand::UnlockTask { username, index } => {
                self.update_state(&username, |state| state.unlock_task(index))?;
                tracing::info!("Cursor for {} moved to task {}", username, index);
                Ok(QuestEvent::TaskUnlocked { username, index })
            }

            QuestCommand::UnlockSubTask {
                username,
                task_id,
                subtask_id,
            } => {
                let changed = self.update_state(&username, |state| {
                    state.unlock_subtask(&task_id, &subtask_id)
                })?;
                Ok(QuestEvent::SubTaskUnlocked {
                    username,
                    task_id,
                    subtask_id,
                    changed,
                })
            }

            QuestCommand::SubmitUnlockRequest { request } => {
                let request = UnlockReview::new(kv).submit(request)?;
                Ok(QuestEvent::UnlockRequestSubmitted { request })
            }

            QuestCommand::ApproveUnlockRequest { request_id } => {
                let outcome = UnlockReview::new(kv).approve(&request_id)?;
                Ok(QuestEvent::UnlockRequestReviewed { outcome })
            }

            QuestCommand::RejectUnlockRequest { request_id } => {
                let outcome = UnlockReview::new(kv).reject(&request_id)?;
                Ok(QuestEvent::UnlockRequestReviewed { outcome })
            }

            QuestCommand::AddUser { user } => {
                let user = UserDirectory::new(kv).add(user)?;
                Ok(QuestEvent::UserAdded { user })
            }

            QuestCommand::UpdateUser { username, changes } => {
                let user = UserDirectory::new(kv).edit(&username, changes)?;
                Ok(QuestEvent::UserUpdated { user })
            }

            QuestCommand::SoftDeleteUser { username } => {
                UserDirectory::new(kv).soft_delete(&username)?;
                Ok(QuestEvent::UserDeleted { username })
            }

            QuestCommand::RestoreUser { username } => {
                UserDirectory::new(kv).restore(&username)?;
                Ok(QuestEvent::UserRestored { username })
            }

            QuestCommand::RemoveUser { username } => {
                let user = UserDirectory::new(kv).remove(&username)?;
                Ok(QuestEvent::UserRemoved { user })
            }

            QuestCommand::Authenticate { master_key } => {
                let user = UserDirectory::new(kv)
                    .authenticate(&master_key)?
                    .ok_or(CoreError::InvalidMasterKey)?;
                Ok(QuestEvent::Authenticated { user })
            }

            QuestCommand::RecordActivity { username, data } => {
                self.require_user(&username)?;
                ActivityStore::new(kv).write(&username, &data)?;
                Ok(QuestEvent::ActivityRecorded { username })
            }

            QuestCommand::RecordLocation { username, location } => {
                self.require_user(&username)?;
                let fix = LocationFix::new(location, Utc::now().trunc_subsecs(3));
                LocationStore::new(kv).write(&username, &fix)?;
                Ok(QuestEvent::LocationRecorded { username, fix })
            }

            QuestCommand::SendSosAlert { username, location } => {
                let user = self.require_user(&username)?;
                let alert = SosAlert::raise(&user, location);
                SosAlertStore::new(kv).add(alert.clone())?;
                tracing::warn!(
                    "SOS from {} at {:.5},{:.5}",
                    username,
                    location.latitude,
                    location.longitude
                );
                Ok(QuestEvent::SosAlertRaised { alert })
            }

            QuestCommand::SaveAsset { asset } => {
                self.require_user(&asset.user_id)?;
                let asset = UserAsset::captured(asset);
                AssetStore::new(kv).add(asset.clone())?;
                tracing::debug!("Saved asset {} for {}", asset.id, asset.user_id);
                Ok(QuestEvent::AssetSaved { asset })
            }
        }
    }

    /// Apply a change to a stored quest state; nothing is written on error
    fn update_state<T>(
        &self,
        username: &str,
        apply: impl FnOnce(&mut QuestState) -> std::result::Result<T, QuestError>,
    ) -> Result<T> {
        let states = QuestStateStore::new(&self.store);
        let mut state = states
            .read(username)?
            .ok_or_else(|| CoreError::QuestStateNotFound(username.to_string()))?;

        let value = apply(&mut state)?;
        states.write(username, &state)?;
        Ok(value)
    }

    fn require_user(&self, username: &str) -> Result<User> {
        UserDirectory::new(&self.store)
            .get(username)?
            .ok_or_else(|| CoreError::UserNotFound(username.to_string()))
    }
}

impl<S: KeyValueStore + Default> Default for QuestEventLoop<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
