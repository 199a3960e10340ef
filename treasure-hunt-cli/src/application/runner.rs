use crate::cli::{
    Command, MonitorCommand, PlayerCommand, TemplateCommand, UnlockCommand, UpdateUserArgs,
    UsersCommand,
};
use crate::infrastructure::{CliError, Result};
use crate::presentation::render;
use std::fs;
use std::path::Path;
use tracing::info;
use treasure_hunt_core::{
    ActivityData, ActivityStore, AssetStore, CoreError, KeyValueStore, LocationStore,
    MasterTemplateStore, NewUnlockRequest, NewUser, NewUserAsset, Quest, QuestCommand,
    QuestEvent, QuestEventLoop, QuestStateStore, SosAlertStore, UnlockRequestStore,
    UserChanges, UserDirectory,
};

/// Executes parsed CLI commands against a store and returns the text to print
pub struct Runner<S: KeyValueStore> {
    service: QuestEventLoop<S>,
}

impl<S: KeyValueStore> Runner<S> {
    pub fn new(store: S) -> Self {
        Self {
            service: QuestEventLoop::new(store),
        }
    }

    pub fn store(&self) -> &S {
        self.service.store()
    }

    pub fn run(&mut self, command: Command) -> Result<String> {
        match command {
            Command::Init => self.init(),
            Command::Template(command) => self.template(command),
            Command::Player(command) => self.player(command),
            Command::Unlock(command) => self.unlock(command),
            Command::Users(command) => self.users(command),
            Command::Monitor(command) => self.monitor(command),
        }
    }

    /// Run a service command, turning `CommandFailed` into an error
    fn dispatch(&mut self, command: QuestCommand) -> Result<QuestEvent> {
        match self.service.handle_command(command) {
            QuestEvent::CommandFailed { command, reason } => {
                Err(CliError::CommandFailed { command, reason })
            }
            event => Ok(event),
        }
    }

    fn init(&mut self) -> Result<String> {
        match self.dispatch(QuestCommand::InitializeDefaults)? {
            QuestEvent::DefaultsInitialized { quest_title, users } => Ok(format!(
                "Master quest: {}\nUsers: {}",
                quest_title, users
            )),
            event => Ok(format!("{:?}", event)),
        }
    }

    fn template(&mut self, command: TemplateCommand) -> Result<String> {
        match command {
            TemplateCommand::Show { json } => {
                let quest = MasterTemplateStore::new(self.store()).ensure_initialized()?;
                if json {
                    Ok(serde_json::to_string_pretty(&quest)?)
                } else {
                    Ok(render::quest(&quest))
                }
            }

            TemplateCommand::Publish { file } => {
                let quest = read_quest_file(&file)?;
                info!("Publishing {} ({} tasks)", file.display(), quest.tasks.len());

                match self.dispatch(QuestCommand::PublishTemplate { quest })? {
                    QuestEvent::TemplatePublished { report } => Ok(render::propagation(&report)),
                    event => Ok(format!("{:?}", event)),
                }
            }

            TemplateCommand::Schema => {
                let schema = schemars::schema_for!(Quest);
                Ok(serde_json::to_string_pretty(&schema)?)
            }
        }
    }

    fn player(&mut self, command: PlayerCommand) -> Result<String> {
        let event = match command {
            PlayerCommand::Show { username, json } => {
                let state = QuestStateStore::new(self.store())
                    .read(&username)?
                    .ok_or_else(|| CoreError::QuestStateNotFound(username.clone()))?;
                return if json {
                    Ok(serde_json::to_string_pretty(&state)?)
                } else {
                    Ok(render::quest_state(&username, &state))
                };
            }

            PlayerCommand::Start { username } => {
                self.dispatch(QuestCommand::StartQuest { username })?
            }

            PlayerCommand::Reset { username } => {
                self.dispatch(QuestCommand::ResetQuest { username })?
            }

            PlayerCommand::CompleteSubtask {
                username,
                task_id,
                subtask_id,
                undo,
            } => self.dispatch(QuestCommand::CompleteSubTask {
                username,
                task_id,
                subtask_id,
                completed: !undo,
            })?,

            PlayerCommand::Answer {
                username,
                task_id,
                subtask_id,
                answer,
            } => self.dispatch(QuestCommand::AnswerRiddle {
                username,
                task_id,
                subtask_id,
                answer,
            })?,

            PlayerCommand::CompleteTask { username, location } => {
                self.dispatch(QuestCommand::CompleteCurrentTask { username, location })?
            }

            PlayerCommand::Dismiss {
                username,
                notification_id,
            } => self.dispatch(QuestCommand::DismissNotification {
                username,
                notification_id,
            })?,

            PlayerCommand::UnlockTask { username, index } => {
                self.dispatch(QuestCommand::UnlockTask { username, index })?
            }

            PlayerCommand::UnlockSubtask {
                username,
                task_id,
                subtask_id,
            } => self.dispatch(QuestCommand::UnlockSubTask {
                username,
                task_id,
                subtask_id,
            })?,

            PlayerCommand::Activity { username } => {
                let data = ActivityStore::new(self.store()).read(&username)?;
                return Ok(render::activity(&username, &data));
            }

            PlayerCommand::RecordActivity { username, file } => {
                let data = read_activity_file(&file)?;
                self.dispatch(QuestCommand::RecordActivity { username, data })?
            }

            PlayerCommand::Locate { username, location } => {
                self.dispatch(QuestCommand::RecordLocation { username, location })?
            }

            PlayerCommand::Sos { username, location } => {
                self.dispatch(QuestCommand::SendSosAlert { username, location })?
            }

            PlayerCommand::Capture {
                username,
                task_id,
                subtask_id,
                image,
                location,
            } => self.dispatch(QuestCommand::SaveAsset {
                asset: NewUserAsset {
                    user_id: username,
                    task_id,
                    subtask_id,
                    image_data_url: image,
                    location,
                },
            })?,
        };

        Ok(describe(event))
    }

    fn unlock(&mut self, command: UnlockCommand) -> Result<String> {
        let event = match command {
            UnlockCommand::List { pending } => {
                let store = UnlockRequestStore::new(self.store());
                let requests = if pending {
                    store.pending()?
                } else {
                    store.list()?
                };
                if requests.is_empty() {
                    return Ok("No unlock requests".to_string());
                }
                let lines: Vec<String> = requests.iter().map(render::unlock_request).collect();
                return Ok(lines.join("\n"));
            }

            UnlockCommand::Request {
                username,
                task_id,
                subtask,
                reason,
            } => self.dispatch(QuestCommand::SubmitUnlockRequest {
                request: NewUnlockRequest {
                    user_id: username,
                    task_id,
                    subtask_id: subtask,
                    reason,
                },
            })?,

            UnlockCommand::Approve { request_id } => {
                self.dispatch(QuestCommand::ApproveUnlockRequest { request_id })?
            }

            UnlockCommand::Reject { request_id } => {
                self.dispatch(QuestCommand::RejectUnlockRequest { request_id })?
            }
        };

        Ok(describe(event))
    }

    fn users(&mut self, command: UsersCommand) -> Result<String> {
        let event = match command {
            UsersCommand::List => {
                let users = UserDirectory::new(self.store()).ensure_initialized()?;
                let lines: Vec<String> = users.iter().map(render::user).collect();
                return Ok(lines.join("\n"));
            }

            UsersCommand::Add(args) => self.dispatch(QuestCommand::AddUser {
                user: NewUser {
                    username: args.username,
                    master_key: args.master_key,
                    first_name: args.first_name,
                    last_name: args.last_name,
                },
            })?,

            UsersCommand::Update(args) => {
                let changes = self.user_changes(&args)?;
                self.dispatch(QuestCommand::UpdateUser {
                    username: args.username,
                    changes,
                })?
            }

            UsersCommand::Delete { username, purge } => {
                if purge {
                    self.dispatch(QuestCommand::RemoveUser { username })?
                } else {
                    self.dispatch(QuestCommand::SoftDeleteUser { username })?
                }
            }

            UsersCommand::Restore { username } => {
                self.dispatch(QuestCommand::RestoreUser { username })?
            }

            UsersCommand::Login { master_key } => {
                self.dispatch(QuestCommand::Authenticate { master_key })?
            }
        };

        Ok(describe(event))
    }

    fn monitor(&mut self, command: MonitorCommand) -> Result<String> {
        let lines: Vec<String> = match command {
            MonitorCommand::Map => LocationStore::new(self.store())
                .players()?
                .iter()
                .map(render::player_location)
                .collect(),

            MonitorCommand::Alerts => SosAlertStore::new(self.store())
                .list()?
                .iter()
                .map(render::sos_alert)
                .collect(),

            MonitorCommand::Assets { username } => AssetStore::new(self.store())
                .for_user(&username)?
                .iter()
                .map(render::asset)
                .collect(),
        };

        if lines.is_empty() {
            return Ok("Nothing to show".to_string());
        }
        Ok(lines.join("\n"))
    }

    /// Contact flags edit the stored profile; other profile fields are kept
    fn user_changes(&self, args: &UpdateUserArgs) -> Result<UserChanges> {
        let touches_profile =
            args.email.is_some() || args.mobile_number.is_some() || args.address.is_some();

        let profile = if touches_profile {
            let user = UserDirectory::new(self.store())
                .get(&args.username)?
                .ok_or_else(|| CoreError::UserNotFound(args.username.clone()))?;
            let mut profile = user.profile;
            if let Some(email) = &args.email {
                profile.email = Some(email.clone());
            }
            if let Some(mobile_number) = &args.mobile_number {
                profile.mobile_number = Some(mobile_number.clone());
            }
            if let Some(address) = &args.address {
                profile.address = Some(address.clone());
            }
            Some(profile)
        } else {
            None
        };

        Ok(UserChanges {
            master_key: args.master_key.clone(),
            first_name: args.first_name.clone(),
            last_name: args.last_name.clone(),
            profile,
        })
    }
}

fn read_quest_file(path: &Path) -> Result<Quest> {
    if !path.is_file() {
        return Err(CliError::quest_file_not_found(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn read_activity_file(path: &Path) -> Result<ActivityData> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// One-line summary of a successful event
fn describe(event: QuestEvent) -> String {
    match event {
        QuestEvent::QuestLoaded { username, state } => render::quest_state(&username, &state),
        QuestEvent::QuestReset { username } => format!("Quest reset for {}", username),
        QuestEvent::SubTaskUpdated {
            username,
            subtask_id,
            completed,
            ..
        } => format!(
            "{}: {} marked {}",
            username,
            subtask_id,
            if completed { "done" } else { "not done" }
        ),
        QuestEvent::RiddleAnswered {
            username,
            subtask_id,
            correct,
        } => {
            if correct {
                format!("{}: correct! {} solved", username, subtask_id)
            } else {
                format!("{}: not quite, try again", username)
            }
        }
        QuestEvent::TaskCompleted {
            username,
            task_id,
            cursor,
            finished,
        } => {
            if finished {
                format!("{}: {} complete, quest finished!", username, task_id)
            } else {
                format!("{}: {} complete, now on task {}", username, task_id, cursor + 1)
            }
        }
        QuestEvent::NotificationDismissed {
            username,
            notification_id,
        } => format!("{}: dismissed {}", username, notification_id),
        QuestEvent::TaskUnlocked { username, index } => {
            format!("{}: cursor moved to task index {}", username, index)
        }
        QuestEvent::SubTaskUnlocked {
            username,
            subtask_id,
            changed,
            ..
        } => {
            if changed {
                format!("{}: {} unlocked", username, subtask_id)
            } else {
                format!("{}: {} was already complete", username, subtask_id)
            }
        }
        QuestEvent::UnlockRequestSubmitted { request } => {
            format!("Submitted {}", render::unlock_request(&request))
        }
        QuestEvent::UnlockRequestReviewed { outcome } => {
            render::unlock_request(&outcome.request)
        }
        QuestEvent::UserAdded { user } => format!("Added {}", render::user(&user)),
        QuestEvent::UserUpdated { user } => format!("Updated {}", render::user(&user)),
        QuestEvent::ActivityRecorded { username } => format!("Activity recorded for {}", username),
        QuestEvent::LocationRecorded { username, fix } => format!(
            "{}: at {:.5},{:.5}",
            username, fix.latitude, fix.longitude
        ),
        QuestEvent::SosAlertRaised { alert } => format!("SOS sent: {}", render::sos_alert(&alert)),
        QuestEvent::AssetSaved { asset } => format!("Saved {}", render::asset(&asset)),
        QuestEvent::UserDeleted { username } => format!("Deleted {}", username),
        QuestEvent::UserRestored { username } => format!("Restored {}", username),
        QuestEvent::UserRemoved { user } => format!("Removed {} for good", user.username),
        QuestEvent::Authenticated { user } => format!("Welcome, {}", user.display_name()),
        QuestEvent::TemplatePublished { report } => render::propagation(&report),
        other => format!("{:?}", other),
    }
}
