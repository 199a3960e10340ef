use crate::domain::{
    NewUnlockRequest, QuestError, UnlockNotification, UnlockRequest, UnlockRequestStatus,
};
use crate::error::{CoreError, Result};
use crate::storage::{KeyValueStore, QuestStateStore, UnlockRequestStore, UserDirectory};
use tracing::{info, warn};

/// What a review did besides updating the request status
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewOutcome {
    pub request: UnlockRequest,

    /// Sub-task went from incomplete to complete
    pub subtask_unlocked: bool,

    pub notification: Option<UnlockNotification>,
}

/// Submitting unlock requests and acting on an administrator's verdict
pub struct UnlockReview<'a, S: KeyValueStore + ?Sized> {
    kv: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> UnlockReview<'a, S> {
    pub fn new(kv: &'a S) -> Self {
        Self { kv }
    }

    /// File a pending request, denormalizing names and titles for the review screen
    pub fn submit(&self, request: NewUnlockRequest) -> Result<UnlockRequest> {
        let user = UserDirectory::new(self.kv)
            .get(&request.user_id)?
            .ok_or_else(|| CoreError::UserNotFound(request.user_id.clone()))?;
        let state = QuestStateStore::new(self.kv)
            .read(&request.user_id)?
            .ok_or_else(|| CoreError::QuestStateNotFound(request.user_id.clone()))?;

        let task = state
            .quest
            .task(&request.task_id)
            .ok_or_else(|| QuestError::TaskNotFound(request.task_id.clone()))?;
        let subtask_description = match &request.subtask_id {
            Some(subtask_id) => Some(
                task.subtask(subtask_id)
                    .ok_or_else(|| QuestError::SubTaskNotFound {
                        task_id: task.id.clone(),
                        subtask_id: subtask_id.clone(),
                    })?
                    .description
                    .clone(),
            ),
            None => None,
        };
        let task_title = task.title.clone();

        let request = UnlockRequest::pending(
            request,
            user.first_name,
            user.last_name,
            task_title,
            subtask_description,
        );
        UnlockRequestStore::new(self.kv).add(request.clone())?;

        info!(
            "Unlock request {} submitted by {} for task {}",
            request.id, request.user_id, request.task_id
        );
        Ok(request)
    }

    /// Force-complete the requested sub-task and tell the player
    pub fn approve(&self, request_id: &str) -> Result<ReviewOutcome> {
        self.review(request_id, UnlockRequestStatus::Approved)
    }

    pub fn reject(&self, request_id: &str) -> Result<ReviewOutcome> {
        self.review(request_id, UnlockRequestStatus::Rejected)
    }

    fn review(&self, request_id: &str, verdict: UnlockRequestStatus) -> Result<ReviewOutcome> {
        let requests = UnlockRequestStore::new(self.kv);
        let request = requests
            .get(request_id)?
            .ok_or_else(|| CoreError::UnlockRequestNotFound(request_id.to_string()))?;

        let mut subtask_unlocked = false;
        let mut notification = None;

        // Task-level requests only change the status
        if let Some(subtask_id) = &request.subtask_id {
            let states = QuestStateStore::new(self.kv);
            match states.read(&request.user_id)? {
                Some(mut state) => {
                    let note = if verdict == UnlockRequestStatus::Approved {
                        // Removed content still gets its notification
                        subtask_unlocked =
                            match state.unlock_subtask(&request.task_id, subtask_id) {
                                Ok(changed) => changed,
                                Err(e) => {
                                    warn!(
                                        "Approved request {} could not unlock {} in {}: {}",
                                        request.id, subtask_id, request.task_id, e
                                    );
                                    false
                                }
                            };
                        UnlockNotification::approved(subtask_id.as_str())
                    } else {
                        UnlockNotification::rejected(subtask_id.as_str())
                    };

                    state.push_notification(note.clone());
                    states.write(&request.user_id, &state)?;
                    notification = Some(note);
                }
                None => warn!(
                    "No quest state for {}, request {} changes status only",
                    request.user_id, request.id
                ),
            }
        }

        let request = requests
            .set_status(request_id, verdict)?
            .ok_or_else(|| CoreError::UnlockRequestNotFound(request_id.to_string()))?;

        info!(
            "Unlock request {} for {} marked {}",
            request.id, request.user_id, request.status
        );
        Ok(ReviewOutcome {
            request,
            subtask_unlocked,
            notification,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NotificationKind;
    use crate::storage::MemoryStore;
    use std::sync::{Arc, Mutex};

    fn setup() -> MemoryStore {
        let kv = MemoryStore::new();
        UserDirectory::new(&kv).ensure_initialized().unwrap();
        QuestStateStore::new(&kv).create_fresh("adventurer").unwrap();
        kv
    }

    fn photo_request() -> NewUnlockRequest {
        NewUnlockRequest {
            user_id: "adventurer".to_string(),
            task_id: "task-default-2".to_string(),
            subtask_id: Some("subtask-default-2-1".to_string()),
            reason: "Camera is broken".to_string(),
        }
    }

    #[test]
    fn test_submit_fills_in_names_and_titles() {
        let kv = setup();
        let request = UnlockReview::new(&kv).submit(photo_request()).unwrap();

        assert!(request.is_pending());
        assert_eq!(request.first_name, "Brave");
        assert_eq!(request.last_name, "Adventurer");
        assert_eq!(request.task_title, "The Sunken Stone");
        assert_eq!(
            request.subtask_description.as_deref(),
            Some("Take a photo of the crescent moon symbol on the stone.")
        );
        let stored = UnlockRequestStore::new(&kv).get(&request.id).unwrap();
        assert_eq!(stored, Some(request));
    }

    #[test]
    fn test_submit_unknown_user_or_task() {
        let kv = setup();
        let review = UnlockReview::new(&kv);

        let mut unknown_user = photo_request();
        unknown_user.user_id = "ghost".to_string();
        assert!(matches!(
            review.submit(unknown_user),
            Err(CoreError::UserNotFound(_))
        ));

        let mut unknown_task = photo_request();
        unknown_task.task_id = "task-x".to_string();
        assert!(matches!(
            review.submit(unknown_task),
            Err(CoreError::Quest(QuestError::TaskNotFound(_)))
        ));
    }

    #[test]
    fn test_approve_completes_subtask_and_notifies() {
        let kv = setup();
        let review = UnlockReview::new(&kv);
        let request = review.submit(photo_request()).unwrap();

        let outcome = review.approve(&request.id).unwrap();

        assert!(outcome.subtask_unlocked);
        assert_eq!(outcome.request.status, UnlockRequestStatus::Approved);

        let state = QuestStateStore::new(&kv).read("adventurer").unwrap().unwrap();
        let task = state.quest.task("task-default-2").unwrap();
        assert!(task.subtask("subtask-default-2-1").unwrap().is_completed);
        assert_eq!(state.notifications.len(), 1);
        assert_eq!(state.notifications[0].kind, NotificationKind::Approved);
        assert_eq!(state.notifications[0].subtask_id, "subtask-default-2-1");
        // Approval does not move the cursor
        assert_eq!(state.current_task_index, 0);
    }

    #[test]
    fn test_reject_notifies_without_unlocking() {
        let kv = setup();
        let review = UnlockReview::new(&kv);
        let request = review.submit(photo_request()).unwrap();

        let outcome = review.reject(&request.id).unwrap();

        assert!(!outcome.subtask_unlocked);
        assert_eq!(outcome.request.status, UnlockRequestStatus::Rejected);

        let state = QuestStateStore::new(&kv).read("adventurer").unwrap().unwrap();
        let task = state.quest.task("task-default-2").unwrap();
        assert!(!task.subtask("subtask-default-2-1").unwrap().is_completed);
        assert_eq!(state.notifications[0].kind, NotificationKind::Rejected);
    }

    #[test]
    fn test_review_without_quest_state_only_updates_status() {
        let kv = setup();
        let review = UnlockReview::new(&kv);
        let request = review.submit(photo_request()).unwrap();
        QuestStateStore::new(&kv).reset("adventurer").unwrap();

        let outcome = review.approve(&request.id).unwrap();

        assert!(outcome.notification.is_none());
        assert_eq!(outcome.request.status, UnlockRequestStatus::Approved);
        assert!(QuestStateStore::new(&kv).read("adventurer").unwrap().is_none());
    }

    #[test]
    fn test_task_level_request_changes_status_only() {
        let kv = setup();
        let review = UnlockReview::new(&kv);
        let mut new_request = photo_request();
        new_request.subtask_id = None;
        let request = review.submit(new_request).unwrap();

        let outcome = review.approve(&request.id).unwrap();

        assert!(outcome.notification.is_none());
        let state = QuestStateStore::new(&kv).read("adventurer").unwrap().unwrap();
        assert!(state.notifications.is_empty());
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_approve_removed_subtask_still_notifies_and_logs() {
        let kv = setup();
        let review = UnlockReview::new(&kv);
        let request = review.submit(photo_request()).unwrap();

        // The sub-task disappears between request and review
        let states = QuestStateStore::new(&kv);
        let mut state = states.read("adventurer").unwrap().unwrap();
        state.quest.tasks[1].sub_tasks.retain(|s| s.id != "subtask-default-2-1");
        states.write("adventurer", &state).unwrap();

        let logs = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer({
                let logs = logs.clone();
                move || logs.clone()
            })
            .with_ansi(false)
            .finish();
        let outcome =
            tracing::subscriber::with_default(subscriber, || review.approve(&request.id)).unwrap();

        assert!(!outcome.subtask_unlocked);
        assert_eq!(outcome.request.status, UnlockRequestStatus::Approved);
        let state = states.read("adventurer").unwrap().unwrap();
        assert_eq!(state.notifications.len(), 1);
        assert_eq!(state.notifications[0].kind, NotificationKind::Approved);

        let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("WARN"), "{}", text);
        assert!(text.contains("subtask-default-2-1"), "{}", text);
        assert!(text.contains("Sub-task not found"), "{}", text);
    }

    #[test]
    fn test_review_unknown_request() {
        let kv = setup();

        assert!(matches!(
            UnlockReview::new(&kv).approve("unlock-req-missing"),
            Err(CoreError::UnlockRequestNotFound(_))
        ));
    }
}
