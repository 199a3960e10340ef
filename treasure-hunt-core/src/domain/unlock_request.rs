use crate::domain::{SubTaskId, TaskId};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Review state of an unlock request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnlockRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for UnlockRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnlockRequestStatus::Pending => write!(f, "Pending"),
            UnlockRequestStatus::Approved => write!(f, "Approved"),
            UnlockRequestStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

/// A player's plea to have a task or sub-task unlocked by an administrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockRequest {
    pub id: String,

    /// Username of the requesting player
    pub user_id: String,

    /// Same as `user_id`; older clients read this one
    #[serde(default)]
    pub username: String,

    pub first_name: String,

    pub last_name: String,

    pub task_id: TaskId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtask_id: Option<SubTaskId>,

    pub task_title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtask_description: Option<String>,

    pub reason: String,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,

    pub status: UnlockRequestStatus,
}

/// Data a player supplies when asking for an unlock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUnlockRequest {
    pub user_id: String,
    pub task_id: TaskId,
    pub subtask_id: Option<SubTaskId>,
    pub reason: String,
}

impl UnlockRequest {
    pub(crate) fn pending(
        request: NewUnlockRequest,
        first_name: String,
        last_name: String,
        task_title: String,
        subtask_description: Option<String>,
    ) -> Self {
        Self {
            id: format!("unlock-req-{}", Uuid::new_v4()),
            username: request.user_id.clone(),
            user_id: request.user_id,
            first_name,
            last_name,
            task_id: request.task_id,
            subtask_id: request.subtask_id,
            task_title,
            subtask_description,
            reason: request.reason,
            // Stored with millisecond precision
            timestamp: Utc::now().trunc_subsecs(3),
            status: UnlockRequestStatus::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == UnlockRequestStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> UnlockRequest {
        UnlockRequest::pending(
            NewUnlockRequest {
                user_id: "adventurer".to_string(),
                task_id: "task-default-2".to_string(),
                subtask_id: Some("subtask-default-2-1".to_string()),
                reason: "Camera is broken".to_string(),
            },
            "Brave".to_string(),
            "Adventurer".to_string(),
            "The Sunken Stone".to_string(),
            Some("Take a photo".to_string()),
        )
    }

    #[test]
    fn test_new_request_is_pending() {
        let request = request();

        assert!(request.is_pending());
        assert!(request.id.starts_with("unlock-req-"));
        assert_eq!(request.status.to_string(), "Pending");
    }

    #[test]
    fn test_wire_format() {
        let request = request();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["userId"], "adventurer");
        assert_eq!(json["username"], "adventurer");
        assert_eq!(json["status"], "Pending");
        assert!(json["timestamp"].is_i64());
    }

    #[test]
    fn test_task_level_request_omits_subtask() {
        let mut request = request();
        request.subtask_id = None;
        request.subtask_description = None;

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("subtaskId").is_none());

        let back: UnlockRequest = serde_json::from_value(json).unwrap();
        assert_eq!(back.subtask_id, None);
    }
}
