use crate::domain::SubTaskId;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const APPROVED_MESSAGE: &str = "This task has been manually unlocked for you by a Game \
                                Administrator based on your request.";
const REJECTED_MESSAGE: &str = "Your unlock request has been reviewed. Please study the task \
                                requirements again and re-attempt.";

/// Outcome of an administrator's review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Approved,
    Rejected,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Approved => write!(f, "approved"),
            NotificationKind::Rejected => write!(f, "rejected"),
        }
    }
}

/// Message shown to a player next to the sub-task it concerns, until dismissed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockNotification {
    pub id: String,
    pub subtask_id: SubTaskId,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

impl UnlockNotification {
    pub fn approved(subtask_id: impl Into<SubTaskId>) -> Self {
        Self {
            id: format!("notif-approve-{}", Uuid::new_v4()),
            subtask_id: subtask_id.into(),
            message: APPROVED_MESSAGE.to_string(),
            kind: NotificationKind::Approved,
        }
    }

    pub fn rejected(subtask_id: impl Into<SubTaskId>) -> Self {
        Self {
            id: format!("notif-reject-{}", Uuid::new_v4()),
            subtask_id: subtask_id.into(),
            message: REJECTED_MESSAGE.to_string(),
            kind: NotificationKind::Rejected,
        }
    }
}
