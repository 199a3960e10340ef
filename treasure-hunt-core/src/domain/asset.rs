use crate::domain::{GeoPoint, SubTaskId, TaskId};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Photo or screenshot a player captured for a sub-task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAsset {
    pub id: String,

    pub user_id: String,

    pub task_id: TaskId,

    pub subtask_id: SubTaskId,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,

    /// Image encoded as a `data:` URL
    pub image_data_url: String,

    #[serde(default)]
    pub location: Option<GeoPoint>,
}

/// Capture submitted by a player
#[derive(Debug, Clone, PartialEq)]
pub struct NewUserAsset {
    pub user_id: String,
    pub task_id: TaskId,
    pub subtask_id: SubTaskId,
    pub image_data_url: String,
    pub location: Option<GeoPoint>,
}

impl UserAsset {
    pub fn captured(asset: NewUserAsset) -> Self {
        let timestamp = Utc::now().trunc_subsecs(3);
        Self {
            id: format!(
                "asset-{}-{}-{}",
                asset.user_id,
                asset.subtask_id,
                timestamp.timestamp_millis()
            ),
            user_id: asset.user_id,
            task_id: asset.task_id,
            subtask_id: asset.subtask_id,
            timestamp,
            image_data_url: asset.image_data_url,
            location: asset.location,
        }
    }
}
