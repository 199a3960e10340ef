use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Physical journey tracked while a player works through the quest.
///
/// Older stored records may lack some fields; they default to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityData {
    /// Metres travelled
    #[serde(default)]
    pub distance: f64,

    #[serde(default)]
    pub elevation_gain: f64,

    #[serde(default)]
    pub elevation_loss: f64,

    /// kcal
    #[serde(default)]
    pub calories: f64,

    /// Session start, stored as epoch milliseconds
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<DateTime<Utc>>,

    /// Seconds spent moving
    #[serde(default)]
    pub active_time: u64,

    /// Seconds spent resting
    #[serde(default)]
    pub rest_time: u64,
}

impl ActivityData {
    /// Empty record for a journey starting now
    pub fn starting_now() -> Self {
        Self {
            distance: 0.0,
            elevation_gain: 0.0,
            elevation_loss: 0.0,
            calories: 0.0,
            start_time: Some(Utc::now()),
            active_time: 0,
            rest_time: 0,
        }
    }
}
