use crate::domain::{GeoPoint, User};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A player counts as active while their last fix is younger than this
pub const ACTIVE_THRESHOLD_SECONDS: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Active,
    Offline,
}

impl fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresenceStatus::Active => write!(f, "active"),
            PresenceStatus::Offline => write!(f, "offline"),
        }
    }
}

/// Last reported position of a player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl LocationFix {
    pub fn new(point: GeoPoint, timestamp: DateTime<Utc>) -> Self {
        Self {
            latitude: point.latitude,
            longitude: point.longitude,
            timestamp,
        }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> PresenceStatus {
        if now - self.timestamp < Duration::seconds(ACTIVE_THRESHOLD_SECONDS) {
            PresenceStatus::Active
        } else {
            PresenceStatus::Offline
        }
    }
}

/// A player's position as shown on the live map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLocation {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub latitude: f64,
    pub longitude: f64,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,

    pub status: PresenceStatus,
}

impl PlayerLocation {
    pub fn from_fix(user: &User, fix: &LocationFix, now: DateTime<Utc>) -> Self {
        Self {
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            latitude: fix.latitude,
            longitude: fix.longitude,
            timestamp: fix.timestamp,
            status: fix.status_at(now),
        }
    }
}
