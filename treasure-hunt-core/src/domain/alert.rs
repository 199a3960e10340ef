use crate::domain::{GeoPoint, User};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Emergency call raised by a player, shown on the admin console
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SosAlert {
    pub id: String,

    pub user_id: String,

    pub username: String,

    pub first_name: String,

    pub last_name: String,

    pub location: GeoPoint,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl SosAlert {
    pub fn raise(user: &User, location: GeoPoint) -> Self {
        let timestamp = Utc::now().trunc_subsecs(3);
        Self {
            id: format!("sos-{}-{}", user.username, timestamp.timestamp_millis()),
            user_id: user.username.clone(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            location,
            timestamp,
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
