use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Role within the game - administrators have no quest state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "user")]
    Player,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::Player => write!(f, "Player"),
        }
    }
}

/// Kind of identity document a player registered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdType {
    #[serde(rename = "id")]
    NationalId,
    #[serde(rename = "passport")]
    Passport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
    #[serde(rename = "Prefer not to say")]
    Undisclosed,
}

/// Someone hunting together with the registered player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_type: Option<IdType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,

    /// cm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    /// kg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Registration details collected by the player client.
///
/// Every field is optional: administrators and users created here start
/// without a profile, and absent fields stay absent when written back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_type: Option<IdType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// cm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    /// kg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_member_details: Option<Vec<GroupMember>>,
}

/// Registered user of the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique, lower-cased login name
    pub username: String,

    pub role: Role,

    /// Shared secret used to log in
    pub master_key: String,

    pub first_name: String,

    pub last_name: String,

    #[serde(default)]
    pub is_deleted: bool,

    #[serde(flatten)]
    pub profile: UserProfile,

    /// Fields written by other clients, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    pub fn is_player(&self) -> bool {
        matches!(self.role, Role::Player)
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub(crate) fn defaults() -> Vec<User> {
        vec![
            User {
                username: "admin".to_string(),
                role: Role::Admin,
                master_key: "admin.001".to_string(),
                first_name: "Admin".to_string(),
                last_name: "User".to_string(),
                is_deleted: false,
                profile: UserProfile::default(),
                extra: Map::new(),
            },
            User {
                username: "adventurer".to_string(),
                role: Role::Player,
                master_key: "adventurer.001".to_string(),
                first_name: "Brave".to_string(),
                last_name: "Adventurer".to_string(),
                is_deleted: false,
                profile: UserProfile::default(),
                extra: Map::new(),
            },
        ]
    }
}

/// Registration data for a new player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub master_key: String,
    pub first_name: String,
    pub last_name: String,
}

/// Edits to an existing user; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub master_key: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile: Option<UserProfile>,
}
