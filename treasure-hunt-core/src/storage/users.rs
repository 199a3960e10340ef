use crate::domain::{NewUser, Role, User, UserChanges, UserProfile};
use crate::storage::{JsonStoreExt, KeyValueStore, QuestStateStore, StorageError};

pub const USERS_KEY: &str = "treasure-hunt-users";

/// Errors from user directory operations
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("First and last name are required")]
    MissingName,

    #[error("Master key cannot be empty")]
    EmptyMasterKey,

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("Master key already in use")]
    DuplicateMasterKey,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Administrators cannot be deleted")]
    CannotDeleteAdmin,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Registered users, persisted as a single list
pub struct UserDirectory<'a, S: KeyValueStore + ?Sized> {
    kv: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> UserDirectory<'a, S> {
    pub fn new(kv: &'a S) -> Self {
        Self { kv }
    }

    /// Seed the default administrator and player when no directory exists
    pub fn ensure_initialized(&self) -> Result<Vec<User>, StorageError> {
        if let Some(users) = self.kv.load_json::<Vec<User>>(USERS_KEY)? {
            return Ok(users);
        }

        let users = User::defaults();
        self.save(&users)?;
        tracing::info!("Seeded {} default users", users.len());
        Ok(users)
    }

    pub fn list(&self) -> Result<Vec<User>, StorageError> {
        Ok(self.kv.load_json(USERS_KEY)?.unwrap_or_default())
    }

    /// Every non-administrator, soft-deleted ones included
    pub fn players(&self) -> Result<Vec<User>, StorageError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|u| u.role == Role::Player)
            .collect())
    }

    pub fn get(&self, username: &str) -> Result<Option<User>, StorageError> {
        Ok(self.list()?.into_iter().find(|u| u.username == username))
    }

    /// Register a player and hand them a fresh quest
    pub fn add(&self, new_user: NewUser) -> Result<User, DirectoryError> {
        let username = new_user.username.trim().to_lowercase();
        let master_key = new_user.master_key.trim().to_string();
        let first_name = new_user.first_name.trim().to_string();
        let last_name = new_user.last_name.trim().to_string();

        if username.is_empty() {
            return Err(DirectoryError::EmptyUsername);
        }
        if first_name.is_empty() || last_name.is_empty() {
            return Err(DirectoryError::MissingName);
        }
        if master_key.is_empty() {
            return Err(DirectoryError::EmptyMasterKey);
        }

        let mut users = self.list()?;
        if users.iter().any(|u| u.username == username) {
            return Err(DirectoryError::DuplicateUsername(username));
        }
        if users.iter().any(|u| u.master_key == master_key) {
            return Err(DirectoryError::DuplicateMasterKey);
        }

        let user = User {
            username,
            role: Role::Player,
            master_key,
            first_name,
            last_name,
            is_deleted: false,
            profile: UserProfile::default(),
            extra: Default::default(),
        };
        users.push(user.clone());
        self.save(&users)?;

        QuestStateStore::new(self.kv).create_fresh(&user.username)?;
        tracing::info!("Registered player {}", user.username);
        Ok(user)
    }

    /// Change a user's names, master key or profile. The username and role
    /// never change; the master key must stay unique among other users.
    pub fn edit(&self, username: &str, changes: UserChanges) -> Result<User, DirectoryError> {
        let mut users = self.list()?;

        if let Some(key) = &changes.master_key {
            let key = key.trim();
            if key.is_empty() {
                return Err(DirectoryError::EmptyMasterKey);
            }
            if users
                .iter()
                .any(|u| u.username != username && u.master_key == key)
            {
                return Err(DirectoryError::DuplicateMasterKey);
            }
        }

        let user = users
            .iter_mut()
            .find(|u| u.username == username)
            .ok_or_else(|| DirectoryError::UserNotFound(username.to_string()))?;

        if let Some(key) = changes.master_key {
            user.master_key = key.trim().to_string();
        }
        if let Some(first_name) = changes.first_name {
            user.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = changes.last_name {
            user.last_name = last_name.trim().to_string();
        }
        if user.first_name.is_empty() || user.last_name.is_empty() {
            return Err(DirectoryError::MissingName);
        }
        if let Some(profile) = changes.profile {
            user.profile = profile;
        }

        let updated = user.clone();
        self.save(&users)?;
        tracing::info!("Updated user {}", username);
        Ok(updated)
    }

    /// Hide a player without losing their data
    pub fn soft_delete(&self, username: &str) -> Result<(), DirectoryError> {
        self.update(username, |user| {
            if user.is_admin() {
                return Err(DirectoryError::CannotDeleteAdmin);
            }
            user.is_deleted = true;
            Ok(())
        })
    }

    pub fn restore(&self, username: &str) -> Result<(), DirectoryError> {
        self.update(username, |user| {
            user.is_deleted = false;
            Ok(())
        })
    }

    /// Remove a player from the directory for good
    pub fn remove(&self, username: &str) -> Result<User, DirectoryError> {
        let mut users = self.list()?;
        let index = users
            .iter()
            .position(|u| u.username == username)
            .ok_or_else(|| DirectoryError::UserNotFound(username.to_string()))?;

        if users[index].is_admin() {
            return Err(DirectoryError::CannotDeleteAdmin);
        }

        let removed = users.remove(index);
        self.save(&users)?;
        Ok(removed)
    }

    /// Log in by shared secret; soft-deleted users are refused
    pub fn authenticate(&self, master_key: &str) -> Result<Option<User>, StorageError> {
        let master_key = master_key.trim();
        Ok(self
            .list()?
            .into_iter()
            .find(|u| !u.is_deleted && u.master_key == master_key))
    }

    fn update(
        &self,
        username: &str,
        apply: impl FnOnce(&mut User) -> Result<(), DirectoryError>,
    ) -> Result<(), DirectoryError> {
        let mut users = self.list()?;
        let user = users
            .iter_mut()
            .find(|u| u.username == username)
            .ok_or_else(|| DirectoryError::UserNotFound(username.to_string()))?;

        apply(user)?;
        self.save(&users)?;
        Ok(())
    }

    fn save(&self, users: &[User]) -> Result<(), StorageError> {
        self.kv.save_json(USERS_KEY, users)
    }
}
