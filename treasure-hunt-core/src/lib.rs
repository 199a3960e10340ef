//! Treasure hunt quest engine.
//!
//! An administrator edits a single master quest; every player works on an
//! independent copy. Publishing the master merges the new definitions into
//! each player's copy without losing their progress. All state lives in a
//! string key-value store (browser `localStorage`, memory, or files).
//! Alongside the quest, the same store tracks live player positions, SOS
//! alerts and captured photos for the admin console.

pub mod application;
pub mod domain;
pub mod error;
pub mod storage;

pub use application::{
    sync_quest_state, PropagationEngine, PropagationReport, QuestCommand, QuestEvent,
    QuestEventLoop, ReviewOutcome, SyncOutcome, UnlockReview, UserSync,
};
pub use domain::{
    ActivityData, Gender, GeoPoint, GroupMember, IdType, LocationFix, NewUnlockRequest, NewUser,
    NewUserAsset, NotificationKind, PlayerLocation, PresenceStatus, Quest, QuestError,
    QuestState, Role, SosAlert, SubTask, SubTaskKind, Task, UnlockNotification, UnlockRequest,
    UnlockRequestStatus, User, UserAsset, UserChanges, UserProfile,
};
pub use error::{CoreError, Result};
pub use storage::{
    ActivityStore, AssetStore, DirectoryError, JsonStoreExt, KeyValueStore, LocationStore,
    MasterTemplateStore, MemoryStore, QuestStateStore, SosAlertStore, StorageError,
    UnlockRequestStore, UserDirectory,
};

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use storage::LocalStorageStore;
