pub mod activity;
pub mod assets;
pub mod key_value;
pub mod locations;
pub mod master_template;
pub mod memory;
pub mod quest_states;
pub mod sos_alerts;
pub mod unlock_requests;
pub mod users;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use activity::ActivityStore;
pub use assets::AssetStore;
pub use key_value::{JsonStoreExt, KeyValueStore, StorageError};
pub use locations::LocationStore;
pub use master_template::MasterTemplateStore;
pub use memory::MemoryStore;
pub use quest_states::QuestStateStore;
pub use sos_alerts::SosAlertStore;
pub use unlock_requests::UnlockRequestStore;
pub use users::{DirectoryError, UserDirectory};

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::LocalStorageStore;
