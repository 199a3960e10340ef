pub mod error;
pub mod file_store;
pub mod observability;

pub use error::{CliError, Result};
pub use file_store::FileStore;
pub use observability::LogConfig;
