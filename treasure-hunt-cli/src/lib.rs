pub mod application;
pub mod cli;
pub mod infrastructure;
pub mod presentation;

pub use application::Runner;
pub use cli::Cli;
pub use infrastructure::{CliError, FileStore, LogConfig, Result};
