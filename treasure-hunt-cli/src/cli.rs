use crate::infrastructure::CliError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use treasure_hunt_core::GeoPoint;

#[derive(Parser, Debug)]
#[command(name = "treasure-cli")]
#[command(
    version,
    about = "Treasure Hunt CLI - manage the master quest, players and unlock requests"
)]
pub struct Cli {
    /// Directory holding the JSON data files
    #[arg(
        short = 'd',
        long,
        env = "TREASURE_HUNT_DATA_DIR",
        default_value = "treasure-hunt-data"
    )]
    pub data_dir: PathBuf,

    /// Debug-level logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, env = "TREASURE_HUNT_LOG_JSON", global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Seed the default master quest and users
    Init,

    /// Inspect or replace the master quest
    #[command(subcommand)]
    Template(TemplateCommand),

    /// Play or administer a player's quest
    #[command(subcommand)]
    Player(PlayerCommand),

    /// Submit and review unlock requests
    #[command(subcommand)]
    Unlock(UnlockCommand),

    /// Manage registered users
    #[command(subcommand)]
    Users(UsersCommand),

    /// Admin console views: live map, SOS alerts, captured photos
    #[command(subcommand)]
    Monitor(MonitorCommand),
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum TemplateCommand {
    /// Print the master quest
    Show {
        #[arg(long)]
        json: bool,
    },

    /// Replace the master quest from a JSON file and sync every player
    Publish { file: PathBuf },

    /// Print the JSON schema of a quest file
    Schema,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    /// Load the player's quest, creating it if needed
    Start { username: String },

    Show {
        username: String,

        #[arg(long)]
        json: bool,
    },

    /// Discard quest progress and activity data
    Reset { username: String },

    CompleteSubtask {
        username: String,
        task_id: String,
        subtask_id: String,

        /// Mark as not done instead
        #[arg(long)]
        undo: bool,
    },

    /// Answer a riddle sub-task
    Answer {
        username: String,
        task_id: String,
        subtask_id: String,
        answer: String,
    },

    /// Complete the current task and move on
    CompleteTask {
        username: String,

        /// Where the player stands, as <latitude>,<longitude>
        #[arg(long, value_parser = parse_location, allow_hyphen_values = true)]
        location: Option<GeoPoint>,
    },

    /// Dismiss an unlock notification
    Dismiss {
        username: String,
        notification_id: String,
    },

    /// Move the player's cursor to a task index
    UnlockTask { username: String, index: usize },

    /// Force-complete a sub-task
    UnlockSubtask {
        username: String,
        task_id: String,
        subtask_id: String,
    },

    /// Print the player's distance and effort record
    Activity { username: String },

    /// Replace the activity record from a JSON file
    RecordActivity { username: String, file: PathBuf },

    /// Report the player's position, as <latitude>,<longitude>
    Locate {
        username: String,

        #[arg(value_parser = parse_location, allow_hyphen_values = true)]
        location: GeoPoint,
    },

    /// Raise an emergency alert at the given position
    Sos {
        username: String,

        #[arg(value_parser = parse_location, allow_hyphen_values = true)]
        location: GeoPoint,
    },

    /// Store a photo captured for a sub-task
    Capture {
        username: String,
        task_id: String,
        subtask_id: String,

        /// Image as a data: URL
        #[arg(long)]
        image: String,

        #[arg(long, value_parser = parse_location, allow_hyphen_values = true)]
        location: Option<GeoPoint>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum UnlockCommand {
    /// Ask an administrator to unlock a task or sub-task
    Request {
        username: String,
        task_id: String,

        #[arg(long)]
        subtask: Option<String>,

        #[arg(long)]
        reason: String,
    },

    /// List requests, newest first
    List {
        #[arg(long)]
        pending: bool,
    },

    Approve { request_id: String },

    Reject { request_id: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum UsersCommand {
    List,

    Add(AddUserArgs),

    /// Change names, master key or contact details
    Update(UpdateUserArgs),

    /// Soft-delete a player (or remove for good with --purge)
    Delete {
        username: String,

        #[arg(long)]
        purge: bool,
    },

    Restore { username: String },

    /// Look up the user owning a master key
    Login { master_key: String },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct AddUserArgs {
    pub username: String,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub master_key: String,
}

#[derive(Args, Debug, Clone, PartialEq, Default)]
pub struct UpdateUserArgs {
    pub username: String,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub master_key: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub mobile_number: Option<String>,

    #[arg(long)]
    pub address: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum MonitorCommand {
    /// Last known position of every active player
    Map,

    /// SOS alerts, newest first
    Alerts,

    /// Photos a player captured, newest first
    Assets { username: String },
}

pub fn parse_location(value: &str) -> Result<GeoPoint, CliError> {
    let invalid = || CliError::InvalidLocation(value.to_string());

    let (lat, lon) = value.split_once(',').ok_or_else(invalid)?;
    let latitude: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let longitude: f64 = lon.trim().parse().map_err(|_| invalid())?;

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(invalid());
    }
    Ok(GeoPoint::new(latitude, longitude))
}
