use clap::Parser;
use treasure_hunt_cli::{Cli, CliError, FileStore, LogConfig, Result, Runner};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut log_config = if cli.verbose {
        LogConfig::dev()
    } else {
        LogConfig::default()
    };
    if cli.json_logs {
        log_config = log_config.with_json();
    }
    log_config.init().map_err(CliError::Logging)?;

    let store = FileStore::open(&cli.data_dir)?;
    tracing::debug!("Using data directory {}", store.root().display());

    let output = Runner::new(store).run(cli.command)?;
    if !output.is_empty() {
        println!("{}", output.trim_end());
    }

    Ok(())
}
