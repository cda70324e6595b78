pub mod cli;
pub mod core;

use anyhow::Result;
use tracing::{debug, info};

/// Commands the library can run on behalf of the binary.
pub enum AppCommand {
    Calc { expression: String },
    Allocate,
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    match command {
        AppCommand::Calc { expression } => cli::calc::run(&expression),
        AppCommand::Allocate => {
            info!("Fund planner starting...");

            let config = match config_path {
                Some(path) => core::config::AppConfig::load_from_path(path)?,
                None => core::config::AppConfig::load()?,
            };
            debug!("Loaded config: {config:#?}");

            cli::allocate::run(&config)
        }
    }
}
