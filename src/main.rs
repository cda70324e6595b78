use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fundplan::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fundplan::AppCommand {
    fn from(cmd: Commands) -> fundplan::AppCommand {
        match cmd {
            Commands::Calc { expression } => fundplan::AppCommand::Calc { expression },
            Commands::Allocate => fundplan::AppCommand::Allocate,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Evaluate a whitespace-separated arithmetic expression
    Calc {
        /// Expression to evaluate, e.g. "1 + 2 * 3"
        expression: String,
    },
    /// Distribute deposited funds across the configured deposit plans
    Allocate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fundplan::cli::setup::setup(),
        Some(cmd) => fundplan::run_command(cmd.into(), cli.config_path.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
