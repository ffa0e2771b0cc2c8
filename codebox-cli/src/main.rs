//! # Codebox CLI
//!
//! Command-line interface for code-executing agents.
//!
//! Usage:
//!   codebox run [--network] <task>
//!   codebox chat
//!   codebox research <task>
//!   codebox visualize [--output-dir <dir>]
//!
//! Examples:
//!   codebox run "Find all prime numbers between 100 and 150"
//!   codebox run --network "Fetch the current BTC price from a public API"
//!   codebox research "Analyze these A/B test results: A 120/2400, B 156/2350"
//!   codebox visualize --output-dir charts

mod agents;
mod commands;
mod config;

use clap::{Parser, Subcommand};
use codebox_agent::{Runner, DEFAULT_MAX_TURNS};
use codebox_error::Result;
use std::path::PathBuf;

use config::Settings;

#[derive(Parser)]
#[command(name = "codebox")]
#[command(author, version, about = "Codebox - AI agents that run code in a remote sandbox")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode - only show final answer
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Maximum model turns per agent run
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_TURNS)]
    max_turns: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single task
    Run {
        /// Let the sandbox reach the internet
        #[arg(long)]
        network: bool,

        /// The task description
        #[arg(trailing_var_arg = true, required = true)]
        task: Vec<String>,
    },
    /// Interactive chat session
    Chat,
    /// Multi-agent research on a task
    Research {
        /// The research question
        #[arg(trailing_var_arg = true, required = true)]
        task: Vec<String>,
    },
    /// Generate charts from sample sales data and download them
    Visualize {
        /// Where the CSV and the PNG charts are written
        #[arg(long, default_value = "output_charts")]
        output_dir: PathBuf,
    },
}

fn setup_log(verbose: bool) {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

async fn dispatch(cli: Cli, settings: Settings) -> Result<()> {
    let sandbox = settings.sandbox()?;
    let runner = Runner::new(settings.provider()?).with_max_turns(cli.max_turns);

    match cli.command {
        Commands::Run { network, task } => {
            let agent = agents::task_executor(&sandbox, &settings.model, network);
            commands::run_task(&runner, &agent, &task.join(" "), cli.quiet).await?;
        }
        Commands::Chat => {
            let agent = agents::chat_assistant(&sandbox, &settings.model);
            commands::chat(&runner, &agent).await?;
        }
        Commands::Research { task } => {
            commands::research(&runner, &sandbox, &settings.model, &task.join(" "), cli.quiet).await?;
        }
        Commands::Visualize { output_dir } => {
            commands::visualize(&runner, &sandbox, &settings.model, &output_dir, cli.quiet).await?;
        }
    }
    Ok(())
}

/// What to print when settings cannot be loaded.
fn config_failure_text(e: &codebox_error::Error) -> String {
    let variable = e
        .context()
        .iter()
        .find(|(key, _)| *key == "variable")
        .map(|(_, value)| value.as_str())
        .unwrap_or_default();
    format!("❌ Error: {}\n{}", e.message(), config::missing_hint(variable))
}

/// A missing credential ends the program quietly (status 0) after telling
/// the user how to set it.
fn settings_or_hint(loaded: Result<Settings>) -> Option<Settings> {
    match loaded {
        Ok(settings) => Some(settings),
        Err(e) => {
            tracing::debug!(error = ?e, "settings unavailable");
            eprintln!("{}", config_failure_text(&e));
            None
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    setup_log(cli.verbose);

    let Some(settings) = settings_or_hint(Settings::from_env()) else {
        return;
    };

    if let Err(e) = dispatch(cli, settings).await {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
