//! Direct memory command.
//!
//! `prompt-memory <mode> [key=value ...]` updates one memory document and
//! prints a confirmation line. The MCP server spawns this binary for every
//! tool call in process mode.

use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::debug;

use prompt_memory_mcp::core::config::LOG_LEVEL_ENV;
use prompt_memory_mcp::core::{Config, init_logging};
use prompt_memory_mcp::domains::memory::{Arguments, Dispatcher, MemoryPaths, Mode, usage};

#[derive(Parser)]
#[command(name = "prompt-memory")]
#[command(about = "Update the agent memory documents")]
#[command(version)]
struct Cli {
    /// update-context | update-progress | log-decision
    mode: Option<String>,

    /// key=value pairs
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        // A mode clap cannot place, such as `--bogus`, is an unknown mode.
        Err(_) => {
            eprintln!("{}", usage());
            return ExitCode::FAILURE;
        }
    };

    let mut config = Config::from_env();
    if std::env::var(LOG_LEVEL_ENV).is_err() {
        config.logging.level = "warn".to_string();
    }
    init_logging(&config.logging);

    let Some(mode) = cli.mode.as_deref().and_then(|m| m.parse::<Mode>().ok()) else {
        eprintln!("{}", usage());
        return ExitCode::FAILURE;
    };

    let args = Arguments::parse(&cli.args);
    debug!(%mode, args = args.len(), "Dispatching");

    let dispatcher = Dispatcher::new(MemoryPaths::new(config.memory.root));
    match dispatcher.dispatch(mode, &args) {
        Ok(outcome) => {
            println!("{}", outcome.message());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("prompt-memory: {e}");
            ExitCode::FAILURE
        }
    }
}
