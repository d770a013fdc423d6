//! # hisi-cli
//!
//! Command line front-end for the Hisi Studio backend.
//!
//! ## Module Organization
//! ```text
//! hisi_cli/
//! ├── lib.rs          ◄─── You are here (run, tracing, rendering)
//! ├── cli.rs          ◄─── clap definitions
//! ├── state/
//! │   └── mod.rs      ◄─── AppContext (config + ApiClient)
//! ├── commands/
//! │   ├── mod.rs      ◄─── dispatch, output helpers, admin gate
//! │   └── ...         ◄─── one module per command group
//! └── error.rs        ◄─── CommandError {code, message}
//! ```
//!
//! ## Output Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  success  → stdout: pretty JSON of the result           exit 0         │
//! │  failure  → stderr: {"code": "...", "message": "..."}   exit 1         │
//! │  startup  → stderr: {"code": "CONFIG_ERROR", ...}       exit 2         │
//! │  logs     → stderr (tracing), never mixed into stdout                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::process::ExitCode;

use serde_json::Value;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

pub use cli::Cli;
use error::{CommandError, CommandResult, ErrorCode};
use state::AppContext;

/// Builds the context and runs the parsed command.
pub async fn run(cli: Cli) -> ExitCode {
    let ctx = match AppContext::open(&cli.global) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!(error = ?e, "Startup failed");
            let err = CommandError::new(ErrorCode::ConfigError, format!("{:#}", e));
            eprintln!("{}", err.to_json());
            return ExitCode::from(2);
        }
    };

    let result = commands::dispatch(&ctx, cli.command).await;
    render(result)
}

/// Prints a command result and picks the exit code.
pub fn render(result: CommandResult<Value>) -> ExitCode {
    match result {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(text) => {
                println!("{}", text);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", CommandError::from(e).to_json());
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            debug!(code = ?err.code, message = %err.message, "Command failed");
            eprintln!("{}", err.to_json());
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=hisi_client=trace` - Trace the client crate only
/// - Default: warnings only; `-v` gives `info,hisi=debug,hyper=warn`
pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "info,hisi=debug,hyper=warn"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
