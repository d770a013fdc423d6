//! # hisi: Hisi Studio Command Line Client
//!
//! ## Startup Sequence
//! 1. Parse the command line
//! 2. Initialize tracing (stderr, `RUST_LOG` aware)
//! 3. Load configuration and hydrate the persisted session
//! 4. Run the command, print JSON, exit

use std::process::ExitCode;

use clap::Parser;
use hisi_cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    hisi_cli::init_tracing(cli.global.verbose);
    hisi_cli::run(cli).await
}
