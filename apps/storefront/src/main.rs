//! # Storefront Entry Point
//!
//! ```text
//! storefront [--json] [--config FILE] <command>
//!       │
//!       ▼
//! init_tracing() ──► Cli::parse() ──► storefront_lib::run()
//!                                          │
//!                      Ok(output) ◄────────┴────────► Err(AppError)
//!                      stdout, exit 0                stderr, exit 1
//! ```
//!
//! All setup lives in `lib.rs` so it can be tested.

use clap::Parser;
use std::process::ExitCode;

use storefront_lib::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    storefront_lib::init_tracing();

    let cli = Cli::parse();
    let json = cli.json;

    match storefront_lib::run(cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            if json {
                match serde_json::to_string_pretty(&err) {
                    Ok(body) => eprintln!("{}", body),
                    Err(_) => eprintln!("error: {}", err.message),
                }
            } else {
                eprintln!("error: {}", err.message);
            }
            ExitCode::FAILURE
        }
    }
}
