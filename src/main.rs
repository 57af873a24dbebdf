//! # Stock Scanner
//!
//! Terminal front end for the inventory scanner workflow.
//!
//! 1. Loads `.env` and the `SCANNER_*` configuration (see [`stock_scanner::config`]).
//! 2. Starts the [`ScannerSystem`], which loads users and asks for camera permission.
//! 3. Renders every view change and turns typed commands into workflow events.

use stock_scanner::config::AppConfig;
use stock_scanner::lifecycle::{setup_tracing, ScannerSystem};
use stock_scanner::terminal::{parse_command, render, Command, HELP};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), String> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = AppConfig::from_env().map_err(|e| e.to_string())?;
    info!(service = %config.service.base_url, "Starting scanner");

    let system = ScannerSystem::from_config(&config).map_err(|e| e.to_string())?;
    let mut views = system.workflow.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", render(&views.borrow_and_update()));
    loop {
        tokio::select! {
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                println!("\n{}", render(&views.borrow_and_update()));
            }
            line = lines.next_line() => {
                let Some(line) = line.map_err(|e| e.to_string())? else {
                    break;
                };
                match parse_command(&line) {
                    Some(Command::Event(event)) => {
                        system.workflow.dispatch(event).await.map_err(|e| e.to_string())?;
                    }
                    Some(Command::Help) => println!("{HELP}"),
                    Some(Command::Quit) => break,
                    None if line.trim().is_empty() => {}
                    None => println!("Unknown command, type help"),
                }
            }
        }
    }

    drop(views);
    system.shutdown().await
}
