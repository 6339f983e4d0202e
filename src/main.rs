//! Command-line entry point.
//!
//! Loads the configuration, fetches the catalog once, and prints the first
//! page of the grid as a plain-text table.
//!
//! # Configuration
//!
//! The TOML file named by `CATALOG_GRID_CONFIG` is used when set; otherwise
//! the defaults apply. `RUST_LOG` overrides the configured trace level.
//!
//! ```text
//! CATALOG_GRID_CONFIG=grid.toml RUST_LOG=debug catalog-grid
//! ```
//!
//! Exits with status 1 if the configuration cannot be read or the catalog
//! fails to load.

use catalog_grid::app::{GridController, LoadStatus};
use catalog_grid::observability::init_tracing;
use catalog_grid::ui::render_table;
use catalog_grid::{initialize, Config};
use std::process::ExitCode;

const CONFIG_ENV: &str = "CATALOG_GRID_CONFIG";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => match Config::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("catalog-grid: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    init_tracing(&config);
    tracing::debug!(?config, "configuration loaded");

    let source = match config.source() {
        Ok(source) => source,
        Err(e) => {
            tracing::error!(error = %e, "failed to build catalog source");
            return ExitCode::FAILURE;
        }
    };

    let mut grid = GridController::new(initialize(&config), Box::new(source));
    grid.start().await;

    let view = grid.view();
    println!("{}", render_table(&view));

    let state = grid.shutdown();
    match &state.status.load {
        LoadStatus::Failed { message } => {
            tracing::error!(error = %message, "catalog load failed");
            ExitCode::FAILURE
        }
        _ => ExitCode::SUCCESS,
    }
}
