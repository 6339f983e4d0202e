//! Structured logging setup.
//!
//! Every component emits `tracing` events and spans; this module installs the
//! subscriber that filters and prints them.
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → stderr
//! ```
//!
//! # Configuration
//!
//! Filter level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Usage
//!
//! ```rust
//! use catalog_grid::observability::init_tracing;
//! use catalog_grid::Config;
//!
//! let config = Config::default();
//! init_tracing(&config);
//!
//! tracing::debug!("grid initialized");
//! ```

mod init;

pub use init::init_tracing;
