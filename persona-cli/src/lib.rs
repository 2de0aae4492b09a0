//! # persona-cli
//!
//! Argument parsing, config loading, logging setup and provider wiring for the
//! `persona` binary.

pub mod cli;
pub mod config;
pub mod logger;
pub mod providers;

pub use cli::{Cli, Commands};
pub use config::AppConfig;
