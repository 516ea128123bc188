//! rankid CLI library
//!
//! This library provides the command-line interface for the rankid
//! language identification system.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;
pub mod table_source;

pub use error::{CliError, CliResult};
