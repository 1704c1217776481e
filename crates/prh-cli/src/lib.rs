//! PR hours CLI library.
//!
//! This crate provides the command-line interface for the estimator.

mod cli;
mod config;
pub mod report;

pub use cli::Cli;
pub use config::Config;
