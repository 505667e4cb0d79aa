//! CLI module for League Hub
//!
//! - `serve`: run the HTTP API
//! - `check-config`: print the effective configuration

pub mod check_config;
pub mod serve;

use clap::{Parser, Subcommand};

/// League Hub - team management API
#[derive(Parser)]
#[command(name = "league-hub")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Load the configuration and print it with secrets redacted
    CheckConfig,
}
