//! CLI module for the MindSpark gateway
//!
//! - `serve`: HTTP server (default)
//! - `ask`: resolve one message from the terminal
//! - `providers`: show the provider chain as configured

pub mod ask;
pub mod providers;
pub mod serve;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// MindSpark gateway - chat relay with local fallback
#[derive(Parser)]
#[command(name = "mindspark-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Send one message through the fallback chain and print the reply
    Ask(ask::AskArgs),

    /// List providers in priority order with their status
    Providers,
}

/// Load `.env` and the layered configuration, then start logging
///
/// An invalid configuration aborts startup rather than running on defaults.
pub fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Invalid configuration")?;

    logging::init_logging(&config.logging);
    Ok(config)
}
