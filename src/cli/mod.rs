use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod formatters;

#[derive(Parser)]
#[command(name = "inbot")]
#[command(version, about = "Indexa Capital portfolio performance as a Slack message")]
#[command(
    long_about = "Fetch the performance of your Indexa Capital account and render it as an ephemeral Slack message, the way the /indexa slash command answers."
)]
pub struct Cli {
    /// Path to a config.toml (defaults to <config dir>/inbot/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one handler invocation and print the HTTP proxy response as JSON
    Invoke {
        /// Abort the upstream calls after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },

    /// Fetch the current performance and print it as a table
    Show {
        /// Output the raw metrics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a saved performance response into the Slack message, offline
    Render {
        /// Path to a JSON document as returned by /accounts/{n}/performance
        file: PathBuf,
    },
}
