//! CLI argument parsing for planstore

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "planstore")]
#[command(author, version, about = "Inspect cached learning plans", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List stored records
    List,

    /// Print a live record as JSON
    Show {
        /// User id (12 hex characters)
        #[arg(required = true)]
        user_id: String,
    },

    /// Compute the user id for a profile
    Id {
        name: String,
        background: String,
        goal: String,
    },

    /// Print the file path a user id maps to
    Path {
        #[arg(required = true)]
        user_id: String,
    },
}
