//! CLI command definitions and subcommands

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// MentorHub - AI learning mentor
#[derive(Parser)]
#[command(
    name = "mh",
    about = "Course recommendations and study schedules from an LLM",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the web server
    Serve {
        /// Address to bind, overriding the config
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Build (or fetch the cached) plan for a learner and print it as JSON
    Plan {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Ignore any cached plan
        #[arg(short, long)]
        regenerate: bool,
    },

    /// Ask the mentor chatbot a question
    Chat {
        /// The question
        message: String,
    },

    /// Print the identity hash for a learner
    Whoami {
        #[command(flatten)]
        profile: ProfileArgs,
    },
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Learner name
    #[arg(short, long)]
    pub name: String,

    /// Current background
    #[arg(short, long)]
    pub background: String,

    /// Learning goal
    #[arg(short, long)]
    pub goal: String,
}
