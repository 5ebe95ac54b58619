//! MentorHub - AI learning mentor
//!
//! CLI entry point: runs the web server or a single pipeline step.

use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result};
use tracing::{debug, info, warn};

use mentorhub::chat::ChatBot;
use mentorhub::cli::{Cli, Command, ProfileArgs};
use mentorhub::config::Config;
use mentorhub::llm::Gateway;
use mentorhub::plan::{MentorService, Planner, Profile};
use mentorhub::prompts::PromptLoader;
use mentorhub::web::{self, AppState, Pages};
use planstore::PlanStore;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) {
    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level).map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    debug!(?level, "Logging initialized");
}

/// Wire the gateway, prompts and store together from config
fn build_state(config: &Config) -> Result<AppState> {
    if let Err(e) = config.validate() {
        warn!("{}", e);
    }

    let gateway = Gateway::from_config(&config.llm);
    let prompts = Arc::new(PromptLoader::from_dir(config.planner.prompts_dir.as_deref()));
    let store = PlanStore::open(&config.storage.store_dir)
        .context(format!("Failed to open store at {}", config.storage.store_dir.display()))?
        .with_ttl(chrono::Duration::days(config.storage.ttl_days));

    Ok(AppState {
        llm_available: gateway.is_available(),
        service: MentorService::new(Planner::new(gateway.clone(), prompts.clone(), &config.planner), store),
        chat: ChatBot::new(gateway, prompts),
        pages: Pages::new()?,
    })
}

fn profile(args: &ProfileArgs) -> Profile {
    Profile::new(&args.name, &args.background, &args.goal)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref());

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        None => cmd_serve(&config, None).await,
        Some(Command::Serve { bind }) => cmd_serve(&config, bind).await,
        Some(Command::Plan { profile: args, regenerate }) => cmd_plan(&config, &args, regenerate).await,
        Some(Command::Chat { message }) => cmd_chat(&config, &message).await,
        Some(Command::Whoami { profile: args }) => {
            println!("{}", profile(&args).user_id());
            Ok(())
        }
    }
}

async fn cmd_serve(config: &Config, bind: Option<String>) -> Result<()> {
    let state = Arc::new(build_state(config)?);
    let addr = bind.unwrap_or_else(|| config.server.bind.clone());
    info!(%addr, store = %state.service.store().base_path().display(), "Starting MentorHub");
    web::serve(&addr, state).await
}

async fn cmd_plan(config: &Config, args: &ProfileArgs, regenerate: bool) -> Result<()> {
    let state = build_state(config)?;
    let outcome = state.service.plan(&profile(args), regenerate).await;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

async fn cmd_chat(config: &Config, message: &str) -> Result<()> {
    let state = build_state(config)?;
    println!("{}", state.chat.reply(message).await);
    Ok(())
}
