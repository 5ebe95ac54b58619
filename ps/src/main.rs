use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use planstore::PlanStore;
use planstore::cli::{Cli, Command};
use planstore::config::Config;
use planstore::identity;

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();
    Ok(())
}

fn open_store(config: &Config) -> Result<PlanStore> {
    let store = PlanStore::open(&config.store_path)
        .context(format!("Failed to open store at {}", config.store_path.display()))?;
    Ok(store.with_ttl(chrono::Duration::days(config.ttl_days)))
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("planstore starting");

    match cli.command {
        Command::List => {
            let store = open_store(&config)?;
            let summaries = store.list()?;
            if summaries.is_empty() {
                println!("No records found");
            } else {
                for s in summaries {
                    let state = if s.expired { "expired".red() } else { "live".green() };
                    println!(
                        "{} {} {} recs, {} weeks, created {}",
                        s.user_id.cyan(),
                        state,
                        s.recommendation_count,
                        s.week_count,
                        s.created_at.to_rfc3339().dimmed()
                    );
                }
            }
        }
        Command::Show { user_id } => {
            let store = open_store(&config)?;
            match store.get(&user_id) {
                Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
                None => {
                    eprintln!("{} No live record for {}", "✗".red(), user_id);
                    std::process::exit(1);
                }
            }
        }
        Command::Id { name, background, goal } => {
            println!("{}", identity::user_id(&name, &background, &goal));
        }
        Command::Path { user_id } => {
            let store = open_store(&config)?;
            println!("{}", store.path_for(&user_id).display());
        }
    }

    Ok(())
}
