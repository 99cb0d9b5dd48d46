use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod conversation;
mod events;
mod locale;
mod reply;
mod support;
mod tui;
mod ui;

use app::App;
use config::{Config, resolve_endpoint};
use conversation::Conversation;
use events::Language;
use reply::HttpReplyService;

#[derive(Parser)]
#[command(name = "megachat")]
#[command(version)]
#[command(about = "Bilingual terminal chat with the Mega Chat assistant", long_about = None)]
struct Cli {
    /// Reply service URL (overrides config and MEGACHAT_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Language to start in
    #[arg(long, global = true, value_enum)]
    lang: Option<Language>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one message and print the reply
    Ask { message: String },
    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

/// Log to a file so the terminal UI is left alone
fn init_logging(config: &Config) {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path())
        .ok();

    if let Some(file) = log_file {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("megachat=info"));
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_env_filter(filter)
            .with_ansi(false)
            .init();
    }
}

async fn ask(config: &Config, message: &str) -> Result<()> {
    let service = HttpReplyService::new(&config.endpoint)
        .context("Failed to create HTTP client")?;
    let mut conversation = Conversation::new(config.language);

    if !conversation.submit(&service, message).await {
        anyhow::bail!("Message is empty");
    }

    if let Some(reply) = conversation.messages().last() {
        println!("{}", reply.content);
    }
    Ok(())
}

fn show_config(config: &Config) -> Result<()> {
    println!("# {}", config.config_path().display());
    print!("{}", toml::to_string_pretty(config).context("Failed to serialize config")?);
    println!("# log file: {}", config.log_path().display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    config.endpoint = resolve_endpoint(cli.endpoint, None, config.endpoint);
    if let Some(language) = cli.lang {
        config.language = language;
    }

    init_logging(&config);

    match cli.command {
        None => {
            let service = HttpReplyService::new(&config.endpoint)
                .context("Failed to create HTTP client")?;
            tracing::debug!(endpoint = service.endpoint(), "reply service configured");
            App::new(config, Arc::new(service)).run().await
        }
        Some(Commands::Ask { message }) => ask(&config, &message).await,
        Some(Commands::Config { init }) => {
            if init {
                config.save()?;
                println!("Wrote {}", config.config_path().display());
            }
            show_config(&config)
        }
    }
}
