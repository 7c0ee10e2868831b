//! arxline - arXiv harvesting pipeline
//!
//! Pages through an arXiv category, enriches every paper with an INSPIRE
//! citation count and abstract keywords, and stores the records in MongoDB.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use arxline_core::{ProgressContext, SharedProgress};
use config::Config;

#[derive(Parser)]
#[command(name = "arxline")]
#[command(about = "Harvest arXiv listings into MongoDB")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./arxline.toml or ~/.config/arxline/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Maximum retry attempts for transient page-fetch failures
    #[arg(long, global = true)]
    max_retries: Option<u32>,
}

#[derive(Subcommand)]
enum Command {
    /// Harvest a category until the listing is exhausted
    Harvest(cmd::harvest::HarvestArgs),
    /// Create the full-text index on the collection
    Index,
    /// Full-text search over stored records
    Search(cmd::search::SearchArgs),
    /// Show current configuration
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Before logging init so RUST_LOG from .env applies
    let dotenv = dotenvy::dotenv();

    let progress = Arc::new(ProgressContext::new());
    let multi = progress.is_tty().then(|| progress.multi());
    arxline_core::init_logging(cli.debug, multi);

    match dotenv {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => log::warn!("Ignoring .env: {e}"),
    }
    if let Err(e) = arxline_core::install_signal_handlers() {
        log::warn!("Could not install signal handlers: {e}");
    }

    match run(cli, &progress) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli, progress: &SharedProgress) -> Result<ExitCode> {
    let config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };
    let http = config.http.to_http_config(cli.timeout, cli.max_retries);

    match cli.command {
        Command::Harvest(args) => cmd::harvest::run(args, &config, &http, progress),
        Command::Index => cmd::index::run(env_var).map(|()| ExitCode::SUCCESS),
        Command::Search(args) => {
            cmd::search::run(args, env_var, progress).map(|()| ExitCode::SUCCESS)
        }
        Command::Config => {
            show_config(&config, &http, progress);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn show_config(config: &Config, http: &arxline_core::HttpConfig, progress: &SharedProgress) {
    use arxline_store::{COLLECTION_NAME_VAR, DB_NAME_VAR, MONGO_URI_VAR};
    use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Setting").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);

    table.add_row(vec!["arXiv base URL", &config.arxiv.base_url]);
    table.add_row(vec!["Topic", &config.arxiv.topic]);
    table.add_row(vec!["INSPIRE base URL", &config.inspire.base_url]);
    table.add_row(vec!["Start offset", &config.harvest.start.to_string()]);
    table.add_row(vec!["Page size", &config.harvest.page_size.to_string()]);
    table.add_row(vec![
        "Max pages",
        &config
            .harvest
            .max_pages
            .map_or_else(|| "unlimited".to_string(), |n| n.to_string()),
    ]);
    table.add_row(vec![
        "Full text",
        if config.harvest.fetch_fulltext {
            "enabled"
        } else {
            "disabled"
        },
    ]);
    table.add_row(vec!["Timeout", &format!("{}s", http.timeout.as_secs())]);
    table.add_row(vec![
        "Connect timeout",
        &format!("{}s", http.connect_timeout.as_secs()),
    ]);
    table.add_row(vec!["Max retries", &http.max_retries.to_string()]);
    table.add_row(vec![
        "Backoff base",
        &format!("{}ms", http.backoff_base.as_millis()),
    ]);
    table.add_row(vec!["User agent", &http.user_agent]);
    for var in [MONGO_URI_VAR, DB_NAME_VAR, COLLECTION_NAME_VAR] {
        let state = match env_var(var) {
            Some(v) if !v.is_empty() && var == MONGO_URI_VAR => "configured".to_string(),
            Some(v) if !v.is_empty() => v,
            _ => "not set".to_string(),
        };
        table.add_row(vec![var.to_string(), state]);
    }

    progress.println(format!("\n{table}"));
}
