//! bestiary-crawler command line front end
//!
//! Crawls one bestiary search, filters by armor class and prints the result
//! either as localized text chunks or as JSON. Logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use bestiary_crawler::domain::{sort_records, ArmorClassRange, DisplayLanguage, SortKey};
use bestiary_crawler::infrastructure::config::defaults::MAX_MESSAGE_LENGTH;
use bestiary_crawler::infrastructure::{init_logging_with_config, ConfigManager};
use bestiary_crawler::{render_records, split_message, AppConfig, BestiaryCrawler, SearchUrl};

#[derive(Parser, Debug)]
#[command(name = "bestiary-crawler")]
#[command(about = "Collect dnd.su bestiary entries within an armor class range", long_about = None)]
struct Cli {
    /// Bestiary search URL, e.g. "https://dnd.su/bestiary/?search=&type=beast"
    search_url: String,

    /// Armor class: "13" or a range "10 18"
    armor: ArmorClassRange,

    /// Sort key: title, danger, ac (or sort_by_title, sort_by_danger, sort_by_ac)
    #[arg(short, long)]
    sort: Option<SortKey>,

    /// Field labels of the text output: en or ru
    #[arg(short, long, default_value = "en")]
    lang: DisplayLanguage,

    /// Print records as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Maximum characters per printed text chunk
    #[arg(long, default_value_t = MAX_MESSAGE_LENGTH)]
    chunk_size: usize,

    /// Configuration file (toml, json or yaml); defaults to the saved one
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Save the resolved configuration to the user config directory
    #[arg(long)]
    save_config: bool,

    /// Override the configured log level
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let manager = ConfigManager::new().ok();
    let config_file = cli
        .config
        .as_deref()
        .or_else(|| manager.as_ref().and_then(ConfigManager::existing_config_path));

    let mut config = AppConfig::load(config_file)?;
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }
    init_logging_with_config(&config.logging)?;

    if cli.save_config {
        manager
            .context("No user config directory to save into")?
            .save_config(&config)
            .await?;
    }

    let search_url = SearchUrl::parse(&cli.search_url, &config.crawler.search_url_pattern)?;
    let crawler = BestiaryCrawler::with_http(config.crawler)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, finishing with the records collected so far");
            on_interrupt.cancel();
        }
    });

    let run = crawler
        .crawl_with_cancellation(search_url.as_str(), cli.armor, &cancel)
        .await;
    let mut records = run.records;
    if let Some(key) = cli.sort {
        sort_records(&mut records, key);
    }
    info!(
        "{} records from {} pages ({:?})",
        records.len(),
        run.pages_visited,
        run.termination
    );

    if cli.json {
        let output =
            serde_json::to_string_pretty(&records).context("Failed to serialize records")?;
        println!("{output}");
    } else {
        for chunk in split_message(&render_records(&records, cli.lang), cli.chunk_size) {
            println!("{chunk}\n");
        }
    }

    Ok(())
}
