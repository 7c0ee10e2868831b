//! `arxline search` - full-text query over stored records

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use arxline_core::SharedProgress;
use arxline_store::{MongoConfig, MongoStore, SearchHit};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Words to match against title, authors, summary and keywords
    pub query: String,

    /// Maximum number of results
    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,
}

pub fn run(
    args: SearchArgs,
    env: impl Fn(&str) -> Option<String>,
    progress: &SharedProgress,
) -> Result<()> {
    let mongo = MongoConfig::from_lookup(env)?;
    let store = MongoStore::connect(&mongo)?;
    let hits = store.search(&args.query, args.limit);
    store.close();
    let hits = hits?;

    if hits.is_empty() {
        progress.println(format!("No matches for {:?}.", args.query));
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Score").fg(Color::Cyan),
            Cell::new("arXiv").fg(Color::Cyan),
            Cell::new("Published").fg(Color::Cyan),
            Cell::new("Citations").fg(Color::Cyan),
            Cell::new("Title").fg(Color::Cyan),
        ]);

    for hit in &hits {
        table.add_row(row(hit));
    }

    println!("{table}");
    Ok(())
}

fn row(hit: &SearchHit) -> Vec<String> {
    let record = &hit.record;
    vec![
        format!("{:.2}", hit.score),
        record.doi.clone(),
        published_date(&record.published),
        record
            .citations
            .map_or_else(|| "-".to_string(), |n| n.to_string()),
        truncate(&record.title, 70),
    ]
}

/// `YYYY-MM-DD` for RFC 3339 timestamps, the raw value otherwise.
fn published_date(published: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(published)
        .map(|ts| ts.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| published.to_string())
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
