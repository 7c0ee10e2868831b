//! `arxline harvest` - page through a category into MongoDB

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use arxline_arxiv::ArxivClient;
use arxline_core::{HttpConfig, SharedProgress, fmt_num, shutdown_flag};
use arxline_harvest::{Harvester, StopReason};
use arxline_inspire::InspireClient;
use arxline_store::{MongoConfig, MongoStore};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct HarvestArgs {
    /// arXiv category to harvest (e.g. astro-ph.SR)
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Offset of the first page
    #[arg(short, long)]
    pub start: Option<usize>,

    /// Entries per page
    #[arg(short, long)]
    pub page_size: Option<usize>,

    /// Stop after this many pages
    #[arg(short = 'n', long)]
    pub max_pages: Option<usize>,

    /// Download PDFs and store their text
    #[arg(long)]
    pub fulltext: bool,
}

pub fn run(
    args: HarvestArgs,
    config: &Config,
    http: &HttpConfig,
    progress: &SharedProgress,
) -> Result<ExitCode> {
    let mut arxiv_config = config.arxiv.clone();
    if let Some(topic) = args.topic {
        arxiv_config.topic = topic;
    }
    let mut harvest_config = config.harvest.clone();
    if let Some(start) = args.start {
        harvest_config.start = start;
    }
    if let Some(page_size) = args.page_size {
        harvest_config.page_size = page_size;
    }
    if args.max_pages.is_some() {
        harvest_config.max_pages = args.max_pages;
    }
    harvest_config.fetch_fulltext |= args.fulltext;

    let mongo = MongoConfig::from_env()?;
    let arxiv = ArxivClient::new(arxiv_config, http).context("Invalid arXiv settings")?;
    let inspire = InspireClient::new(config.inspire.clone(), http)?;
    let harvester =
        Harvester::new(harvest_config, arxiv, inspire, http).context("Invalid harvest settings")?;

    let mut store = MongoStore::connect(&mongo)?;

    let pb = progress.stage_line("harvest");
    let summary = harvester.run(&mut store, shutdown_flag(), &pb);
    pb.finish_and_clear();

    match store.count() {
        Ok(n) => log::info!(
            "{} documents in {}",
            fmt_num(n as usize),
            store.namespace()
        ),
        Err(e) => log::warn!("{e:#}"),
    }
    store.close();

    Ok(exit_code(&summary.stop))
}

fn exit_code(stop: &StopReason) -> ExitCode {
    match stop {
        StopReason::Exhausted | StopReason::PageLimit => ExitCode::SUCCESS,
        StopReason::FetchFailed(_) => ExitCode::from(1),
        StopReason::Interrupted => ExitCode::from(130),
    }
}
