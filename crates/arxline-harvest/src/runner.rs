//! Sequential harvest runner

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use anyhow::Result;
use arxline_arxiv::{ArxivClient, Page, PaperEntry, arxiv_id, pdf_url};
use arxline_core::progress::set_total;
use arxline_core::{HttpConfig, build_client, fmt_num};
use arxline_enrich::{KeywordExtractor, fetch_text};
use arxline_inspire::InspireClient;
use arxline_store::{PaperRecord, RecordSink};
use indicatif::ProgressBar;

use crate::config::HarvestConfig;
use crate::record::assemble_record;

/// Why the pagination loop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The listing returned an empty page
    Exhausted,
    /// A page fetch failed after the retry policy gave up
    FetchFailed(String),
    /// Shutdown was requested between entries
    Interrupted,
    /// `max_pages` non-empty pages were processed
    PageLimit,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exhausted => write!(f, "listing exhausted"),
            Self::FetchFailed(msg) => write!(f, "page fetch failed: {msg}"),
            Self::Interrupted => write!(f, "interrupted"),
            Self::PageLimit => write!(f, "page limit reached"),
        }
    }
}

/// Harvest execution summary
#[derive(Debug)]
pub struct Summary {
    pub pages: usize,
    pub entries: usize,
    pub inserted: usize,
    pub insert_failures: usize,
    /// Entries stored with `citations: null`
    pub citation_misses: usize,
    /// Entries whose full text could not be fetched (only with fetch_fulltext)
    pub fulltext_failures: usize,
    /// Offset the next run would start from
    pub next_start: usize,
    pub stop: StopReason,
    pub elapsed: Duration,
}

impl Summary {
    pub fn log(&self) {
        log::info!("=== Harvest Summary ===");
        log::info!("Stopped: {}", self.stop);
        log::info!(
            "Pages: {}, entries: {} (next start: {})",
            self.pages,
            fmt_num(self.entries),
            self.next_start
        );
        log::info!(
            "Inserted: {} ({} failed)",
            fmt_num(self.inserted),
            self.insert_failures
        );
        log::info!("Without citation count: {}", self.citation_misses);
        if self.fulltext_failures > 0 {
            log::info!("Without full text: {}", self.fulltext_failures);
        }
        log::info!("Time: {:.1}s", self.elapsed.as_secs_f64());
    }
}

#[derive(Default)]
struct Tally {
    pages: usize,
    entries: usize,
    inserted: usize,
    insert_failures: usize,
    citation_misses: usize,
    fulltext_failures: usize,
}

/// Source clients plus the enrichment steps applied to every entry
pub struct Harvester {
    config: HarvestConfig,
    arxiv: ArxivClient,
    inspire: InspireClient,
    keywords: KeywordExtractor,
    /// Present only when full text is enabled
    pdf_client: Option<reqwest::Client>,
}

impl Harvester {
    pub fn new(
        config: HarvestConfig,
        arxiv: ArxivClient,
        inspire: InspireClient,
        http: &HttpConfig,
    ) -> Result<Self> {
        config.validate()?;
        let pdf_client = if config.fetch_fulltext {
            Some(build_client(http)?)
        } else {
            None
        };
        Ok(Self {
            config,
            arxiv,
            inspire,
            keywords: KeywordExtractor::default(),
            pdf_client,
        })
    }

    /// Page through the listing until it is exhausted, a fetch fails, the
    /// page limit is hit or `stop` is set.
    pub fn run(&self, sink: &mut dyn RecordSink, stop: &AtomicBool, pb: &ProgressBar) -> Summary {
        let started = Instant::now();
        let page_size = self.config.page_size;
        let mut start = self.config.start;
        let mut tally = Tally::default();

        log::info!(
            "Harvesting cat:{} from offset {start}, {page_size} per page",
            self.arxiv.topic()
        );

        let stop_reason = loop {
            if stop.load(Ordering::Relaxed) {
                break StopReason::Interrupted;
            }
            if self.config.max_pages.is_some_and(|max| tally.pages >= max) {
                break StopReason::PageLimit;
            }

            pb.set_message(format!("fetching page @{start}"));
            let entries = match self.arxiv.fetch_page_with_retry(start, page_size) {
                Ok(Page::Entries {
                    entries,
                    total_results,
                }) => {
                    if let Some(total) = total_results {
                        set_total(pb, total);
                    }
                    entries
                }
                Ok(Page::Exhausted) => break StopReason::Exhausted,
                Err(e) => {
                    log::error!("Fetching page at offset {start} failed: {e}");
                    break StopReason::FetchFailed(e.to_string());
                }
            };
            tally.pages += 1;
            log::debug!("Page {} @{start}: {} entries", tally.pages, entries.len());

            let mut interrupted = false;
            for (i, entry) in entries.into_iter().enumerate() {
                if stop.load(Ordering::Relaxed) {
                    interrupted = true;
                    break;
                }
                tally.entries += 1;

                let record = self.enrich(entry, &mut tally);
                match sink.insert(&record) {
                    Ok(()) => tally.inserted += 1,
                    Err(e) => {
                        tally.insert_failures += 1;
                        log::warn!("Insert failed for {}: {e:#}", record.id);
                    }
                }

                pb.set_position((start + i + 1) as u64);
                pb.set_message(format!(
                    "{} inserted, {} failed",
                    fmt_num(tally.inserted),
                    tally.insert_failures
                ));
            }
            if interrupted {
                break StopReason::Interrupted;
            }

            start += page_size;
        };

        let summary = Summary {
            pages: tally.pages,
            entries: tally.entries,
            inserted: tally.inserted,
            insert_failures: tally.insert_failures,
            citation_misses: tally.citation_misses,
            fulltext_failures: tally.fulltext_failures,
            next_start: start,
            stop: stop_reason,
            elapsed: started.elapsed(),
        };
        summary.log();
        summary
    }

    fn enrich(&self, entry: PaperEntry, tally: &mut Tally) -> PaperRecord {
        let citations = match self.inspire.lookup_citations(arxiv_id(&entry.id)) {
            Ok(count) => count,
            Err(e) => {
                log::warn!("Citation lookup failed for {}: {e}", entry.id);
                None
            }
        };
        if citations.is_none() {
            tally.citation_misses += 1;
        }

        let keywords = self.keywords.extract(&entry.summary);

        let text = self.pdf_client.as_ref().and_then(|client| {
            let url = pdf_url(&entry.id);
            match fetch_text(client, &url) {
                Ok(text) => Some(text),
                Err(e) => {
                    tally.fulltext_failures += 1;
                    log::warn!("Full text unavailable for {}: {e}", entry.id);
                    None
                }
            }
        });

        assemble_record(entry, citations, keywords, text)
    }
}
