//! End-to-end harvest runs against mocked arXiv and INSPIRE endpoints
//! with an in-memory record sink.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use arxline_arxiv::{ArxivClient, ArxivConfig};
use arxline_core::HttpConfig;
use arxline_enrich::extract_keywords;
use arxline_harvest::{HarvestConfig, Harvester, StopReason, Summary};
use arxline_inspire::{InspireClient, InspireConfig};
use arxline_store::{PaperRecord, RecordSink};
use indicatif::ProgressBar;
use mockito::{Matcher, Mock, Server};

/// Keeps every record; fails the insert attempts listed in `fail_at` (0-based).
#[derive(Default)]
struct MemorySink {
    records: Vec<PaperRecord>,
    attempts: usize,
    fail_at: Vec<usize>,
}

impl RecordSink for MemorySink {
    fn insert(&mut self, record: &PaperRecord) -> anyhow::Result<()> {
        let attempt = self.attempts;
        self.attempts += 1;
        if self.fail_at.contains(&attempt) {
            anyhow::bail!("duplicate key error");
        }
        self.records.push(record.clone());
        Ok(())
    }
}

/// Requests shutdown once `after` records were inserted.
struct StoppingSink<'a> {
    inner: MemorySink,
    stop: &'a AtomicBool,
    after: usize,
}

impl RecordSink for StoppingSink<'_> {
    fn insert(&mut self, record: &PaperRecord) -> anyhow::Result<()> {
        self.inner.insert(record)?;
        if self.inner.records.len() >= self.after {
            self.stop.store(true, Ordering::Relaxed);
        }
        Ok(())
    }
}

fn entry_xml(id: &str, title: &str, summary: &str) -> String {
    format!(
        "<entry>\
           <id>{id}</id>\
           <published>2020-01-01</published>\
           <title>{title}</title>\
           <summary>{summary}</summary>\
           <author><name>A</name></author>\
           <category term=\"astro-ph.SR\" scheme=\"http://arxiv.org/schemas/atom\"/>\
         </entry>"
    )
}

fn feed(entries: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">
  <title>arXiv Query</title>
  {}
</feed>"#,
        entries.concat()
    )
}

fn numbered_entries(count: usize) -> Vec<String> {
    (0..count)
        .map(|n| {
            entry_xml(
                &format!("http://arxiv.org/abs/2401.{n:05}v1"),
                &format!("Paper {n}"),
                "Magnetic activity of cool stars",
            )
        })
        .collect()
}

fn listing_mock(server: &mut Server, start: &str, body: String) -> Mock {
    server
        .mock("GET", "/api/query")
        .match_query(Matcher::UrlEncoded("start".into(), start.into()))
        .with_status(200)
        .with_header("content-type", "application/atom+xml")
        .with_body(body)
        .create()
}

fn citations_mock(server: &mut Server, count: u32) -> Mock {
    server
        .mock("GET", "/api/literature")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"hits":{{"total":1,"hits":[{{"metadata":{{"citation_count":{count}}}}}]}}}}"#
        ))
        .create()
}

fn harvester(server: &Server, config: HarvestConfig, max_retries: u32) -> Harvester {
    let http = HttpConfig {
        timeout: Duration::from_secs(5),
        max_retries,
        backoff_base: Duration::ZERO,
        ..Default::default()
    };
    let arxiv = ArxivClient::new(
        ArxivConfig {
            base_url: format!("{}/api/query", server.url()),
            topic: "astro-ph.SR".to_string(),
        },
        &http,
    )
    .unwrap();
    let inspire = InspireClient::new(
        InspireConfig {
            base_url: format!("{}/api/literature", server.url()),
        },
        &http,
    )
    .unwrap();
    Harvester::new(config, arxiv, inspire, &http).unwrap()
}

fn run(harvester: &Harvester, sink: &mut dyn RecordSink) -> Summary {
    harvester.run(sink, &AtomicBool::new(false), &ProgressBar::hidden())
}

#[test]
fn single_entry_becomes_exact_record() {
    let mut server = Server::new();
    let _page = listing_mock(
        &mut server,
        "0",
        feed(&[entry_xml(
            "http://arxiv.org/abs/1111.2222",
            "T",
            "Stars form in clouds",
        )]),
    );
    let _end = listing_mock(&mut server, "10", feed(&[]));
    let lookup = server
        .mock("GET", "/api/literature")
        .match_query(Matcher::UrlEncoded("q".into(), "arxiv:1111.2222".into()))
        .with_status(200)
        .with_body(r#"{"hits":{"hits":[{"metadata":{"citation_count":5}}]}}"#)
        .create();

    let mut sink = MemorySink::default();
    let summary = run(&harvester(&server, HarvestConfig::default(), 0), &mut sink);

    assert_eq!(summary.stop, StopReason::Exhausted);
    assert_eq!(summary.pages, 1);
    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.next_start, 10);
    lookup.assert();

    let expected = PaperRecord {
        id: "http://arxiv.org/abs/1111.2222".to_string(),
        title: "T".to_string(),
        authors: vec!["A".to_string()],
        published: "2020-01-01".to_string(),
        summary: "Stars form in clouds".to_string(),
        keywords: extract_keywords("Stars form in clouds"),
        doi: "1111.2222".to_string(),
        citations: Some(5),
        text: None,
    };
    assert_eq!(sink.records, vec![expected]);
}

#[test]
fn empty_first_page_inserts_nothing() {
    let mut server = Server::new();
    let _page = listing_mock(&mut server, "0", feed(&[]));

    let mut sink = MemorySink::default();
    let summary = run(&harvester(&server, HarvestConfig::default(), 0), &mut sink);

    assert_eq!(summary.stop, StopReason::Exhausted);
    assert_eq!(summary.pages, 0);
    assert_eq!(sink.attempts, 0);
}

#[test]
fn insert_failure_does_not_skip_next_entry() {
    let mut server = Server::new();
    let _page = listing_mock(&mut server, "0", feed(&numbered_entries(3)));
    let _end = listing_mock(&mut server, "10", feed(&[]));
    let _lookup = citations_mock(&mut server, 1);

    let mut sink = MemorySink {
        fail_at: vec![1],
        ..Default::default()
    };
    let summary = run(&harvester(&server, HarvestConfig::default(), 0), &mut sink);

    assert_eq!(sink.attempts, 3);
    assert_eq!(summary.entries, 3);
    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.insert_failures, 1);
    assert_eq!(summary.stop, StopReason::Exhausted);
    let titles: Vec<&str> = sink.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["Paper 0", "Paper 2"]);
}

#[test]
fn unavailable_listing_is_fetch_failure() {
    let mut server = Server::new();
    let listing = server
        .mock("GET", "/api/query")
        .match_query(Matcher::Any)
        .with_status(503)
        .expect(1)
        .create();

    let mut sink = MemorySink::default();
    let summary = run(&harvester(&server, HarvestConfig::default(), 0), &mut sink);

    assert!(matches!(summary.stop, StopReason::FetchFailed(_)));
    assert_eq!(sink.attempts, 0);
    listing.assert();
}

#[test]
fn transient_failure_retried_when_enabled() {
    let mut server = Server::new();
    let failing = server
        .mock("GET", "/api/query")
        .match_query(Matcher::UrlEncoded("start".into(), "0".into()))
        .with_status(503)
        .expect(1)
        .create();
    let _page = listing_mock(&mut server, "0", feed(&numbered_entries(1)));
    let _lookup = citations_mock(&mut server, 0);

    let config = HarvestConfig {
        max_pages: Some(1),
        ..Default::default()
    };
    let mut sink = MemorySink::default();
    let summary = run(&harvester(&server, config, 2), &mut sink);

    failing.assert();
    assert_eq!(summary.stop, StopReason::PageLimit);
    assert_eq!(summary.inserted, 1);
}

#[test]
fn page_limit_bounds_the_run() {
    let mut server = Server::new();
    let _pages = server
        .mock("GET", "/api/query")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(feed(&numbered_entries(2)))
        .expect(2)
        .create();
    let _lookup = citations_mock(&mut server, 3);

    let config = HarvestConfig {
        page_size: 2,
        max_pages: Some(2),
        ..Default::default()
    };
    let mut sink = MemorySink::default();
    let summary = run(&harvester(&server, config, 0), &mut sink);

    assert_eq!(summary.stop, StopReason::PageLimit);
    assert_eq!(summary.pages, 2);
    assert_eq!(summary.inserted, 4);
    assert_eq!(summary.next_start, 4);
}

#[test]
fn start_offset_is_sent_and_advanced() {
    let mut server = Server::new();
    let first = listing_mock(&mut server, "30", feed(&numbered_entries(1)));
    let end = listing_mock(&mut server, "40", feed(&[]));
    let _lookup = citations_mock(&mut server, 1);

    let config = HarvestConfig {
        start: 30,
        ..Default::default()
    };
    let summary = run(&harvester(&server, config, 0), &mut MemorySink::default());

    first.assert();
    end.assert();
    assert_eq!(summary.next_start, 40);
}

#[test]
fn stop_flag_checked_before_first_fetch() {
    let mut server = Server::new();
    let listing = server
        .mock("GET", "/api/query")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(feed(&numbered_entries(1)))
        .expect(0)
        .create();

    let stop = AtomicBool::new(true);
    let mut sink = MemorySink::default();
    let summary = harvester(&server, HarvestConfig::default(), 0).run(
        &mut sink,
        &stop,
        &ProgressBar::hidden(),
    );

    assert_eq!(summary.stop, StopReason::Interrupted);
    assert_eq!(sink.attempts, 0);
    listing.assert();
}

#[test]
fn stop_flag_checked_between_entries() {
    let mut server = Server::new();
    let _page = listing_mock(&mut server, "0", feed(&numbered_entries(3)));
    let _lookup = citations_mock(&mut server, 1);

    let stop = AtomicBool::new(false);
    let mut sink = StoppingSink {
        inner: MemorySink::default(),
        stop: &stop,
        after: 1,
    };
    let summary = harvester(&server, HarvestConfig::default(), 0).run(
        &mut sink,
        &stop,
        &ProgressBar::hidden(),
    );

    assert_eq!(summary.stop, StopReason::Interrupted);
    assert_eq!(summary.entries, 1);
    assert_eq!(sink.inner.records.len(), 1);
}

#[test]
fn failed_citation_lookup_stores_null() {
    let mut server = Server::new();
    let _page = listing_mock(&mut server, "0", feed(&numbered_entries(1)));
    let _end = listing_mock(&mut server, "10", feed(&[]));
    let _lookup = server
        .mock("GET", "/api/literature")
        .match_query(Matcher::Any)
        .with_status(500)
        .create();

    let mut sink = MemorySink::default();
    let summary = run(&harvester(&server, HarvestConfig::default(), 0), &mut sink);

    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.citation_misses, 1);
    assert_eq!(sink.records[0].citations, None);
}

#[test]
fn unreadable_pdf_leaves_text_absent() {
    let mut server = Server::new();
    let id = format!("{}/abs/1111.2222", server.url());
    let _page = listing_mock(
        &mut server,
        "0",
        feed(&[entry_xml(&id, "T", "Stars form in clouds")]),
    );
    let _end = listing_mock(&mut server, "10", feed(&[]));
    let _lookup = citations_mock(&mut server, 2);
    let pdf = server
        .mock("GET", "/pdf/1111.2222.pdf")
        .with_status(200)
        .with_body("not a pdf")
        .create();

    let config = HarvestConfig {
        fetch_fulltext: true,
        ..Default::default()
    };
    let mut sink = MemorySink::default();
    let summary = run(&harvester(&server, config, 0), &mut sink);

    pdf.assert();
    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.fulltext_failures, 1);
    assert_eq!(sink.records[0].text, None);
    assert_eq!(sink.records[0].doi, "1111.2222");
}
