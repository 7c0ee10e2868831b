//! arXiv Atom feed parser using quick-xml
//!
//! Namespace-aware streaming parser: only elements bound to the Atom
//! namespace are read, so `arxiv:` and `opensearch:` siblings that share a
//! local name (e.g. `arxiv:primary_category`) never leak into an entry.

use anyhow::{Context, Result};
use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};

const ATOM_NS: &[u8] = b"http://www.w3.org/2005/Atom";
const OPENSEARCH_NS: &[u8] = b"http://a9.com/-/spec/opensearch/1.1/";

/// Id prefix arXiv uses for the single entry of an error feed
const API_ERROR_PREFIX: &str = "http://arxiv.org/api/errors";

/// One paper's metadata as listed by arXiv, before enrichment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperEntry {
    pub id: String,
    pub title: String,
    pub published: String,
    pub summary: String,
    pub authors: Vec<String>,
    /// `category@term` values in feed order
    pub categories: Vec<String>,
}

/// Parsed feed
#[derive(Debug, Default)]
pub struct Feed {
    pub entries: Vec<PaperEntry>,
    /// `opensearch:totalResults`, when present
    pub total_results: Option<u64>,
    /// Summary of an arXiv error entry, when the query was rejected
    pub api_error: Option<String>,
}

/// Parse an Atom feed returned by the listing endpoint.
pub fn parse_feed(xml: &str) -> Result<Feed> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut feed = Feed::default();

    loop {
        let (ns, event) = reader.read_resolved_event().context("XML parse error")?;
        let atom = is_bound(&ns, ATOM_NS);
        let opensearch = is_bound(&ns, OPENSEARCH_NS);
        match event {
            Event::Start(e) if atom && e.local_name().as_ref() == b"entry" => {
                let entry = parse_entry(&mut reader)?;
                if entry.id.starts_with(API_ERROR_PREFIX) {
                    feed.api_error = Some(if entry.summary.is_empty() {
                        entry.id
                    } else {
                        entry.summary
                    });
                } else if entry.id.is_empty() || entry.title.is_empty() {
                    log::debug!("Skipping entry without id or title: {:?}", entry.id);
                } else {
                    feed.entries.push(entry);
                }
            }
            Event::Start(e) if opensearch && e.local_name().as_ref() == b"totalResults" => {
                feed.total_results = read_text(&mut reader)?.parse().ok();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(feed)
}

fn is_bound(ns: &ResolveResult, uri: &[u8]) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(bound)) if *bound == uri)
}

fn parse_entry(reader: &mut NsReader<&[u8]>) -> Result<PaperEntry> {
    let mut entry = PaperEntry::default();

    loop {
        let (ns, event) = reader.read_resolved_event()?;
        let atom = is_bound(&ns, ATOM_NS);
        match event {
            Event::Start(e) if atom => match e.local_name().as_ref() {
                b"id" => entry.id = read_text(reader)?.trim().to_string(),
                b"title" => entry.title = collapse_whitespace(&read_text(reader)?),
                b"published" => entry.published = read_text(reader)?.trim().to_string(),
                b"summary" => entry.summary = collapse_whitespace(&read_text(reader)?),
                b"author" => {
                    if let Some(name) = parse_author(reader)? {
                        entry.authors.push(name);
                    }
                }
                b"category" => {
                    push_category(&e, &mut entry.categories)?;
                    reader.read_to_end(e.name())?;
                }
                _ => {
                    reader.read_to_end(e.name())?;
                }
            },
            Event::Empty(e) if atom && e.local_name().as_ref() == b"category" => {
                push_category(&e, &mut entry.categories)?;
            }
            Event::Start(e) => {
                reader.read_to_end(e.name())?;
            }
            Event::End(_) => break,
            Event::Eof => anyhow::bail!("unexpected end of feed inside <entry>"),
            _ => {}
        }
    }

    Ok(entry)
}

fn parse_author(reader: &mut NsReader<&[u8]>) -> Result<Option<String>> {
    let mut name = None;

    loop {
        let (ns, event) = reader.read_resolved_event()?;
        let atom = is_bound(&ns, ATOM_NS);
        match event {
            Event::Start(e) if atom && e.local_name().as_ref() == b"name" => {
                let text = collapse_whitespace(&read_text(reader)?);
                if !text.is_empty() {
                    name = Some(text);
                }
            }
            Event::Start(e) => {
                reader.read_to_end(e.name())?;
            }
            Event::End(_) => break,
            Event::Eof => anyhow::bail!("unexpected end of feed inside <author>"),
            _ => {}
        }
    }

    Ok(name)
}

fn push_category(e: &BytesStart, categories: &mut Vec<String>) -> Result<()> {
    if let Some(attr) = e.try_get_attribute("term")? {
        let term = attr.unescape_value()?.trim().to_string();
        if !term.is_empty() {
            categories.push(term);
        }
    }
    Ok(())
}

/// Read the text of the current element up to its closing tag.
///
/// Text of nested elements is concatenated.
fn read_text(reader: &mut NsReader<&[u8]>) -> Result<String> {
    let mut text = String::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Text(t) => text.push_str(&t.unescape()?),
            Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => break,
            Event::End(_) => depth -= 1,
            Event::Eof => anyhow::bail!("unexpected end of feed inside text element"),
            _ => {}
        }
    }

    Ok(text)
}

/// Collapse runs of whitespace (arXiv wraps titles and abstracts at ~80 columns)
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
