use arxline_arxiv::{PaperEntry, doi_suffix};
use arxline_store::PaperRecord;

/// Build the stored record for one listing entry.
pub fn assemble_record(
    entry: PaperEntry,
    citations: Option<u32>,
    keywords: Vec<String>,
    text: Option<String>,
) -> PaperRecord {
    let doi = doi_suffix(&entry.id).to_string();
    PaperRecord {
        id: entry.id,
        title: entry.title,
        authors: entry.authors,
        published: entry.published,
        summary: entry.summary,
        keywords,
        doi,
        citations,
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_from_entry() {
        let entry = PaperEntry {
            id: "http://arxiv.org/abs/2301.01234v2".into(),
            title: "Starspots".into(),
            published: "2023-01-03T18:00:00Z".into(),
            summary: "Spots on stars".into(),
            authors: vec!["A".into(), "B".into()],
            categories: vec!["astro-ph.SR".into()],
        };
        let record = assemble_record(entry, None, vec!["spots".into()], None);

        assert_eq!(record.id, "http://arxiv.org/abs/2301.01234v2");
        assert_eq!(record.doi, "2301.01234v2");
        assert_eq!(record.authors, ["A", "B"]);
        assert_eq!(record.keywords, ["spots"]);
        assert_eq!(record.citations, None);
        assert_eq!(record.text, None);
    }
}
