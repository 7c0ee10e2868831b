//! Identifier helpers for arXiv entry ids (`http://arxiv.org/abs/...`)

const ABS_PREFIXES: &[&str] = &["http://arxiv.org/abs/", "https://arxiv.org/abs/"];

/// Last `/`-delimited segment of an entry id, stored as the record's `doi`.
///
/// `http://arxiv.org/abs/2301.01234` → `2301.01234`. Applying it to its own
/// output returns the same value.
pub fn doi_suffix(identifier: &str) -> &str {
    identifier.rsplit('/').next().unwrap_or(identifier)
}

/// Bare arXiv id without the abs URL prefix and without a version suffix.
///
/// Keeps the archive part of old-style ids (`astro-ph/0601001`), which the
/// DOI suffix drops.
pub fn arxiv_id(identifier: &str) -> &str {
    let bare = ABS_PREFIXES
        .iter()
        .find_map(|prefix| identifier.strip_prefix(prefix))
        .unwrap_or(identifier);
    strip_version(bare)
}

/// PDF location for an entry id.
pub fn pdf_url(identifier: &str) -> String {
    format!("{}.pdf", identifier.replacen("/abs/", "/pdf/", 1))
}

fn strip_version(id: &str) -> &str {
    match id.rfind('v') {
        Some(pos) if pos > 0 => {
            let (head, tail) = id.split_at(pos);
            let digits = &tail[1..];
            let versioned = !digits.is_empty()
                && digits.bytes().all(|b| b.is_ascii_digit())
                && head.bytes().last().is_some_and(|b| b.is_ascii_digit());
            if versioned { head } else { id }
        }
        _ => id,
    }
}
