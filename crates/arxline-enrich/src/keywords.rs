//! TextRank keyword extraction
//!
//! Words are lowercased, non-letters become separators. Candidate words
//! (no stop words, at least three letters) form a co-occurrence graph that
//! is ranked with PageRank. The top fraction of candidates is kept and
//! adjacent kept words in the original token order are merged into phrases.
//! Output order is by mean word score, ties broken by first occurrence.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::stopwords::is_stopword;

#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    /// Fraction of distinct candidate words kept (rounded up, at least one)
    pub ratio: f64,
    /// Co-occurrence window over the candidate sequence
    pub window: usize,
    pub damping: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
    pub min_word_len: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self {
            ratio: 0.2,
            window: 2,
            damping: 0.85,
            max_iterations: 100,
            tolerance: 1e-4,
            min_word_len: 3,
        }
    }
}

/// Extract keywords with the default settings.
pub fn extract_keywords(text: &str) -> Vec<String> {
    KeywordExtractor::default().extract(text)
}

struct Phrase {
    text: String,
    score: f64,
    first_seen: usize,
}

impl KeywordExtractor {
    pub fn extract(&self, text: &str) -> Vec<String> {
        let tokens = tokenize(text);

        // Distinct candidate words, in order of first occurrence
        let mut ids: FxHashMap<&str, usize> = FxHashMap::default();
        let mut words: Vec<&str> = Vec::new();
        // Per token: candidate id, or None for a stop word / short word
        let mut token_ids: Vec<Option<usize>> = Vec::with_capacity(tokens.len());
        for token in &tokens {
            if !self.is_candidate(token) {
                token_ids.push(None);
                continue;
            }
            let id = *ids.entry(token.as_str()).or_insert_with(|| {
                words.push(token.as_str());
                words.len() - 1
            });
            token_ids.push(Some(id));
        }

        if words.is_empty() {
            return Vec::new();
        }

        let sequence: Vec<usize> = token_ids.iter().flatten().copied().collect();
        let graph = self.build_graph(words.len(), &sequence);
        let scores = self.rank(&graph);

        let keep_count = ((words.len() as f64 * self.ratio).ceil() as usize).clamp(1, words.len());
        let mut order: Vec<usize> = (0..words.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));
        let mut kept = vec![false; words.len()];
        for &id in &order[..keep_count] {
            kept[id] = true;
        }

        let phrases = combine_phrases(&token_ids, &words, &kept, &scores);
        log::trace!(
            "textrank: {} tokens, {} candidates, {} phrases",
            tokens.len(),
            words.len(),
            phrases.len()
        );
        phrases.into_iter().map(|p| p.text).collect()
    }

    fn is_candidate(&self, word: &str) -> bool {
        word.len() >= self.min_word_len && !is_stopword(word)
    }

    /// Undirected adjacency lists without self loops or duplicate edges.
    fn build_graph(&self, nodes: usize, sequence: &[usize]) -> Vec<Vec<usize>> {
        let mut graph: Vec<Vec<usize>> = vec![Vec::new(); nodes];
        let window = self.window.max(2);
        for (i, &a) in sequence.iter().enumerate() {
            for &b in sequence.iter().skip(i + 1).take(window - 1) {
                if a == b || graph[a].contains(&b) {
                    continue;
                }
                graph[a].push(b);
                graph[b].push(a);
            }
        }
        graph
    }

    fn rank(&self, graph: &[Vec<usize>]) -> Vec<f64> {
        let d = self.damping;
        let mut scores = vec![1.0; graph.len()];

        for _ in 0..self.max_iterations {
            let mut next = vec![1.0 - d; graph.len()];
            for (node, neighbors) in graph.iter().enumerate() {
                for &other in neighbors {
                    next[node] += d * scores[other] / graph[other].len() as f64;
                }
            }

            let delta = next
                .iter()
                .zip(&scores)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max);
            scores = next;
            if delta < self.tolerance {
                break;
            }
        }
        scores
    }
}

/// Lowercase ASCII letter runs; everything else separates words.
fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect();
    cleaned.split_whitespace().map(str::to_owned).collect()
}

fn combine_phrases(
    token_ids: &[Option<usize>],
    words: &[&str],
    kept: &[bool],
    scores: &[f64],
) -> Vec<Phrase> {
    let mut phrases: Vec<Phrase> = Vec::new();
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut run: Vec<usize> = Vec::new();

    let mut flush = |run: &mut Vec<usize>, phrases: &mut Vec<Phrase>| {
        if run.is_empty() {
            return;
        }
        let text = run.iter().map(|&id| words[id]).collect::<Vec<_>>().join(" ");
        if seen.insert(text.clone()) {
            let score = run.iter().map(|&id| scores[id]).sum::<f64>() / run.len() as f64;
            let first_seen = phrases.len();
            phrases.push(Phrase {
                text,
                score,
                first_seen,
            });
        }
        run.clear();
    };

    for token in token_ids {
        match token {
            Some(id) if kept[*id] => run.push(*id),
            _ => flush(&mut run, &mut phrases),
        }
    }
    flush(&mut run, &mut phrases);

    phrases.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.first_seen.cmp(&b.first_seen)));
    phrases
}
