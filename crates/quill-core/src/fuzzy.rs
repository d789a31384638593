//! Approximate text matching for the search stage.
//!
//! The query engine depends only on the [`FuzzyScorer`] capability, so any
//! substring, edit-distance, or n-gram implementation can stand in. Scores
//! are distances: `0.0` is a perfect match, `1.0` is no match at all.
//!
//! # Default scoring ([`EditDistanceScorer`])
//!
//! Both sides are lowercased and whitespace-collapsed, then:
//!
//! 1. equal strings score `0.0`;
//! 2. a candidate containing the query scores
//!    `0.25 × (1 − |query| / |candidate|)`, always inside `(0, 0.25)`;
//! 3. anything else scores `0.25 + 0.75 × d / |query|` (clamped to `1.0`),
//!    where `d` is the smallest edit distance between the query and any
//!    substring of the candidate.
//!
//! With the default acceptance threshold of `0.4` this tolerates roughly one
//! typo per five query characters.

/// Default acceptance threshold: candidates scoring above it are dropped.
pub const DEFAULT_THRESHOLD: f64 = 0.4;

const SUBSTRING_WEIGHT: f64 = 0.25;
const EDIT_BASE: f64 = 0.25;
const EDIT_WEIGHT: f64 = 0.75;

/// Scores how well `candidate` matches `query`. Lower is better; results
/// lie in `[0.0, 1.0]`.
pub trait FuzzyScorer: Send + Sync {
    fn score(&self, query: &str, candidate: &str) -> f64;
}

/// Substring-first scorer with an approximate-substring edit distance
/// fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditDistanceScorer;

impl FuzzyScorer for EditDistanceScorer {
    fn score(&self, query: &str, candidate: &str) -> f64 {
        let query = normalize(query);
        let candidate = normalize(candidate);

        if query.is_empty() {
            return 0.0;
        }
        if candidate.is_empty() {
            return 1.0;
        }
        if query == candidate {
            return 0.0;
        }

        let q: Vec<char> = query.chars().collect();
        let c: Vec<char> = candidate.chars().collect();

        if candidate.contains(&query) {
            let coverage = q.len() as f64 / c.len() as f64;
            return SUBSTRING_WEIGHT * (1.0 - coverage);
        }

        let d = approximate_substring_distance(&q, &c);
        (EDIT_BASE + EDIT_WEIGHT * d as f64 / q.len() as f64).clamp(0.0, 1.0)
    }
}

/// Lowercase and collapse runs of whitespace to a single space.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Minimum edit distance between `query` and any contiguous substring of
/// `text` (leading and trailing text is free).
///
/// Single-column dynamic programme: `column[i]` holds the cost of matching
/// `query[..i]` against a substring ending at the current text position.
pub fn approximate_substring_distance(query: &[char], text: &[char]) -> usize {
    let m = query.len();
    let mut column: Vec<usize> = (0..=m).collect();
    let mut best = column[m];

    for &tc in text {
        let mut diag = column[0];
        column[0] = 0;
        for i in 1..=m {
            let left = column[i];
            let cost = usize::from(query[i - 1] != tc);
            column[i] = (diag + cost).min(left + 1).min(column[i - 1] + 1);
            diag = left;
        }
        best = best.min(column[m]);
        if best == 0 {
            break;
        }
    }
    best
}
