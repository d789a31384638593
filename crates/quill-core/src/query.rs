//! Query engine: fuzzy search, status filter, and pagination.
//!
//! The engine is stateless. It borrows the store's record slice for the
//! duration of one [`QueryEngine::run`] call and returns references into
//! it, so a caller holding a read lock gets a page whose `meta.total`
//! matches the snapshot the page was cut from.
//!
//! # Stages (order matters)
//!
//! 1. **Search.** Non-blank `search` text scores every record's `title`,
//!    `author` and `title author` keys with the [`FuzzyScorer`] and keeps the
//!    best. Records scoring above the threshold are dropped; survivors are
//!    stably sorted by ascending score.
//! 2. **Status.** A non-empty `status` keeps exact matches only. Unknown
//!    values match nothing. Never reorders.
//! 3. **Pagination.** `total` is counted here, then the 1-indexed window
//!    `[(page-1)·size, page·size)` is cut. Windows past the end are empty.

use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::fuzzy::{EditDistanceScorer, FuzzyScorer, DEFAULT_THRESHOLD};
use crate::models::Article;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A 1-indexed page window.
///
/// A zero in either field is replaced by its default before a query is
/// paginated, so a hand-built request can never underflow or divide by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build a window, replacing a zero page or page size with its default.
    pub fn new(page: usize, page_size: usize) -> Self {
        Self { page, page_size }.normalized()
    }

    fn normalized(self) -> Self {
        Self {
            page: if self.page == 0 { DEFAULT_PAGE } else { self.page },
            page_size: if self.page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                self.page_size
            },
        }
    }

    /// Parse raw query-string values.
    ///
    /// Each value falls back to its default independently when missing or
    /// not a positive integer (`"abc"`, `"-5"`, `"0"`). There is no upper
    /// bound on the page size.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
            page_size: parse_positive(limit).unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
}

/// One list/search request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    /// Free text; blank means no search stage.
    pub search: String,
    /// Exact status wire value; empty means no filter.
    pub status: String,
    pub page: PageRequest,
}

impl ArticleQuery {
    pub fn new(search: impl Into<String>, status: impl Into<String>, page: PageRequest) -> Self {
        Self {
            search: search.into(),
            status: status.into(),
            page,
        }
    }
}

/// Pagination metadata. `total` counts filtered records, not the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// One page of results, borrowed from the record slice.
#[derive(Debug, Clone, Serialize)]
pub struct QueryPage<'a> {
    pub articles: Vec<&'a Article>,
    pub meta: PageMeta,
}

/// Runs [`ArticleQuery`]s against a record slice.
#[derive(Clone)]
pub struct QueryEngine {
    scorer: Arc<dyn FuzzyScorer>,
    threshold: f64,
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new(Arc::new(EditDistanceScorer), DEFAULT_THRESHOLD)
    }
}

impl std::fmt::Debug for QueryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEngine")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

impl QueryEngine {
    pub fn new(scorer: Arc<dyn FuzzyScorer>, threshold: f64) -> Self {
        Self { scorer, threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Search, filter, and paginate `records` (as returned by
    /// [`ArticleStore::list`](crate::store::ArticleStore::list)).
    pub fn run<'a>(&self, records: &'a [Article], query: &ArticleQuery) -> QueryPage<'a> {
        let candidates = self.search_stage(records, query.search.trim());

        let filtered: Vec<&Article> = if query.status.is_empty() {
            candidates
        } else {
            candidates
                .into_iter()
                .filter(|a| a.status.as_str() == query.status)
                .collect()
        };

        paginate(filtered, query.page)
    }

    /// Best (lowest) score over the record's searchable keys.
    pub fn best_score(&self, search: &str, article: &Article) -> f64 {
        let combined = format!("{} {}", article.title, article.author);
        [article.title.as_str(), article.author.as_str(), combined.as_str()]
            .into_iter()
            .map(|key| self.scorer.score(search, key))
            .fold(f64::INFINITY, f64::min)
    }

    fn search_stage<'a>(&self, records: &'a [Article], search: &str) -> Vec<&'a Article> {
        if search.is_empty() {
            return records.iter().collect();
        }

        let mut scored: Vec<(f64, &Article)> = records
            .iter()
            .map(|a| (self.best_score(search, a), a))
            .filter(|(score, _)| *score <= self.threshold)
            .collect();

        // `sort_by` is stable: equal scores keep store order.
        scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        scored.into_iter().map(|(_, a)| a).collect()
    }
}

fn paginate(filtered: Vec<&Article>, req: PageRequest) -> QueryPage<'_> {
    let req = req.normalized();
    let total = filtered.len();
    let total_pages = total.div_ceil(req.page_size);

    let start = req.page.saturating_sub(1).saturating_mul(req.page_size);
    let articles = if start >= total {
        Vec::new()
    } else {
        let end = start.saturating_add(req.page_size).min(total);
        filtered[start..end].to_vec()
    };

    QueryPage {
        articles,
        meta: PageMeta {
            total,
            page: req.page,
            page_size: req.page_size,
            total_pages,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleStatus;
    use chrono::Utc;

    fn article(id: &str, title: &str, author: &str, status: ArticleStatus) -> Article {
        Article {
            id: id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            status,
            created_at: Utc::now(),
        }
    }

    fn fixture() -> Vec<Article> {
        vec![
            article("1", "Fuse Search", "Ada Lovelace", ArticleStatus::Draft),
            article("2", "Other Topic", "Alan Turing", ArticleStatus::Published),
        ]
    }

    fn numbered(n: usize) -> Vec<Article> {
        (0..n)
            .map(|i| {
                let status = ArticleStatus::ALL[i % 3];
                article(&i.to_string(), &format!("Post {i}"), "Writer", status)
            })
            .collect()
    }

    fn ids(page: &QueryPage<'_>) -> Vec<String> {
        page.articles.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn test_search_returns_matching_record_only() {
        let records = fixture();
        let engine = QueryEngine::default();
        let page = engine.run(
            &records,
            &ArticleQuery::new("fuse", "", PageRequest::default()),
        );
        assert_eq!(ids(&page), vec!["1"]);
        assert_eq!(page.meta.total, 1);
        assert_eq!(page.meta.total_pages, 1);
    }

    #[test]
    fn test_status_filter_without_search() {
        let records = fixture();
        let engine = QueryEngine::default();
        let page = engine.run(
            &records,
            &ArticleQuery::new("", "published", PageRequest::default()),
        );
        assert_eq!(ids(&page), vec!["2"]);
        assert_eq!(page.meta.total, 1);
    }

    #[test]
    fn test_unknown_status_matches_nothing() {
        let records = fixture();
        let page = QueryEngine::default().run(
            &records,
            &ArticleQuery::new("", "archived", PageRequest::default()),
        );
        assert!(page.articles.is_empty());
        assert_eq!(page.meta.total, 0);
        assert_eq!(page.meta.total_pages, 0);
    }

    #[test]
    fn test_blank_search_is_noop() {
        let records = fixture();
        let page = QueryEngine::default().run(
            &records,
            &ArticleQuery::new("   ", "", PageRequest::default()),
        );
        assert_eq!(ids(&page), vec!["1", "2"]);
    }

    #[test]
    fn test_search_matches_author() {
        let records = fixture();
        let page = QueryEngine::default().run(
            &records,
            &ArticleQuery::new("turing", "", PageRequest::default()),
        );
        assert_eq!(ids(&page), vec!["2"]);
    }

    #[test]
    fn test_exact_title_ranks_above_partial_overlap() {
        let records = vec![
            article("a", "Rust Async Patterns Explained", "Kim", ArticleStatus::Draft),
            article("b", "Rust Async", "Lee", ArticleStatus::Draft),
            article("c", "Rust Async Patterns", "Ng", ArticleStatus::Draft),
        ];
        let page = QueryEngine::default().run(
            &records,
            &ArticleQuery::new("rust async patterns", "", PageRequest::default()),
        );
        assert_eq!(page.articles[0].id, "c");
        assert!(ids(&page).contains(&"a".to_string()));
    }

    #[test]
    fn test_equal_scores_keep_store_order() {
        let records = vec![
            article("x", "Daily Notes", "Sam", ArticleStatus::Draft),
            article("y", "Daily Notes", "Sam", ArticleStatus::Published),
            article("z", "Daily Notes", "Sam", ArticleStatus::InReview),
        ];
        let page = QueryEngine::default().run(
            &records,
            &ArticleQuery::new("notes", "", PageRequest::default()),
        );
        assert_eq!(ids(&page), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_status_filter_applies_after_ranking() {
        let records = vec![
            article("1", "Tokio internals deep dive", "Pat", ArticleStatus::Draft),
            article("2", "Tokio", "Pat", ArticleStatus::Draft),
            article("3", "Tokio", "Pat", ArticleStatus::Published),
        ];
        let page = QueryEngine::default().run(
            &records,
            &ArticleQuery::new("tokio", "draft", PageRequest::default()),
        );
        assert_eq!(ids(&page), vec!["2", "1"]);
        assert_eq!(page.meta.total, 2);
    }

    #[test]
    fn test_zero_threshold_keeps_only_exact_matches() {
        let records = fixture();
        let engine = QueryEngine::new(Arc::new(EditDistanceScorer), 0.0);
        let page = engine.run(
            &records,
            &ArticleQuery::new("fuse search", "", PageRequest::default()),
        );
        assert_eq!(ids(&page), vec!["1"]);
        let page = engine.run(
            &records,
            &ArticleQuery::new("fuse", "", PageRequest::default()),
        );
        assert!(page.articles.is_empty());
    }

    #[test]
    fn test_custom_scorer_is_used() {
        struct PrefixScorer;
        impl FuzzyScorer for PrefixScorer {
            fn score(&self, query: &str, candidate: &str) -> f64 {
                if candidate.to_lowercase().starts_with(&query.to_lowercase()) {
                    0.0
                } else {
                    1.0
                }
            }
        }
        let records = fixture();
        let engine = QueryEngine::new(Arc::new(PrefixScorer), 0.5);
        let page = engine.run(
            &records,
            &ArticleQuery::new("alan", "", PageRequest::default()),
        );
        assert_eq!(ids(&page), vec!["2"]);
    }

    #[test]
    fn test_total_is_independent_of_page_window() {
        let records = numbered(23);
        let engine = QueryEngine::default();
        for (page, size) in [(1, 10), (3, 10), (9, 10), (1, 1), (2, 100)] {
            let result = engine.run(
                &records,
                &ArticleQuery::new("", "", PageRequest { page, page_size: size }),
            );
            assert_eq!(result.meta.total, 23, "page={page} size={size}");
        }
    }

    #[test]
    fn test_pages_concatenate_to_filtered_set() {
        let records = numbered(23);
        let engine = QueryEngine::default();
        for size in [1, 4, 7, 10, 23, 50] {
            let first = engine.run(
                &records,
                &ArticleQuery::new("", "draft", PageRequest { page: 1, page_size: size }),
            );
            let total = first.meta.total;
            assert_eq!(first.meta.total_pages, total.div_ceil(size));

            let mut seen = Vec::new();
            for page in 1..=first.meta.total_pages {
                let result = engine.run(
                    &records,
                    &ArticleQuery::new("", "draft", PageRequest { page, page_size: size }),
                );
                assert!(result.articles.len() <= size);
                seen.extend(ids(&result));
            }

            let expected: Vec<String> = records
                .iter()
                .filter(|a| a.status == ArticleStatus::Draft)
                .map(|a| a.id.clone())
                .collect();
            assert_eq!(seen, expected, "size={size}");
        }
    }

    #[test]
    fn test_out_of_range_page_is_empty_with_meta() {
        let records = numbered(5);
        let page = QueryEngine::default().run(
            &records,
            &ArticleQuery::new("", "", PageRequest { page: 4, page_size: 2 }),
        );
        assert!(page.articles.is_empty());
        assert_eq!(
            page.meta,
            PageMeta {
                total: 5,
                page: 4,
                page_size: 2,
                total_pages: 3
            }
        );
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let records = numbered(3);
        let page = QueryEngine::default().run(
            &records,
            &ArticleQuery::new(
                "",
                "",
                PageRequest {
                    page: usize::MAX,
                    page_size: usize::MAX,
                },
            ),
        );
        assert!(page.articles.is_empty());
        assert_eq!(page.meta.total_pages, 1);
    }

    #[test]
    fn test_page_size_larger_than_set_gives_one_page() {
        let records = numbered(7);
        let page = QueryEngine::default().run(
            &records,
            &ArticleQuery::new("", "", PageRequest { page: 1, page_size: 1000 }),
        );
        assert_eq!(page.articles.len(), 7);
        assert_eq!(page.meta.total_pages, 1);
    }

    #[test]
    fn test_zero_page_and_size_fall_back_to_defaults() {
        let records = numbered(15);
        let engine = QueryEngine::default();
        let defaults = engine.run(&records, &ArticleQuery::default());

        for req in [
            PageRequest { page: 0, page_size: 10 },
            PageRequest { page: 1, page_size: 0 },
            PageRequest { page: 0, page_size: 0 },
        ] {
            let page = engine.run(&records, &ArticleQuery::new("", "", req));
            assert_eq!(ids(&page), ids(&defaults), "{req:?}");
            assert_eq!(
                page.meta,
                PageMeta {
                    total: 15,
                    page: 1,
                    page_size: 10,
                    total_pages: 2
                }
            );
        }
        assert_eq!(PageRequest::new(0, 0), PageRequest::default());
        assert_eq!(PageRequest::new(3, 7), PageRequest { page: 3, page_size: 7 });
    }

    #[test]
    fn test_ranked_pages_concatenate_to_search_results() {
        let mut records = Vec::new();
        for i in 0..12 {
            // Alternate looser and tighter matches so ranking differs from
            // store order.
            let title = if i % 2 == 0 {
                format!("Kernel scheduling notes volume {i}")
            } else {
                format!("Kernel {i}")
            };
            records.push(article(&i.to_string(), &title, "Writer", ArticleStatus::Draft));
        }
        records.push(article("x", "Unrelated gardening", "Writer", ArticleStatus::Draft));
        let engine = QueryEngine::default();

        let everything = engine.run(
            &records,
            &ArticleQuery::new("kernel", "", PageRequest { page: 1, page_size: 1000 }),
        );
        let expected = ids(&everything);
        assert_eq!(expected.len(), 12);
        assert_ne!(
            expected,
            (0..12).map(|i| i.to_string()).collect::<Vec<_>>(),
            "ranking should reorder the store"
        );

        for size in [1, 5, 12] {
            let first = engine.run(
                &records,
                &ArticleQuery::new("kernel", "", PageRequest { page: 1, page_size: size }),
            );
            assert_eq!(first.meta.total_pages, 12usize.div_ceil(size));
            let mut seen = Vec::new();
            for page in 1..=first.meta.total_pages {
                let result = engine.run(
                    &records,
                    &ArticleQuery::new("kernel", "", PageRequest { page, page_size: size }),
                );
                seen.extend(ids(&result));
            }
            assert_eq!(seen, expected, "size={size}");
        }
    }

    #[test]
    fn test_parse_falls_back_on_garbage() {
        assert_eq!(
            PageRequest::parse(Some("abc"), Some("-5")),
            PageRequest { page: 1, page_size: 10 }
        );
        assert_eq!(PageRequest::parse(None, None), PageRequest::default());
        assert_eq!(
            PageRequest::parse(Some("0"), Some("")),
            PageRequest::default()
        );
    }

    #[test]
    fn test_parse_accepts_valid_values_independently() {
        assert_eq!(
            PageRequest::parse(Some(" 3 "), Some("25")),
            PageRequest { page: 3, page_size: 25 }
        );
        assert_eq!(
            PageRequest::parse(Some("2"), Some("nope")),
            PageRequest { page: 2, page_size: 10 }
        );
    }

    #[test]
    fn test_page_serializes_wire_shape() {
        let records = fixture();
        let page = QueryEngine::default().run(&records, &ArticleQuery::default());
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["articles"].as_array().unwrap().len(), 2);
        assert_eq!(json["meta"]["pageSize"], 10);
        assert_eq!(json["meta"]["totalPages"], 1);
        assert_eq!(json["meta"]["total"], 2);
        assert_eq!(json["meta"]["page"], 1);
    }
}
