//! Article data model.
//!
//! These types flow through every layer: the store owns [`Article`]
//! records, the query engine borrows them, and the HTTP layer serialises
//! them with camelCase keys (`createdAt`).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

/// Publication state of an article. The enumeration is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    Published,
    Draft,
    InReview,
}

impl ArticleStatus {
    /// Every status, in declaration order.
    pub const ALL: [ArticleStatus; 3] = [
        ArticleStatus::Published,
        ArticleStatus::Draft,
        ArticleStatus::InReview,
    ];

    /// The wire value (`"published"`, `"draft"`, `"in_review"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Published => "published",
            ArticleStatus::Draft => "draft",
            ArticleStatus::InReview => "in_review",
        }
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArticleStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| StoreError::InvalidStatus(s.to_string()))
    }
}

/// A stored article.
///
/// `id` and `created_at` are assigned by the store at creation and never
/// change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub author: String,
    pub status: ArticleStatus,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub created_at: DateTime<Utc>,
}

/// Attributes supplied when creating an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    pub title: String,
    pub author: String,
    pub status: ArticleStatus,
}

/// Partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticlePatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub status: Option<ArticleStatus>,
}

impl ArticlePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.status.is_none()
    }

    /// Merge the supplied fields into `article`.
    pub fn apply_to(self, article: &mut Article) {
        if let Some(title) = self.title {
            article.title = title;
        }
        if let Some(author) = self.author {
            article.author = author;
        }
        if let Some(status) = self.status {
            article.status = status;
        }
    }
}

/// Timestamps go out in the same shape browsers produce
/// (`2026-10-19T08:15:30.120Z`).
fn serialize_iso_millis<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}
