//! Record store abstraction for Quill.
//!
//! The [`ArticleStore`] trait owns the authoritative article collection.
//! The query engine only ever sees the read-only slice returned by
//! [`ArticleStore::list`], so no component other than the store can
//! mutate a record.
//!
//! Operations are synchronous and run to completion. Callers that share a
//! store across threads wrap it in a single writer lock so a mutation never
//! interleaves with a query over `list()`.

pub mod memory;

use crate::error::Result;
use crate::models::{Article, ArticlePatch, NewArticle};

/// Abstract article store.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`create`](ArticleStore::create) | Assign id + timestamp, insert, return the record |
/// | [`insert`](ArticleStore::insert) | Insert a fully formed record (seeding) |
/// | [`find`](ArticleStore::find) | Look up one record by id |
/// | [`list`](ArticleStore::list) | All records in insertion order |
/// | [`update`](ArticleStore::update) | Merge a partial patch into a record |
/// | [`delete`](ArticleStore::delete) | Remove a record permanently |
pub trait ArticleStore {
    /// Insert a new article with a fresh unique id and `created_at = now`.
    fn create(&mut self, attrs: NewArticle) -> Article;

    /// Insert an already formed article.
    ///
    /// Fails with [`StoreError::DuplicateId`](crate::StoreError::DuplicateId)
    /// if a live record already uses its id.
    fn insert(&mut self, article: Article) -> Result<()>;

    /// Fails with [`StoreError::NotFound`](crate::StoreError::NotFound).
    fn find(&self, id: &str) -> Result<&Article>;

    /// Every live record, oldest insertion first.
    fn list(&self) -> &[Article];

    /// Merge the fields present in `patch`; `id` and `created_at` never change.
    fn update(&mut self, id: &str, patch: ArticlePatch) -> Result<&Article>;

    /// Remove the record. Deleting twice fails the second time.
    fn delete(&mut self, id: &str) -> Result<()>;

    fn len(&self) -> usize {
        self.list().len()
    }

    fn is_empty(&self) -> bool {
        self.list().is_empty()
    }
}
