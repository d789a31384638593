//! In-memory [`ArticleStore`] implementation.
//!
//! Records live in a `Vec` in insertion order; lookups are linear scans,
//! which is plenty for a development dataset of a few dozen rows.

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::models::{Article, ArticlePatch, NewArticle};

use super::ArticleStore;

/// In-memory store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    articles: Vec<Article>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.articles
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn contains(&self, id: &str) -> bool {
        self.articles.iter().any(|a| a.id == id)
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.contains(&id) {
                return id;
            }
        }
    }
}

impl ArticleStore for InMemoryStore {
    fn create(&mut self, attrs: NewArticle) -> Article {
        let article = Article {
            id: self.fresh_id(),
            title: attrs.title,
            author: attrs.author,
            status: attrs.status,
            created_at: Utc::now(),
        };
        debug!(id = %article.id, status = %article.status, "article created");
        self.articles.push(article.clone());
        article
    }

    fn insert(&mut self, article: Article) -> Result<()> {
        if self.contains(&article.id) {
            return Err(StoreError::DuplicateId(article.id));
        }
        self.articles.push(article);
        Ok(())
    }

    fn find(&self, id: &str) -> Result<&Article> {
        let idx = self.position(id)?;
        Ok(&self.articles[idx])
    }

    fn list(&self) -> &[Article] {
        &self.articles
    }

    fn update(&mut self, id: &str, patch: ArticlePatch) -> Result<&Article> {
        let idx = self.position(id)?;
        let article = &mut self.articles[idx];
        patch.apply_to(article);
        debug!(id, "article updated");
        Ok(article)
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let idx = self.position(id)?;
        // `remove` keeps the remaining records in insertion order.
        self.articles.remove(idx);
        debug!(id, "article deleted");
        Ok(())
    }
}
