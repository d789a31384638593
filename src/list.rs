//! The `quill articles` command: one query over a freshly seeded store.

use anyhow::Result;
use quill_core::display::{format_date, DateFormat};
use quill_core::query::{ArticleQuery, PageRequest};
use quill_core::store::ArticleStore;

use crate::config::Config;
use crate::seed::build_store;
use crate::server::build_engine;

pub fn run_list(
    config: &Config,
    search: Option<String>,
    status: Option<String>,
    page: Option<String>,
    limit: Option<String>,
) -> Result<()> {
    let store = build_store(config)?;
    let engine = build_engine(config);

    let query = ArticleQuery::new(
        search.unwrap_or_default(),
        status.unwrap_or_default(),
        PageRequest::parse(page.as_deref(), limit.as_deref()),
    );
    let result = engine.run(store.list(), &query);

    if result.articles.is_empty() {
        println!("No articles.");
    }

    let offset = result
        .meta
        .page
        .saturating_sub(1)
        .saturating_mul(result.meta.page_size);
    for (i, article) in result.articles.iter().enumerate() {
        println!(
            "{}. [{}] {}",
            offset.saturating_add(i + 1),
            article.status,
            article.title
        );
        println!("    author:  {}", article.author);
        println!(
            "    created: {}",
            format_date(&article.created_at, DateFormat::default())
        );
        println!("    id:      {}", article.id);
        println!();
    }

    println!(
        "page {}/{} ({} per page), {} matching",
        result.meta.page, result.meta.total_pages, result.meta.page_size, result.meta.total
    );

    Ok(())
}
