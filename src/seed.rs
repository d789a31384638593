//! Store construction and the `quill seed` command.

use anyhow::Result;
use chrono::Utc;
use quill_core::seed::{seed_store, SeedGenerator};
use quill_core::store::memory::InMemoryStore;
use quill_core::store::ArticleStore;

use crate::config::Config;

/// Build a store populated according to `[seed]`.
pub fn build_store(config: &Config) -> Result<InMemoryStore> {
    build_store_with_count(config, config.seed.effective_count())
}

fn build_store_with_count(config: &Config, count: usize) -> Result<InMemoryStore> {
    let mut store = InMemoryStore::new();
    let mut generator = SeedGenerator::new(config.seed.rng_seed);
    seed_store(&mut store, &mut generator, count, Utc::now())?;
    Ok(store)
}

/// CLI entry point: print a freshly seeded dataset as pretty JSON.
pub fn run_seed(config: &Config, count: Option<usize>) -> Result<()> {
    let count = count.unwrap_or_else(|| config.seed.effective_count());
    let store = build_store_with_count(config, count)?;
    println!("{}", serde_json::to_string_pretty(store.list())?);
    Ok(())
}
