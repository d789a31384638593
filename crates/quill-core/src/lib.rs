//! # Quill Core
//!
//! Transport-agnostic logic for Quill: the article data model, the
//! in-memory record store, fuzzy scoring, the query engine (search, status
//! filter, pagination), payload validation, and synthetic seeding.
//!
//! This crate contains no tokio, axum, or filesystem I/O. The `quill`
//! crate binds it to an HTTP listener; tests and other frontends can drive
//! it directly.
//!
//! ```text
//! SeedGenerator ──▶ InMemoryStore ◀── create / update / delete
//!                        │
//!                     list()
//!                        ▼
//!                   QueryEngine ──▶ QueryPage { articles, meta }
//! ```

pub mod display;
pub mod error;
pub mod fuzzy;
pub mod models;
pub mod query;
pub mod schema;
pub mod seed;
pub mod store;

pub use error::{Result, StoreError};
