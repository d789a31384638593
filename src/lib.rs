//! # Quill
//!
//! A mock article API for developing admin UIs against. Quill keeps a
//! seeded in-memory set of articles and serves search, filtering,
//! pagination, and CRUD over HTTP.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌───────────────┐   ┌──────────────┐
//! │ SeedGenerator│──▶│ InMemoryStore │◀──│  HTTP (axum) │
//! └──────────────┘   └──────┬────────┘   │  /api/...    │
//!                           │ list()     └──────▲───────┘
//!                           ▼                   │
//!                    ┌─────────────┐            │
//!                    │ QueryEngine │────────────┘
//!                    └─────────────┘
//! ```
//!
//! The store, engine, validator and seeder live in `quill-core`; this crate
//! adds configuration, logging, the HTTP dispatcher and the CLI.
//!
//! ## Quick Start
//!
//! ```bash
//! quill serve                            # seed and serve on [server].bind
//! quill articles --search fuse           # one-shot query
//! quill seed --count 3                   # dump synthetic records
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`logging`] | Tracing subscriber setup |
//! | [`seed`] | Store construction from config |
//! | [`list`] | `quill articles` command |
//! | [`server`] | Article REST API |

pub mod config;
pub mod list;
pub mod logging;
pub mod seed;
pub mod server;
