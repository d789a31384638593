//! # Quill CLI (`quill`)
//!
//! ## Usage
//!
//! ```bash
//! quill --config ./config/quill.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `quill serve` | Seed the store and start the HTTP API |
//! | `quill articles` | Run one search/filter/page query and print it |
//! | `quill seed` | Print a synthetic dataset as JSON |
//!
//! A missing config file is not an error; built-in defaults apply.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use quill::{config, list, logging, seed, server};

/// Quill — a mock article API with fuzzy search and pagination.
#[derive(Parser)]
#[command(name = "quill", version, about)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/quill.toml`. Server, seeding, and search
    /// settings are read from this file.
    #[arg(long, global = true, default_value = "./config/quill.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Start the article REST API.
    ///
    /// Binds to `[server].bind` and serves until interrupted.
    Serve,

    /// Query a freshly seeded store.
    ///
    /// Takes the same parameters as `GET /api/articles`. Page values that
    /// are not positive integers fall back to page 1 of 10.
    Articles {
        /// Free-text fuzzy search over title and author.
        #[arg(long)]
        search: Option<String>,

        /// Exact status filter: `published`, `draft`, or `in_review`.
        #[arg(long)]
        status: Option<String>,

        /// 1-indexed page number.
        #[arg(long)]
        page: Option<String>,

        /// Page size.
        #[arg(long)]
        limit: Option<String>,
    },

    /// Print synthetic articles as JSON.
    Seed {
        /// Number of records (defaults to the configured environment's count).
        #[arg(long)]
        count: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();
    let cfg = config::load_or_default(&cli.config)?;

    match cli.command {
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Articles {
            search,
            status,
            page,
            limit,
        } => {
            list::run_list(&cfg, search, status, page, limit)?;
        }
        Commands::Seed { count } => {
            seed::run_seed(&cfg, count)?;
        }
    }

    Ok(())
}
