//! Synthetic article generation for populating a fresh store.
//!
//! Titles are hacker-jargon phrases, authors are "First Last" names,
//! statuses are drawn uniformly from the enumeration, and `createdAt` lies
//! somewhere in the two years before the reference time. Given an
//! `rng_seed` the output (ids included) is fully deterministic.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tracing::info;
use uuid::Builder;

use crate::error::Result;
use crate::models::{Article, ArticleStatus};
use crate::schema::TITLE_MAX_CHARS;
use crate::store::ArticleStore;

const TWO_YEARS_MS: i64 = 2 * 365 * 24 * 60 * 60 * 1000;

/// Operating context that decides how many records are seeded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedEnvironment {
    /// Small fixed dataset for automated tests.
    Test,
    /// Browsable dataset for interactive development.
    #[default]
    Development,
}

impl SeedEnvironment {
    pub fn default_count(&self) -> usize {
        match self {
            SeedEnvironment::Test => 5,
            SeedEnvironment::Development => 35,
        }
    }
}

const ABBREVIATIONS: &[&str] = &[
    "ADP", "AGP", "AI", "CSS", "FTP", "HDD", "HTTP", "IB", "JBOD", "JSON", "PCI", "RAM", "SAS",
    "SCSI", "SDD", "SMS", "SMTP", "SQL", "SSL", "TCP", "USB", "XML", "XSS",
];

const ADJECTIVES: &[&str] = &[
    "auxiliary", "primary", "back-end", "digital", "open-source", "virtual", "cross-platform",
    "redundant", "online", "haptic", "multi-byte", "bluetooth", "wireless", "1080p", "neural",
    "optical", "solid state", "mobile",
];

const NOUNS: &[&str] = &[
    "driver", "protocol", "bandwidth", "panel", "microchip", "program", "port", "card", "array",
    "interface", "system", "sensor", "firewall", "hard drive", "pixel", "alarm", "feed",
    "monitor", "application", "transmitter", "bus", "circuit", "capacitor", "matrix",
];

const VERBS: &[&str] = &[
    "back up", "bypass", "hack", "override", "compress", "copy", "navigate", "index", "connect",
    "generate", "quantify", "calculate", "synthesize", "input", "transmit", "program", "reboot",
    "parse",
];

const ING_VERBS: &[&str] = &[
    "backing up", "bypassing", "hacking", "overriding", "compressing", "copying", "navigating",
    "indexing", "connecting", "generating", "quantifying", "calculating", "synthesizing",
    "transmitting", "programming", "parsing",
];

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Claude", "Dennis", "Edsger", "Frances", "Grace", "Hedy", "Ivan",
    "Jean", "Ken", "Leslie", "Margaret", "Niklaus", "Radia", "Shafi", "Tim", "Whitfield",
    "Yukihiro",
];

const LAST_NAMES: &[&str] = &[
    "Allen", "Bartik", "Cerf", "Dijkstra", "Engelbart", "Floyd", "Goldwasser", "Hamilton",
    "Hopper", "Kay", "Knuth", "Lamport", "Liskov", "Matsumoto", "Perlman", "Ritchie", "Sutherland",
    "Thompson", "Turing", "Wirth",
];

/// Generates synthetic articles.
pub struct SeedGenerator {
    rng: StdRng,
}

impl SeedGenerator {
    /// Deterministic when `rng_seed` is given, entropy-seeded otherwise.
    pub fn new(rng_seed: Option<u64>) -> Self {
        let rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Produce `count` articles created before `now`.
    pub fn generate(&mut self, count: usize, now: DateTime<Utc>) -> Vec<Article> {
        (0..count).map(|_| self.article(now)).collect()
    }

    fn article(&mut self, now: DateTime<Utc>) -> Article {
        let id = Builder::from_random_bytes(self.rng.gen()).into_uuid().to_string();
        let title = self.title();
        let author = format!(
            "{} {}",
            pick(&mut self.rng, FIRST_NAMES),
            pick(&mut self.rng, LAST_NAMES)
        );
        let status = ArticleStatus::ALL[self.rng.gen_range(0..ArticleStatus::ALL.len())];
        let age = Duration::milliseconds(self.rng.gen_range(1..=TWO_YEARS_MS));

        Article {
            id,
            title,
            author,
            status,
            created_at: now - age,
        }
    }

    fn title(&mut self) -> String {
        loop {
            let phrase = self.phrase();
            if phrase.chars().count() <= TITLE_MAX_CHARS {
                return capitalize(&phrase);
            }
        }
    }

    fn phrase(&mut self) -> String {
        let rng = &mut self.rng;
        match rng.gen_range(0..6) {
            0 => format!(
                "If we {} the {}, we can get to the {} {} through the {} {} {}!",
                pick(rng, VERBS),
                pick(rng, NOUNS),
                pick(rng, ABBREVIATIONS),
                pick(rng, NOUNS),
                pick(rng, ADJECTIVES),
                pick(rng, ABBREVIATIONS),
                pick(rng, NOUNS)
            ),
            1 => format!(
                "We need to {} the {} {} {}!",
                pick(rng, VERBS),
                pick(rng, ADJECTIVES),
                pick(rng, ABBREVIATIONS),
                pick(rng, NOUNS)
            ),
            2 => format!(
                "Try to {} the {} {}, maybe it will {} the {} {}!",
                pick(rng, VERBS),
                pick(rng, ABBREVIATIONS),
                pick(rng, NOUNS),
                pick(rng, VERBS),
                pick(rng, ADJECTIVES),
                pick(rng, NOUNS)
            ),
            3 => format!(
                "You can't {} the {} without {} the {} {} {}!",
                pick(rng, VERBS),
                pick(rng, NOUNS),
                pick(rng, ING_VERBS),
                pick(rng, ADJECTIVES),
                pick(rng, ABBREVIATIONS),
                pick(rng, NOUNS)
            ),
            4 => format!(
                "Use the {} {} {}, then you can {} the {} {}!",
                pick(rng, ADJECTIVES),
                pick(rng, ABBREVIATIONS),
                pick(rng, NOUNS),
                pick(rng, VERBS),
                pick(rng, ADJECTIVES),
                pick(rng, NOUNS)
            ),
            _ => format!(
                "The {} {} is down, {} the {} {} so we can {} the {} {}!",
                pick(rng, ABBREVIATIONS),
                pick(rng, NOUNS),
                pick(rng, VERBS),
                pick(rng, ADJECTIVES),
                pick(rng, NOUNS),
                pick(rng, VERBS),
                pick(rng, ABBREVIATIONS),
                pick(rng, NOUNS)
            ),
        }
    }
}

fn pick<'a>(rng: &mut StdRng, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Generate `count` articles and insert them into `store`.
///
/// Returns the number of records inserted.
pub fn seed_store<S: ArticleStore>(
    store: &mut S,
    generator: &mut SeedGenerator,
    count: usize,
    now: DateTime<Utc>,
) -> Result<usize> {
    for article in generator.generate(count, now) {
        store.insert(article)?;
    }
    info!(count, total = store.len(), "store seeded");
    Ok(count)
}
