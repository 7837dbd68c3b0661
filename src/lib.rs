//! # commander-forge
//!
//! Procedurally synthesizes a legendary creature card from a mana cost by
//! sampling rules text from real legendary creatures of the same colour
//! identity.
//!
//! ## Design Principles
//!
//! 1. **Catalog-Agnostic**: Candidate acquisition goes through the
//!    `CatalogClient` trait. Scryfall is one implementation; an in-memory
//!    catalog serves offline dumps and tests.
//!
//! 2. **Injected Randomness**: Every random decision draws from a
//!    `RandomSource`. Seeded `GameRng` gives reproducible cards; `ScriptedRng`
//!    pins exact draw sequences.
//!
//! 3. **Request Isolation**: Each request owns its candidates, line pool and
//!    RNG. No state is shared between requests.
//!
//! ## Modules
//!
//! - `core`: RNG and configuration
//! - `cards`: Cost parsing, candidate records, generated cards
//! - `catalog`: Catalog clients, query building, the paginating fetcher
//! - `synthesis`: Sampling, text extraction, name redaction, the trial loop
//! - `forge`: Request-level orchestration
//! - `serve`: HTTP JSON boundary
//! - `error`: Error taxonomy and HTTP status mapping

pub mod core;
pub mod cards;
pub mod catalog;
pub mod synthesis;
pub mod forge;
pub mod serve;
pub mod error;

// Re-export commonly used types
pub use crate::core::{ForgeConfig, GameRng, GameRngState, RandomSource, ScriptedRng};

pub use crate::cards::{CandidateCard, ColorSymbol, CostSpec, GeneratedCard, SourceCard};

pub use crate::catalog::{
    catalog_signature, CatalogClient, CatalogPage, CatalogQuery, CorpusFetcher,
    InMemoryCatalog, PageRequest, ScryfallClient,
};

pub use crate::synthesis::{
    extract_creature_types, extract_rules_lines, generate_card, redact_names, sample, shuffle,
    synthesize, Redactor,
};

pub use crate::forge::Forge;

pub use crate::error::{CatalogError, ForgeError};
