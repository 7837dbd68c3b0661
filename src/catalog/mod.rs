//! Remote card catalog: queries, pagination and candidate collection.
//!
//! ## Key Types
//!
//! - `CatalogClient`: Fetches one page for a `PageRequest`
//! - `ScryfallClient`: HTTP implementation against the Scryfall search API
//! - `InMemoryCatalog`: Serves a local card list in pages
//! - `CorpusFetcher`: Follows pages until exhausted, capped or out of time

pub mod client;
pub mod fetcher;
pub mod memory;
pub mod query;
pub mod scryfall;

pub use client::{CatalogClient, CatalogPage, PageRequest};
pub use fetcher::CorpusFetcher;
pub use memory::InMemoryCatalog;
pub use query::{catalog_signature, CatalogQuery};
pub use scryfall::ScryfallClient;
