//! The catalog seam.
//!
//! The fetcher only needs "give me this page". `ScryfallClient` answers
//! over HTTP; `InMemoryCatalog` answers from a local card list.

use serde::{Deserialize, Serialize};

use crate::cards::CandidateCard;
use crate::error::CatalogError;

use super::query::CatalogQuery;

/// Which page to fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageRequest {
    /// First page of a search.
    Search(CatalogQuery),
    /// A continuation link taken from the previous page.
    Next(String),
}

/// One page of search results.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub data: Vec<CandidateCard>,

    /// Whether the catalog has more pages for this search.
    #[serde(default)]
    pub has_more: bool,

    /// Link to the next page when `has_more` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
}

/// A paginated card search service.
pub trait CatalogClient: Send + Sync {
    /// Fetch a single page.
    fn fetch_page(&self, request: &PageRequest) -> Result<CatalogPage, CatalogError>;
}

impl<C: CatalogClient + ?Sized> CatalogClient for std::sync::Arc<C> {
    fn fetch_page(&self, request: &PageRequest) -> Result<CatalogPage, CatalogError> {
        (**self).fetch_page(request)
    }
}

impl<C: CatalogClient + ?Sized> CatalogClient for &C {
    fn fetch_page(&self, request: &PageRequest) -> Result<CatalogPage, CatalogError> {
        (**self).fetch_page(request)
    }
}
