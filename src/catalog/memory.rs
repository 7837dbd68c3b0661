//! Local card list served through the catalog interface.
//!
//! Used for offline generation from a saved card dump and for exercising
//! the pagination loop. The search query is not interpreted: every search
//! returns the stored cards, split into fixed-size pages.

use std::sync::Mutex;

use rustc_hash::FxHashMap;

use crate::cards::CandidateCard;
use crate::error::CatalogError;

use super::client::{CatalogClient, CatalogPage, PageRequest};

const PAGE_LINK_PREFIX: &str = "memory://page/";

/// In-memory paginated catalog.
#[derive(Debug)]
pub struct InMemoryCatalog {
    cards: Vec<CandidateCard>,
    page_size: usize,
    failures: FxHashMap<usize, CatalogError>,
    requests: Mutex<Vec<PageRequest>>,
}

impl InMemoryCatalog {
    /// Serve `cards` in pages of `page_size` (minimum 1).
    #[must_use]
    pub fn new(cards: Vec<CandidateCard>, page_size: usize) -> Self {
        Self {
            cards,
            page_size: page_size.max(1),
            failures: FxHashMap::default(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Serve all cards as a single page.
    #[must_use]
    pub fn single_page(cards: Vec<CandidateCard>) -> Self {
        let size = cards.len();
        Self::new(cards, size)
    }

    /// Make the page at `index` (0-based) fail with `error`.
    #[must_use]
    pub fn fail_page(mut self, index: usize, error: CatalogError) -> Self {
        self.failures.insert(index, error);
        self
    }

    /// Number of pages the stored cards span (at least one).
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.cards.len().div_ceil(self.page_size).max(1)
    }

    /// Every request served so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn page(&self, index: usize) -> Result<CatalogPage, CatalogError> {
        if let Some(error) = self.failures.get(&index) {
            return Err(error.clone());
        }
        if index >= self.page_count() {
            return Err(CatalogError::Upstream {
                status: 404,
                message: format!("page {index} does not exist"),
            });
        }

        let start = index * self.page_size;
        let end = (start + self.page_size).min(self.cards.len());
        let data = self.cards.get(start..end).unwrap_or_default().to_vec();
        let has_more = index + 1 < self.page_count();

        Ok(CatalogPage {
            data,
            has_more,
            next_page: has_more.then(|| format!("{PAGE_LINK_PREFIX}{}", index + 1)),
        })
    }
}

impl CatalogClient for InMemoryCatalog {
    fn fetch_page(&self, request: &PageRequest) -> Result<CatalogPage, CatalogError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let index = match request {
            PageRequest::Search(_) => 0,
            PageRequest::Next(link) => link
                .strip_prefix(PAGE_LINK_PREFIX)
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| CatalogError::Decode(format!("unknown page link '{link}'")))?,
        };

        self.page(index)
    }
}
