//! Corpus fetcher: walk the catalog's pages and collect legendary creatures.
//!
//! The loop requests one page at a time and keeps going while the catalog
//! reports more pages and fewer than `cap` candidates have been collected.
//!
//! ## Failure policy
//!
//! - First page fails: the error is returned as-is.
//! - A later page fails: stop and keep what was collected.
//! - Wall-clock budget spent: stop before the next page and keep what was
//!   collected.
//! - Nothing collected: `CatalogError::NoResults`.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::cards::CandidateCard;
use crate::core::{ForgeConfig, DEFAULT_CANDIDATE_CAP};
use crate::error::CatalogError;

use super::client::{CatalogClient, PageRequest};
use super::query::CatalogQuery;

/// Collects candidate cards for a colour signature.
#[derive(Clone, Debug)]
pub struct CorpusFetcher<C> {
    client: C,
    cap: usize,
    timeout: Duration,
}

impl<C: CatalogClient> CorpusFetcher<C> {
    /// Create a fetcher with the default cap and a 30 second budget.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self {
            client,
            cap: DEFAULT_CANDIDATE_CAP,
            timeout: Duration::from_secs(30),
        }
    }

    /// Create a fetcher using the configured cap and budget.
    #[must_use]
    pub fn from_config(client: C, config: &ForgeConfig) -> Self {
        Self {
            client,
            cap: config.candidate_cap,
            timeout: config.fetch_timeout,
        }
    }

    /// Set the candidate cap.
    #[must_use]
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    /// Set the wall-clock budget for following pages.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The underlying catalog client.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Fetch legendary creatures within `color_signature`.
    pub fn fetch(&self, color_signature: &str) -> Result<Vec<CandidateCard>, CatalogError> {
        let started = Instant::now();
        let mut request = PageRequest::Search(CatalogQuery::legendary_within(color_signature));
        let mut candidates: Vec<CandidateCard> = Vec::new();
        let mut pages = 0usize;

        loop {
            let page = match self.client.fetch_page(&request) {
                Ok(page) => page,
                Err(err) if pages == 0 => return Err(err),
                Err(err) => {
                    warn!(
                        pages,
                        collected = candidates.len(),
                        error = %err,
                        "catalog page failed, keeping partial results"
                    );
                    break;
                }
            };
            pages += 1;

            let received = page.data.len();
            candidates.extend(
                page.data
                    .into_iter()
                    .filter(CandidateCard::is_legendary_creature),
            );
            debug!(page = pages, received, collected = candidates.len(), "catalog page read");

            let next = match page.next_page {
                Some(link) if page.has_more => link,
                _ => break,
            };
            if candidates.len() >= self.cap {
                debug!(cap = self.cap, "candidate cap reached");
                break;
            }
            if started.elapsed() >= self.timeout {
                warn!(
                    pages,
                    collected = candidates.len(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "catalog fetch budget spent, keeping partial results"
                );
                break;
            }
            request = PageRequest::Next(next);
        }

        candidates.truncate(self.cap);
        if candidates.is_empty() {
            return Err(CatalogError::NoResults);
        }
        Ok(candidates)
    }
}
