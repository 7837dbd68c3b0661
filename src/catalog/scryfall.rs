//! Scryfall search client.
//!
//! Uses `ureq` (sync). Callers on an async runtime should run fetches in
//! `tokio::task::spawn_blocking`. Non-success statuses are read rather than
//! raised so the catalog's own `details` message can be passed through.

use serde::Deserialize;
use tracing::debug;

use crate::core::ForgeConfig;
use crate::error::{CatalogError, UPSTREAM_FALLBACK_MESSAGE};

use super::client::{CatalogClient, CatalogPage, PageRequest};

/// Error object returned by the catalog on failure.
#[derive(Debug, Deserialize)]
struct CatalogErrorBody {
    #[serde(default)]
    details: Option<String>,
}

/// HTTP client for the Scryfall card search API.
#[derive(Clone, Debug)]
pub struct ScryfallClient {
    agent: ureq::Agent,
    search_url: String,
    user_agent: String,
}

impl ScryfallClient {
    /// Build a client from configuration.
    #[must_use]
    pub fn new(config: &ForgeConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(config.request_timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            search_url: config.catalog_url.clone(),
            user_agent: config.user_agent.clone(),
        }
    }

    /// The search endpoint this client talks to.
    #[must_use]
    pub fn search_url(&self) -> &str {
        &self.search_url
    }
}

impl CatalogClient for ScryfallClient {
    fn fetch_page(&self, request: &PageRequest) -> Result<CatalogPage, CatalogError> {
        let builder = match request {
            PageRequest::Search(query) => {
                debug!(url = %self.search_url, q = %query.q, "searching catalog");
                self.agent
                    .get(&self.search_url)
                    .query("q", &query.q)
                    .query("order", &query.order)
            }
            PageRequest::Next(url) => {
                debug!(%url, "following catalog page link");
                self.agent.get(url)
            }
        };

        let response = builder
            .header("Accept", "application/json")
            .header("User-Agent", &self.user_agent)
            .call()
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| CatalogError::Transport(format!("error reading response body: {e}")))?;

        decode_page(status, &body)
    }
}

/// Turn a raw status and body into a page or an error.
pub(crate) fn decode_page(status: u16, body: &str) -> Result<CatalogPage, CatalogError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<CatalogErrorBody>(body)
            .ok()
            .and_then(|e| e.details)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| UPSTREAM_FALLBACK_MESSAGE.to_string());
        return Err(CatalogError::Upstream { status, message });
    }

    serde_json::from_str(body).map_err(|e| CatalogError::Decode(e.to_string()))
}
