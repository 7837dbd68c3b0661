//! Runtime configuration.
//!
//! `ForgeConfig` collects everything the pipeline needs from outside:
//! - Where the catalog lives and how long to wait for it
//! - How many candidates a single fetch may collect
//! - An optional fixed seed for reproducible generations
//! - Where the HTTP boundary listens
//!
//! Values come from `Default`, then `from_env()`, then CLI flags.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Scryfall card search endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://api.scryfall.com/cards/search";

/// Upper bound on candidates collected by one fetch.
pub const DEFAULT_CANDIDATE_CAP: usize = 1000;

/// Complete forge configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForgeConfig {
    /// Catalog search endpoint.
    pub catalog_url: String,

    /// Stop following pages once this many candidates are collected.
    pub candidate_cap: usize,

    /// Wall-clock budget for the whole page-following loop.
    pub fetch_timeout: Duration,

    /// Timeout for a single catalog request.
    pub request_timeout: Duration,

    /// User-Agent sent to the catalog.
    pub user_agent: String,

    /// Fixed seed. `None` draws a fresh seed per request.
    pub seed: Option<u64>,

    /// Address the HTTP server binds to.
    pub bind_addr: String,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            candidate_cap: DEFAULT_CANDIDATE_CAP,
            fetch_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(10),
            user_agent: concat!("commander-forge/", env!("CARGO_PKG_VERSION")).to_string(),
            seed: None,
            bind_addr: "127.0.0.1:3000".to_string(),
        }
    }
}

impl ForgeConfig {
    /// Defaults overlaid with `FORGE_*` environment variables.
    ///
    /// Unparseable values are logged and ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary key lookup.
    #[must_use]
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("FORGE_CATALOG_URL").filter(|v| !v.is_empty()) {
            self.catalog_url = url;
        }
        if let Some(cap) = parse_var::<usize>(&lookup, "FORGE_CANDIDATE_CAP") {
            self.candidate_cap = cap;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "FORGE_FETCH_TIMEOUT_SECS") {
            self.fetch_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "FORGE_REQUEST_TIMEOUT_SECS") {
            self.request_timeout = Duration::from_secs(secs);
        }
        if let Some(agent) = lookup("FORGE_USER_AGENT").filter(|v| !v.is_empty()) {
            self.user_agent = agent;
        }
        if let Some(seed) = parse_var::<u64>(&lookup, "FORGE_SEED") {
            self.seed = Some(seed);
        }
        if let Some(addr) = lookup("FORGE_BIND_ADDR").filter(|v| !v.is_empty()) {
            self.bind_addr = addr;
        }
        self
    }

    /// Set the catalog endpoint.
    #[must_use]
    pub fn with_catalog_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_url = url.into();
        self
    }

    /// Set the candidate cap.
    #[must_use]
    pub fn with_candidate_cap(mut self, cap: usize) -> Self {
        self.candidate_cap = cap;
        self
    }

    /// Set the page-following wall-clock budget.
    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set the timeout for a single catalog request.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the User-Agent sent to the catalog.
    #[must_use]
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Fix the seed for reproducible output.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the server bind address.
    #[must_use]
    pub fn with_bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = addr.into();
        self
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable environment override");
            None
        }
    }
}
