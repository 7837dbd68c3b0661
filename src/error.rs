//! Error taxonomy for candidate acquisition.
//!
//! Parsing, sampling and synthesis never fail. Only fetching candidates
//! can, and each failure maps to one HTTP status at the boundary.

/// Message used when the catalog gives no detail of its own.
pub const UPSTREAM_FALLBACK_MESSAGE: &str = "Failed to fetch from Scryfall";

/// Message for internal failures. Details stay in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "Failed to fetch cards from Scryfall";

/// Failures while walking the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// The catalog answered with a non-success status.
    #[error("catalog returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Pages were read, but nothing survived the legendary-creature filter.
    #[error("No legendary creatures found for this color identity")]
    NoResults,

    /// The request never completed (connect, TLS, timeout).
    #[error("catalog transport failure: {0}")]
    Transport(String),

    /// The response body was not a catalog page.
    #[error("malformed catalog response: {0}")]
    Decode(String),
}

/// Failures surfaced to callers of the forge.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ForgeError {
    /// A required request parameter was absent.
    #[error("{0}")]
    MissingParameter(&'static str),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl ForgeError {
    /// Missing colour identity on a candidates request.
    #[must_use]
    pub const fn missing_color_identity() -> Self {
        ForgeError::MissingParameter("Color identity is required")
    }

    /// HTTP status for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            ForgeError::MissingParameter(_) => 400,
            ForgeError::Catalog(CatalogError::NoResults) => 404,
            ForgeError::Catalog(CatalogError::Upstream { status, .. }) => *status,
            ForgeError::Catalog(CatalogError::Transport(_) | CatalogError::Decode(_)) => 500,
        }
    }

    /// Message safe to return to a client.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            ForgeError::MissingParameter(message) => (*message).to_string(),
            ForgeError::Catalog(CatalogError::NoResults) => CatalogError::NoResults.to_string(),
            ForgeError::Catalog(CatalogError::Upstream { message, .. }) => message.clone(),
            ForgeError::Catalog(CatalogError::Transport(_) | CatalogError::Decode(_)) => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }
}
