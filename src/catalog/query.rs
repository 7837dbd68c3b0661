//! Catalog search queries.

use crate::cards::ColorSymbol;

/// A search against the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Full-text query in the catalog's search syntax.
    pub q: String,
    /// Sort order.
    pub order: String,
}

impl CatalogQuery {
    /// Legendary cards whose colour identity fits inside `signature`,
    /// restricted to paper printings.
    ///
    /// ```
    /// use commander_forge::catalog::CatalogQuery;
    ///
    /// let query = CatalogQuery::legendary_within("UWX");
    /// assert_eq!(query.q, "type:legendary id<=WU (game:paper)");
    /// ```
    #[must_use]
    pub fn legendary_within(signature: &str) -> Self {
        Self {
            q: format!(
                "type:legendary id<={} (game:paper)",
                catalog_signature(signature)
            ),
            order: "name".to_string(),
        }
    }
}

/// Normalize a colour signature for the catalog.
///
/// Keeps W, U, B, R and G once each in WUBRG order. Signatures without any
/// colour (empty, `C`, `X`) become `C`.
#[must_use]
pub fn catalog_signature(signature: &str) -> String {
    let upper = signature.to_uppercase();
    let present: String = ColorSymbol::WUBRG
        .iter()
        .filter(|symbol| upper.contains(symbol.as_char()))
        .map(|symbol| symbol.as_char())
        .collect();

    if present.is_empty() {
        ColorSymbol::Colorless.as_char().to_string()
    } else {
        present
    }
}
