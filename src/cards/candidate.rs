//! Candidate cards as returned by the catalog.
//!
//! Field names on the wire follow the catalog (`oracle_text`, `type_line`,
//! `scryfall_uri`). Every field besides `name` is optional there; missing
//! text fields deserialize as empty strings.

use serde::{Deserialize, Serialize};

/// Base URL for card pages built from a record id.
const CARD_PAGE_BASE: &str = "https://scryfall.com/card/";

/// Base URL for exact-name searches.
const NAME_SEARCH_BASE: &str = "https://scryfall.com/search?q=";

/// A real card borrowed from the catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateCard {
    /// Card name.
    pub name: String,

    /// Rules text, lines separated by `\n`. May be empty.
    #[serde(default)]
    pub oracle_text: String,

    /// Printed cost, kept for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,

    /// Full type line, e.g. "Legendary Creature — Elf Druid".
    #[serde(default)]
    pub type_line: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toughness: Option<String>,

    /// Canonical page for the card, when the catalog supplies one.
    #[serde(
        default,
        rename = "scryfall_uri",
        skip_serializing_if = "Option::is_none"
    )]
    pub identifier_uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl CandidateCard {
    /// Create a candidate with a name and type line.
    #[must_use]
    pub fn new(name: impl Into<String>, type_line: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_line: type_line.into(),
            ..Self::default()
        }
    }

    /// Set the rules text (builder pattern).
    #[must_use]
    pub fn with_oracle_text(mut self, text: impl Into<String>) -> Self {
        self.oracle_text = text.into();
        self
    }

    /// Set the canonical URI (builder pattern).
    #[must_use]
    pub fn with_identifier_uri(mut self, uri: impl Into<String>) -> Self {
        self.identifier_uri = Some(uri.into());
        self
    }

    /// Set the record id (builder pattern).
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Whether the type line names a legendary creature.
    ///
    /// Plain case-insensitive substring checks, so "Legendary Enchantment
    /// Creature — God" and "Legendary Artifact Creature" both qualify.
    #[must_use]
    pub fn is_legendary_creature(&self) -> bool {
        let type_line = self.type_line.to_lowercase();
        type_line.contains("legendary") && type_line.contains("creature")
    }

    /// External reference for crediting this card.
    ///
    /// Prefers the catalog URI, then a page built from the id, then an
    /// exact-name search.
    #[must_use]
    pub fn reference_url(&self) -> String {
        if let Some(uri) = self.identifier_uri.as_deref().filter(|u| !u.is_empty()) {
            return uri.to_string();
        }
        if let Some(id) = self.id.as_deref().filter(|id| !id.is_empty()) {
            return format!("{CARD_PAGE_BASE}{id}");
        }
        format!("{NAME_SEARCH_BASE}!\"{}\"", percent_encode(&self.name))
    }
}

/// Percent-encode a URI component.
///
/// Leaves the unreserved set plus `! * ' ( )` untouched.
pub(crate) fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'~'
            | b'!'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
