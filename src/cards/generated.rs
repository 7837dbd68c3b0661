//! The synthesized card.
//!
//! A `GeneratedCard` is built once per generation and never mutated or
//! stored. The serialized form is a view for CLI/JSON consumers only.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::candidate::CandidateCard;

/// Credit for a card whose text was borrowed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCard {
    pub name: String,
    pub url: String,
}

impl From<&CandidateCard> for SourceCard {
    fn from(card: &CandidateCard) -> Self {
        Self {
            name: card.name.clone(),
            url: card.reference_url(),
        }
    }
}

/// A generated legendary creature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCard {
    /// Display cost, e.g. "2WU".
    pub mana_cost: String,

    /// Redacted rules lines in selection order.
    pub rules_text: Vec<String>,

    pub power: u32,
    pub toughness: u32,

    /// Colour signature the card was generated for ("C" when colourless).
    pub color_identity: String,

    /// Every candidate the text pool was drawn from.
    pub source_cards: Vec<SourceCard>,
}

impl fmt::Display for GeneratedCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cost = if self.mana_cost.is_empty() {
            "0"
        } else {
            self.mana_cost.as_str()
        };
        writeln!(f, "[{}] {}", self.color_identity, cost)?;
        writeln!(f, "Legendary Creature")?;
        writeln!(f)?;
        if self.rules_text.is_empty() {
            writeln!(f, "No rules text generated")?;
        } else {
            for line in &self.rules_text {
                writeln!(f, "{line}")?;
            }
        }
        writeln!(f)?;
        writeln!(f, "{}/{}", self.power, self.toughness)?;

        if !self.source_cards.is_empty() {
            writeln!(f)?;
            writeln!(f, "Sources:")?;
            for source in &self.source_cards {
                writeln!(f, "  {} <{}>", source.name, source.url)?;
            }
        }
        Ok(())
    }
}
