//! Card data: cost budgets, catalog candidates and generated cards.
//!
//! ## Key Types
//!
//! - `CostSpec`: Parsed mana cost (numeric part, colour symbols, CMC)
//! - `ColorSymbol`: One of W, U, B, R, G, C, X
//! - `CandidateCard`: A real card record from the catalog
//! - `GeneratedCard`: The synthesized legendary creature
//! - `SourceCard`: Credit line for a borrowed card

pub mod candidate;
pub mod cost;
pub mod generated;

pub use candidate::CandidateCard;
pub use cost::{ColorSymbol, CostSpec};
pub use generated::{GeneratedCard, SourceCard};
