//! Cost parsing: free-form mana cost text into a budget.
//!
//! `"3WUBRG"` parses to a numeric part of 3, colour symbols `WUBRG` and a
//! converted mana cost of 8. Parsing never fails; anything unrecognized is
//! dropped.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A single mana symbol recognized in a cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorSymbol {
    White,
    Blue,
    Black,
    Red,
    Green,
    Colorless,
    /// Variable cost. Counts toward CMC like any other symbol.
    X,
}

impl ColorSymbol {
    /// The five colours in canonical WUBRG order.
    pub const WUBRG: [ColorSymbol; 5] = [
        ColorSymbol::White,
        ColorSymbol::Blue,
        ColorSymbol::Black,
        ColorSymbol::Red,
        ColorSymbol::Green,
    ];

    /// Parse an uppercase symbol letter.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'W' => Some(ColorSymbol::White),
            'U' => Some(ColorSymbol::Blue),
            'B' => Some(ColorSymbol::Black),
            'R' => Some(ColorSymbol::Red),
            'G' => Some(ColorSymbol::Green),
            'C' => Some(ColorSymbol::Colorless),
            'X' => Some(ColorSymbol::X),
            _ => None,
        }
    }

    /// The symbol's letter.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            ColorSymbol::White => 'W',
            ColorSymbol::Blue => 'U',
            ColorSymbol::Black => 'B',
            ColorSymbol::Red => 'R',
            ColorSymbol::Green => 'G',
            ColorSymbol::Colorless => 'C',
            ColorSymbol::X => 'X',
        }
    }

    /// True for W, U, B, R and G.
    #[must_use]
    pub const fn is_color(self) -> bool {
        !matches!(self, ColorSymbol::Colorless | ColorSymbol::X)
    }
}

impl fmt::Display for ColorSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Parsed cost budget.
///
/// ## Example
///
/// ```
/// use commander_forge::cards::CostSpec;
///
/// let cost = CostSpec::parse("2WU");
/// assert_eq!(cost.numeric_part, 2);
/// assert_eq!(cost.symbols_string(), "WU");
/// assert_eq!(cost.cmc(), 4);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostSpec {
    /// Leading generic mana.
    pub numeric_part: u32,

    /// Recognized symbols in input order, duplicates kept.
    pub color_symbols: SmallVec<[ColorSymbol; 8]>,
}

impl CostSpec {
    /// Parse free-form cost text.
    ///
    /// Whitespace is removed and the text uppercased. A leading run of
    /// digits becomes the numeric part (saturating on overflow); of the
    /// remainder only W, U, B, R, G, C and X are kept.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let cleaned: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect();

        let digits_end = cleaned
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(cleaned.len());
        let (digits, rest) = cleaned.split_at(digits_end);

        let numeric_part = if digits.is_empty() {
            0
        } else {
            digits.parse::<u32>().unwrap_or(u32::MAX)
        };

        let color_symbols = rest.chars().filter_map(ColorSymbol::from_char).collect();

        Self {
            numeric_part,
            color_symbols,
        }
    }

    /// Converted mana cost: numeric part plus one per symbol.
    #[must_use]
    pub fn cmc(&self) -> u32 {
        let symbols = u32::try_from(self.color_symbols.len()).unwrap_or(u32::MAX);
        self.numeric_part.saturating_add(symbols)
    }

    /// The recognized symbols as a string, possibly empty.
    #[must_use]
    pub fn symbols_string(&self) -> String {
        self.color_symbols.iter().map(|s| s.as_char()).collect()
    }

    /// Colour signature used downstream: the symbols, or `"C"` when none.
    #[must_use]
    pub fn color_identity(&self) -> String {
        if self.color_symbols.is_empty() {
            ColorSymbol::Colorless.as_char().to_string()
        } else {
            self.symbols_string()
        }
    }

    /// Display form of the cost, e.g. `"3WU"`, `"WU"` or `""`.
    #[must_use]
    pub fn mana_cost(&self) -> String {
        if self.numeric_part > 0 {
            format!("{}{}", self.numeric_part, self.symbols_string())
        } else {
            self.symbols_string()
        }
    }
}
