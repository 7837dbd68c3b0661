//! Flatten candidate text into borrowable pieces.

use rustc_hash::FxHashSet;

use crate::cards::CandidateCard;

/// Split every candidate's rules text into trimmed, non-empty lines.
///
/// Order is candidate order, then line order. Identical lines from
/// different candidates are all kept.
#[must_use]
pub fn extract_rules_lines(cards: &[CandidateCard]) -> Vec<String> {
    cards
        .iter()
        .filter(|card| !card.oracle_text.is_empty())
        .flat_map(|card| card.oracle_text.split('\n'))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Distinct creature subtypes across the candidates' type lines.
///
/// Takes whatever follows "Creature —" (any case), splits it on further
/// em-dashes and keeps each trimmed segment once, in first-seen order.
#[must_use]
pub fn extract_creature_types(cards: &[CandidateCard]) -> Vec<String> {
    let mut seen = FxHashSet::default();
    let mut types = Vec::new();

    for card in cards {
        let Some(subtypes) = subtypes_after_creature(&card.type_line) else {
            continue;
        };
        for segment in subtypes.split('—').map(str::trim) {
            if !segment.is_empty() && seen.insert(segment) {
                types.push(segment.to_string());
            }
        }
    }

    types
}

fn subtypes_after_creature(type_line: &str) -> Option<&str> {
    const KEYWORD: &str = "creature";

    let lowered = type_line.to_ascii_lowercase();
    lowered.match_indices(KEYWORD).find_map(|(start, _)| {
        let rest = type_line[start + KEYWORD.len()..].trim_start();
        let subtypes = rest.strip_prefix('—')?.trim_start();
        (!subtypes.is_empty()).then_some(subtypes)
    })
}
