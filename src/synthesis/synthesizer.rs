//! The card synthesis loop.
//!
//! Power and toughness start at the CMC. The loop runs exactly CMC trials:
//!
//! 1. With probability [`LINE_CHANCE`] draw a line uniformly from the pool.
//! 2. A line already taken in this synthesis ends the trial with no effect.
//! 3. Otherwise the redacted line is appended and, with probability
//!    [`PENALTY_CHANCE`], power or toughness (even odds) drops by one,
//!    never below zero.
//!
//! Trials are a fixed budget: a repeated draw still uses one up. Once every
//! distinct pool line has been taken no later trial can change the card, so
//! the loop ends there.

use rustc_hash::FxHashSet;

use crate::cards::{CandidateCard, CostSpec, GeneratedCard, SourceCard};
use crate::core::RandomSource;

use super::extract::extract_rules_lines;
use super::redact::Redactor;

/// Chance that a trial draws a line.
pub const LINE_CHANCE: f64 = 0.7;

/// Chance that an accepted line costs a point of power or toughness.
pub const PENALTY_CHANCE: f64 = 0.5;

/// Chance that a penalty lands on power rather than toughness.
pub const POWER_SHARE: f64 = 0.5;

/// Assemble a card from a cost, a line pool and the candidates it came from.
///
/// `sources` supplies both the names to redact and the credit list.
#[must_use]
pub fn synthesize(
    cost: &CostSpec,
    pool: &[String],
    sources: &[CandidateCard],
    rng: &mut impl RandomSource,
) -> GeneratedCard {
    let cmc = cost.cmc();
    let mut power = cmc;
    let mut toughness = cmc;
    let mut rules_text = Vec::new();

    if !pool.is_empty() {
        let redactor = Redactor::new(sources.iter().map(|card| card.name.as_str()));
        let distinct = pool.iter().map(String::as_str).collect::<FxHashSet<_>>().len();
        let mut used: FxHashSet<&str> = FxHashSet::default();

        for _ in 0..cmc {
            if used.len() == distinct {
                break;
            }
            if rng.next_f64() >= LINE_CHANCE {
                continue;
            }

            let line = pool[rng.gen_index(pool.len())].as_str();
            if !used.insert(line) {
                continue;
            }
            rules_text.push(redactor.redact(line));

            if rng.next_f64() < PENALTY_CHANCE {
                if rng.next_f64() < POWER_SHARE {
                    power = power.saturating_sub(1);
                } else {
                    toughness = toughness.saturating_sub(1);
                }
            }
        }
    }

    GeneratedCard {
        mana_cost: cost.mana_cost(),
        rules_text,
        power,
        toughness,
        color_identity: cost.color_identity(),
        source_cards: sources.iter().map(SourceCard::from).collect(),
    }
}

/// Parse `cost_text`, extract lines from `cards` and synthesize.
#[must_use]
pub fn generate_card(
    cost_text: &str,
    cards: &[CandidateCard],
    rng: &mut impl RandomSource,
) -> GeneratedCard {
    let cost = CostSpec::parse(cost_text);
    let pool = extract_rules_lines(cards);
    synthesize(&cost, &pool, cards, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameRng, ScriptedRng};
    use proptest::prelude::*;

    fn pool(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_empty_pool_returns_base_stats() {
        let cost = CostSpec::parse("3G");
        let mut rng = ScriptedRng::new(vec![0.0]);

        let card = synthesize(&cost, &[], &[], &mut rng);
        assert!(card.rules_text.is_empty());
        assert_eq!((card.power, card.toughness), (4, 4));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_zero_cmc_draws_nothing() {
        let mut rng = ScriptedRng::new(vec![0.0]);
        let card = synthesize(&CostSpec::parse(""), &pool(&["Flying"]), &[], &mut rng);
        assert!(card.rules_text.is_empty());
        assert_eq!((card.power, card.toughness), (0, 0));
        assert_eq!(card.color_identity, "C");
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_accepted_line_without_penalty() {
        // skip, then accept index 0 with no penalty; the pool is then spent.
        let mut rng = ScriptedRng::new(vec![0.9, 0.1, 0.0, 0.9]);
        let card = synthesize(&CostSpec::parse("2WU"), &pool(&["Flying"]), &[], &mut rng);

        assert_eq!(card.rules_text, vec!["Flying"]);
        assert_eq!((card.power, card.toughness), (4, 4));
        assert_eq!(card.mana_cost, "2WU");
        assert_eq!(card.color_identity, "WU");
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn test_penalty_on_power_then_toughness() {
        let lines = pool(&["Flying", "Haste"]);
        // trial 1: accept, "Flying", penalty, power
        // trial 2: accept, "Haste", penalty, toughness
        let mut rng = ScriptedRng::new(vec![0.1, 0.0, 0.1, 0.1, 0.1, 0.9, 0.1, 0.9]);
        let card = synthesize(&CostSpec::parse("1R"), &lines, &[], &mut rng);

        assert_eq!(card.rules_text, vec!["Flying", "Haste"]);
        assert_eq!((card.power, card.toughness), (1, 1));
    }

    #[test]
    fn test_repeated_line_consumes_trial() {
        let lines = pool(&["Flying", "Haste"]);
        // trial 1: accept "Flying", no penalty; trial 2: "Flying" again; trial 3: skip.
        let mut rng = ScriptedRng::new(vec![0.1, 0.0, 0.9, 0.1, 0.0, 0.9]);
        let card = synthesize(&CostSpec::parse("3"), &lines, &[], &mut rng);

        assert_eq!(card.rules_text, vec!["Flying"]);
        assert_eq!((card.power, card.toughness), (3, 3));
        assert_eq!(rng.draws(), 6);
    }

    #[test]
    fn test_duplicate_text_across_sources_used_once() {
        let lines = pool(&["Flying", "Flying"]);
        // Both copies are the same text, so one acceptance spends the pool.
        let mut rng = ScriptedRng::new(vec![0.1, 0.99, 0.9]);
        let card = synthesize(&CostSpec::parse("2"), &lines, &[], &mut rng);

        assert_eq!(card.rules_text, vec!["Flying"]);
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn test_exhausted_pool_ends_trials_early() {
        let lines = pool(&["Flying", "Haste"]);
        // accept "Flying", accept "Haste", neither penalized; nothing left to draw.
        let mut rng = ScriptedRng::new(vec![0.1, 0.0, 0.9, 0.1, 0.9, 0.9]);
        let card = synthesize(&CostSpec::parse("4000000000"), &lines, &[], &mut rng);

        assert_eq!(card.rules_text, vec!["Flying", "Haste"]);
        assert_eq!((card.power, card.toughness), (4_000_000_000, 4_000_000_000));
        assert_eq!(rng.draws(), 6);
    }

    #[test]
    fn test_saturated_cost_terminates() {
        let lines = pool(&["Flying", "Haste"]);
        let mut rng = GameRng::new(11);
        let card = synthesize(&CostSpec::parse("99999999999"), &lines, &[], &mut rng);

        assert_eq!(card.rules_text.len(), 2);
        assert!(card.power >= u32::MAX - 2 && card.toughness >= u32::MAX - 2);
    }

    #[test]
    fn test_stats_floor_at_zero() {
        let mut rng = ScriptedRng::new(vec![0.1, 0.0, 0.1, 0.1]);
        let card = synthesize(&CostSpec::parse("W"), &pool(&["Lifelink"]), &[], &mut rng);
        assert_eq!((card.power, card.toughness), (0, 1));

        // Every trial accepts and penalizes power, walking it down to zero.
        let many: Vec<String> = (0..10).map(|i| format!("Line {i}")).collect();
        let script: Vec<f64> = (0..6)
            .flat_map(|i| [0.0, i as f64 / 10.0, 0.0, 0.0])
            .collect();
        let mut rng = ScriptedRng::new(script);
        let card = synthesize(&CostSpec::parse("6"), &many, &[], &mut rng);
        assert_eq!(card.rules_text.len(), 6);
        assert_eq!((card.power, card.toughness), (0, 6));
    }

    #[test]
    fn test_redacts_source_names_and_credits_sources() {
        let text = "Whenever you cast another Vampire spell, \
                    if Edgar Markov is in the command zone, create a token.";
        let sources = vec![
            CandidateCard::new("Edgar Markov", "Legendary Creature — Vampire Knight")
                .with_oracle_text(text)
                .with_id("abc"),
        ];
        let mut rng = ScriptedRng::new(vec![0.1, 0.0, 0.9]);
        let card = generate_card("B", &sources, &mut rng);

        assert_eq!(
            card.rules_text,
            vec!["Whenever you cast another Vampire spell, \
                  if this card is in the command zone, create a token."]
        );
        assert_eq!(card.source_cards.len(), 1);
        assert_eq!(card.source_cards[0].url, "https://scryfall.com/card/abc");
    }

    #[test]
    fn test_cross_source_names_are_redacted() {
        let sources = vec![
            CandidateCard::new("Alela", "Legendary Creature").with_oracle_text("Flying"),
            CandidateCard::new("Bruse Tarl", "Legendary Creature")
                .with_oracle_text("Alela and Bruse Tarl partner."),
        ];
        let pool = extract_rules_lines(&sources);
        let mut rng = ScriptedRng::new(vec![0.1, 0.99, 0.9]);
        let card = synthesize(&CostSpec::parse("R"), &pool, &sources, &mut rng);

        assert_eq!(card.rules_text, vec!["this card and this card partner."]);
    }

    proptest! {
        #[test]
        fn prop_bounds_hold(
            numeric in 0u32..12,
            colors in "[WUBRGCX]{0,5}",
            line_count in 0usize..8,
            seed in any::<u64>(),
        ) {
            let cost = CostSpec::parse(&format!("{numeric}{colors}"));
            let cmc = cost.cmc();
            let lines: Vec<String> = (0..line_count).map(|i| format!("Ability {i}")).collect();
            let mut rng = GameRng::new(seed);

            let card = synthesize(&cost, &lines, &[], &mut rng);

            prop_assert!(card.power <= cmc);
            prop_assert!(card.toughness <= cmc);
            prop_assert!(card.rules_text.len() <= cmc as usize);
            let distinct: FxHashSet<&String> = card.rules_text.iter().collect();
            prop_assert_eq!(distinct.len(), card.rules_text.len());
            let lost = (cmc - card.power) + (cmc - card.toughness);
            prop_assert!(lost as usize <= card.rules_text.len());
        }
    }

    #[test]
    fn test_end_to_end_single_line_bounds() {
        for seed in 0..200 {
            let mut rng = GameRng::new(seed);
            let card = synthesize(&CostSpec::parse("2WU"), &pool(&["Flying"]), &[], &mut rng);
            assert!(card.rules_text.len() <= 1);
            if card.rules_text == vec!["Flying".to_string()] {
                assert!((3..=4).contains(&card.power));
                assert!((3..=4).contains(&card.toughness));
                assert!(card.power + card.toughness >= 7);
            } else {
                assert_eq!((card.power, card.toughness), (4, 4));
            }
        }
    }
}
