//! Request-level orchestration.
//!
//! `Forge` ties the pipeline together for one request:
//!
//! ```text
//! cost text ─ parse ─▶ CostSpec
//! colour identity ─ fetch ─▶ candidates ─ sample(cmc) ─▶ selected
//! selected ─ extract ─▶ pool ─ synthesize ─▶ GeneratedCard
//! ```
//!
//! Each call owns its candidates and draws from the `RandomSource` it is
//! given; nothing is shared between requests.

use tracing::info;

use crate::cards::{CandidateCard, CostSpec, GeneratedCard};
use crate::catalog::{CatalogClient, CorpusFetcher};
use crate::core::{ForgeConfig, GameRng, RandomSource};
use crate::error::ForgeError;
use crate::synthesis::{extract_rules_lines, sample, synthesize};

/// Entry point for candidate selection and card generation.
#[derive(Clone, Debug)]
pub struct Forge<C> {
    fetcher: CorpusFetcher<C>,
    seed: Option<u64>,
}

impl<C: CatalogClient> Forge<C> {
    /// Create a forge over `client` with the configured cap, budget and seed.
    #[must_use]
    pub fn new(client: C, config: &ForgeConfig) -> Self {
        Self {
            fetcher: CorpusFetcher::from_config(client, config),
            seed: config.seed,
        }
    }

    /// The fetcher used for candidate acquisition.
    #[must_use]
    pub fn fetcher(&self) -> &CorpusFetcher<C> {
        &self.fetcher
    }

    /// A fresh RNG for one request: seeded when configured, else random.
    #[must_use]
    pub fn request_rng(&self) -> GameRng {
        GameRng::seeded_or_random(self.seed)
    }

    /// Fetch candidates for `color_identity` and keep a random `count`
    /// (all of them when `None`).
    pub fn select_candidates(
        &self,
        color_identity: Option<&str>,
        count: Option<usize>,
        rng: &mut impl RandomSource,
    ) -> Result<Vec<CandidateCard>, ForgeError> {
        let signature = color_identity
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(ForgeError::missing_color_identity)?;

        let candidates = self.fetcher.fetch(signature)?;
        let available = candidates.len();
        let selected = sample(candidates, count, rng);

        info!(
            signature,
            available,
            selected = selected.len(),
            "candidates selected"
        );
        Ok(selected)
    }

    /// Run the whole pipeline for `cost_text`.
    pub fn generate(
        &self,
        cost_text: &str,
        rng: &mut impl RandomSource,
    ) -> Result<GeneratedCard, ForgeError> {
        if cost_text.trim().is_empty() {
            return Err(ForgeError::MissingParameter("Please enter a mana cost"));
        }

        let cost = CostSpec::parse(cost_text);
        let count = usize::try_from(cost.cmc()).unwrap_or(usize::MAX);
        let selected = self.select_candidates(Some(&cost.color_identity()), Some(count), rng)?;
        let pool = extract_rules_lines(&selected);
        let card = synthesize(&cost, &pool, &selected, rng);

        info!(
            cost = %card.mana_cost,
            pool = pool.len(),
            lines = card.rules_text.len(),
            power = card.power,
            toughness = card.toughness,
            "card generated"
        );
        Ok(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::core::ScriptedRng;
    use crate::error::CatalogError;

    fn legends(n: usize) -> Vec<CandidateCard> {
        (0..n)
            .map(|i| {
                CandidateCard::new(format!("Legend {i}"), "Legendary Creature — Human")
                    .with_oracle_text(format!("Ability {i}"))
            })
            .collect()
    }

    #[test]
    fn test_missing_color_identity() {
        let catalog = InMemoryCatalog::single_page(legends(3));
        let forge = Forge::new(&catalog, &ForgeConfig::default());
        let mut rng = GameRng::new(1);

        for missing in [None, Some(""), Some("  ")] {
            assert_eq!(
                forge.select_candidates(missing, None, &mut rng),
                Err(ForgeError::missing_color_identity())
            );
        }
        assert!(catalog.requests().is_empty());
    }

    #[test]
    fn test_selects_requested_count() {
        let catalog = InMemoryCatalog::single_page(legends(10));
        let forge = Forge::new(&catalog, &ForgeConfig::default());
        let mut rng = GameRng::new(1);

        assert_eq!(forge.select_candidates(Some("W"), Some(3), &mut rng).unwrap().len(), 3);
        assert_eq!(forge.select_candidates(Some("W"), None, &mut rng).unwrap().len(), 10);
        assert_eq!(forge.select_candidates(Some("W"), Some(50), &mut rng).unwrap().len(), 10);
    }

    #[test]
    fn test_no_results_propagates() {
        let catalog = InMemoryCatalog::single_page(Vec::new());
        let forge = Forge::new(&catalog, &ForgeConfig::default());
        let mut rng = GameRng::new(1);

        assert_eq!(
            forge.select_candidates(Some("G"), None, &mut rng),
            Err(ForgeError::Catalog(CatalogError::NoResults))
        );
    }

    #[test]
    fn test_generate_requires_cost() {
        let catalog = InMemoryCatalog::single_page(legends(1));
        let forge = Forge::new(&catalog, &ForgeConfig::default());
        let mut rng = GameRng::new(1);

        let err = forge.generate("   ", &mut rng).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(catalog.requests().is_empty());
    }

    #[test]
    fn test_generate_samples_by_cmc() {
        let catalog = InMemoryCatalog::single_page(legends(10));
        let forge = Forge::new(&catalog, &ForgeConfig::default());
        let mut rng = GameRng::new(5);

        let card = forge.generate("2WU", &mut rng).unwrap();
        assert_eq!(card.mana_cost, "2WU");
        assert_eq!(card.color_identity, "WU");
        assert_eq!(card.source_cards.len(), 4);
        assert!(card.rules_text.len() <= 4);
        assert!(card.power <= 4 && card.toughness <= 4);
    }

    #[test]
    fn test_generate_is_reproducible_with_seed() {
        let catalog = InMemoryCatalog::single_page(legends(20));
        let forge = Forge::new(&catalog, &ForgeConfig::default().with_seed(99));

        let first = forge.generate("3BG", &mut forge.request_rng()).unwrap();
        let second = forge.generate("3BG", &mut forge.request_rng()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_huge_cost_over_small_corpus() {
        let angel = CandidateCard::new("Serra Angel", "Legendary Creature — Angel")
            .with_oracle_text("Flying");
        let catalog = InMemoryCatalog::single_page(vec![angel]);
        let forge = Forge::new(&catalog, &ForgeConfig::default());

        let card = forge.generate("300000000W", &mut GameRng::new(4)).unwrap();
        assert_eq!(card.rules_text, vec!["Flying"]);
        assert_eq!(card.source_cards.len(), 1);
    }

    #[test]
    fn test_generate_replays_from_saved_state() {
        let catalog = InMemoryCatalog::single_page(legends(12));
        let forge = Forge::new(&catalog, &ForgeConfig::default());
        let mut base = GameRng::new(31);
        let mut roll = base.fork();
        let saved = roll.state();

        let first = forge.generate("4RG", &mut roll).unwrap();
        let replayed = forge.generate("4RG", &mut GameRng::from_state(&saved)).unwrap();
        assert_eq!(first, replayed);
    }

    #[test]
    fn test_generate_with_scripted_draws() {
        let catalog = InMemoryCatalog::single_page(vec![
            CandidateCard::new("Isamaru, Hound of Konda", "Legendary Creature — Dog")
                .with_oracle_text("Isamaru, Hound of Konda attacks each combat if able."),
        ]);
        let forge = Forge::new(&catalog, &ForgeConfig::default());
        // No shuffle draws for one candidate; then accept, index 0, no penalty.
        let mut rng = ScriptedRng::new(vec![0.1, 0.0, 0.9]);

        let card = forge.generate("W", &mut rng).unwrap();
        assert_eq!(card.rules_text, vec!["this card attacks each combat if able."]);
        assert_eq!((card.power, card.toughness), (1, 1));
    }
}
