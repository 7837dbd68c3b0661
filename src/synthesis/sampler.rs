//! Unbiased candidate sampling.

use crate::core::RandomSource;

/// Shuffle `items` in place (Fisher–Yates).
///
/// Walks `i` from the last index down to 1 and swaps with a uniform index
/// in `[0, i]`, so every permutation is equally likely.
pub fn shuffle<T>(items: &mut [T], rng: &mut impl RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_index(i + 1);
        items.swap(i, j);
    }
}

/// Shuffle `items` and keep the first `count` (all when `None`).
///
/// ```
/// use commander_forge::core::GameRng;
/// use commander_forge::synthesis::sample;
///
/// let mut rng = GameRng::new(1);
/// let picked = sample(vec![1, 2, 3, 4, 5], Some(3), &mut rng);
/// assert_eq!(picked.len(), 3);
/// ```
#[must_use]
pub fn sample<T>(mut items: Vec<T>, count: Option<usize>, rng: &mut impl RandomSource) -> Vec<T> {
    shuffle(&mut items, rng);
    if let Some(count) = count {
        items.truncate(count);
    }
    items
}
