//! Replace source card names inside borrowed text.
//!
//! Names are matched case-insensitively as whole words and replaced with
//! [`SELF_REFERENCE`]. Longer names are applied first so "Bob, the Great"
//! is replaced before "Bob" can eat part of it.

use regex::{NoExpand, Regex, RegexBuilder};
use rustc_hash::FxHashSet;
use tracing::warn;

/// Token that stands in for a source card's name.
pub const SELF_REFERENCE: &str = "this card";

/// Compiled name patterns for one generation.
#[derive(Clone, Debug, Default)]
pub struct Redactor {
    patterns: Vec<Regex>,
}

impl Redactor {
    /// Compile patterns for `names`.
    ///
    /// Empty and duplicate names are skipped. Patterns are ordered by
    /// descending name length (in characters); equal lengths keep input order.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = FxHashSet::default();
        let mut names: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().to_string())
            .filter(|n| !n.is_empty() && seen.insert(n.to_lowercase()))
            .collect();
        names.sort_by_key(|n| std::cmp::Reverse(n.chars().count()));

        let patterns = names
            .iter()
            .filter_map(|name| match name_pattern(name) {
                Ok(pattern) => Some(pattern),
                Err(err) => {
                    warn!(%name, error = %err, "skipping name that cannot be matched");
                    None
                }
            })
            .collect();

        Self { patterns }
    }

    /// Number of compiled name patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True when there are no names to redact.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Return `line` with every source name replaced.
    #[must_use]
    pub fn redact(&self, line: &str) -> String {
        let mut result = line.to_string();
        for pattern in &self.patterns {
            if pattern.is_match(&result) {
                result = pattern
                    .replace_all(&result, NoExpand(SELF_REFERENCE))
                    .into_owned();
            }
        }
        result
    }
}

/// One-off redaction of `line` against `names`.
#[must_use]
pub fn redact_names<S: AsRef<str>>(line: &str, names: &[S]) -> String {
    Redactor::new(names).redact(line)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Literal, case-insensitive pattern for `name`.
///
/// A word boundary is required on each side that begins or ends with a word
/// character; a name ending in punctuation has nothing to bleed into there.
fn name_pattern(name: &str) -> Result<Regex, regex::Error> {
    let starts_with_word = name.chars().next().is_some_and(is_word_char);
    let ends_with_word = name.chars().next_back().is_some_and(is_word_char);

    let pattern = format!(
        "{}{}{}",
        if starts_with_word { r"\b" } else { "" },
        regex::escape(name),
        if ends_with_word { r"\b" } else { "" },
    );

    RegexBuilder::new(&pattern).case_insensitive(true).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_replaces_case_insensitive_whole_words() {
        let redactor = Redactor::new(["Krenko, Mob Boss"]);
        assert_eq!(
            redactor.redact("When KRENKO, MOB BOSS attacks, krenko, mob boss gets +1/+0."),
            "When this card attacks, this card gets +1/+0."
        );
    }

    #[test]
    fn test_does_not_match_inside_longer_word() {
        let redactor = Redactor::new(["Bob"]);
        assert_eq!(redactor.redact("Bobby draws a card."), "Bobby draws a card.");
        assert_eq!(redactor.redact("Bob draws a card."), "this card draws a card.");
        assert_eq!(redactor.redact("Give it to bob."), "Give it to this card.");
    }

    #[test]
    fn test_longer_name_first() {
        let redactor = Redactor::new(["Gisa", "Gisa, Glorious Resurrector"]);
        assert_eq!(
            redactor.redact("Gisa, Glorious Resurrector exiles it. Gisa smiles."),
            "this card exiles it. this card smiles."
        );
    }

    #[test]
    fn test_special_characters_are_literal() {
        let redactor = Redactor::new(["B.F.M. (Big Furry Monster)"]);
        assert_eq!(
            redactor.redact("B.F.M. (Big Furry Monster) can't block."),
            "this card can't block."
        );
        assert_eq!(
            redactor.redact("BxFxMx (Big Furry Monster) can't block."),
            "BxFxMx (Big Furry Monster) can't block."
        );
    }

    #[test]
    fn test_replacement_is_not_expanded() {
        let redactor = Redactor::new(["$1"]);
        assert_eq!(redactor.redact("pay $1 now"), "pay this card now");
    }

    #[test]
    fn test_empty_and_duplicate_names() {
        let redactor = Redactor::new(["", "Ayula", "ayula"]);
        assert_eq!(redactor.len(), 1);
        assert!(Redactor::new(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_input_untouched() {
        let line = String::from("Sram draws.");
        let out = redact_names(&line, &["Sram"]);
        assert_eq!(line, "Sram draws.");
        assert_eq!(out, "this card draws.");
    }

    proptest! {
        #[test]
        fn prop_line_without_names_is_unchanged(line in "[a-p ,.]{0,60}") {
            let redactor = Redactor::new(["Zyx", "Qwerty Vortex"]);
            prop_assert_eq!(redactor.redact(&line), line);
        }

        #[test]
        fn prop_no_whole_word_occurrence_survives(
            prefix in "[a-z ]{0,20}",
            suffix in "[a-z ]{0,20}",
        ) {
            let line = format!("{prefix} Atraxa {suffix}");
            let out = Redactor::new(["Atraxa"]).redact(&line);
            let leftover = Regex::new(r"(?i)\batraxa\b").unwrap();
            prop_assert!(!leftover.is_match(&out));
        }
    }
}
