//! Caching spell correction
//!
//! Combines two independent suggestion oracles behind a process-lifetime
//! memoization cache. Resolution policy for a misspelled word: the
//! edit-distance index is consulted first, the whole-dictionary fuzzy
//! matcher second, and a word neither can improve is returned unchanged.
//! The oracle order is an empirically tuned policy, not an invariant —
//! see DESIGN notes before changing it.

mod dictionary;
mod oracle;

pub use dictionary::FrequencyDictionary;
pub use oracle::{DictionaryOracle, EditDistanceOracle, SuggestionOracle};

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Memoized dual-oracle word corrector.
///
/// Correction is case-insensitive: every word is lowercased before cache
/// and oracle lookups, and the corrected (or unchanged) lowercase form is
/// returned. The cache grows with the number of distinct words seen in
/// the process and is never persisted.
pub struct SpellCorrector {
    dictionary_oracle: Box<dyn SuggestionOracle>,
    edit_distance_oracle: Box<dyn SuggestionOracle>,
    cache: Mutex<HashMap<String, String>>,
}

impl SpellCorrector {
    /// Corrector backed by the built-in frequency dictionary.
    pub fn new() -> Self {
        Self::with_dictionary(FrequencyDictionary::builtin())
    }

    /// Corrector backed by a caller-supplied dictionary; both oracles are
    /// built over the same word list.
    pub fn with_dictionary(dictionary: FrequencyDictionary) -> Self {
        let edit_distance = EditDistanceOracle::new(&dictionary);
        Self::with_oracles(
            Box::new(DictionaryOracle::new(dictionary)),
            Box::new(edit_distance),
        )
    }

    /// Corrector over explicit oracles. Test code substitutes fakes here.
    pub fn with_oracles(
        dictionary_oracle: Box<dyn SuggestionOracle>,
        edit_distance_oracle: Box<dyn SuggestionOracle>,
    ) -> Self {
        Self {
            dictionary_oracle,
            edit_distance_oracle,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Correct a sequence of words, preserving length and order.
    ///
    /// Each distinct word (case-insensitively) is resolved at most once
    /// per process; repeats share the cached correction.
    pub fn correct(&self, words: &[String]) -> Vec<String> {
        let distinct: HashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();

        let mut resolved: HashMap<String, String> = HashMap::with_capacity(distinct.len());
        for word in distinct {
            let correction = self.correct_word(&word);
            resolved.insert(word, correction);
        }

        words
            .iter()
            .map(|w| {
                let key = w.to_lowercase();
                resolved.get(&key).cloned().unwrap_or(key)
            })
            .collect()
    }

    /// Correct a single lowercase word through the cache.
    fn correct_word(&self, word: &str) -> String {
        if let Some(hit) = self.cache.lock().unwrap().get(word) {
            return hit.clone();
        }
        let correction = self.resolve(word);
        // insert-if-absent: a concurrent caller resolving the same word
        // converges to the same value, so either insert wins
        self.cache
            .lock()
            .unwrap()
            .entry(word.to_string())
            .or_insert_with(|| correction.clone());
        correction
    }

    /// Resolution policy: valid words pass through; otherwise prefer the
    /// edit-distance index, fall back to the dictionary matcher, and keep
    /// the word when neither has a suggestion.
    fn resolve(&self, word: &str) -> String {
        if self.dictionary_oracle.is_valid(word) {
            return word.to_string();
        }
        if let Some(first) = self.edit_distance_oracle.suggest(word).into_iter().next() {
            return first;
        }
        if let Some(first) = self.dictionary_oracle.suggest(word).into_iter().next() {
            return first;
        }
        word.to_string()
    }

    /// Number of cached corrections.
    pub fn cache_len(&self) -> usize {
        self.cache.lock().unwrap().len()
    }
}

impl Default for SpellCorrector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Oracle that counts how often it is consulted.
    struct CountingOracle {
        lookups: Arc<AtomicUsize>,
    }

    impl SuggestionOracle for CountingOracle {
        fn is_valid(&self, _word: &str) -> bool {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            false
        }

        fn suggest(&self, _word: &str) -> Vec<String> {
            Vec::new()
        }
    }

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_correct_words() {
        let corrector = SpellCorrector::new();
        let corrected = corrector.correct(&words(&["Helpl", "me", "to", "fimd", "miself"]));
        assert_eq!(corrected, words(&["help", "me", "to", "find", "myself"]));
    }

    #[test]
    fn test_length_and_order_preserved() {
        let corrector = SpellCorrector::new();
        let input = words(&["soo", "long", "soo"]);
        let corrected = corrector.correct(&input);
        assert_eq!(corrected.len(), input.len());
        assert_eq!(corrected, words(&["so", "long", "so"]));
    }

    #[test]
    fn test_distinct_words_resolved_once() {
        let lookups = Arc::new(AtomicUsize::new(0));
        let corrector = SpellCorrector::with_oracles(
            Box::new(CountingOracle {
                lookups: Arc::clone(&lookups),
            }),
            Box::new(CountingOracle {
                lookups: Arc::new(AtomicUsize::new(0)),
            }),
        );

        corrector.correct(&words(&["HECK", "BEEP", "BUMP", "HECK", "BUMP"]));
        assert_eq!(lookups.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_cache_survives_across_calls() {
        let lookups = Arc::new(AtomicUsize::new(0));
        let corrector = SpellCorrector::with_oracles(
            Box::new(CountingOracle {
                lookups: Arc::clone(&lookups),
            }),
            Box::new(CountingOracle {
                lookups: Arc::new(AtomicUsize::new(0)),
            }),
        );

        corrector.correct(&words(&["heck"]));
        corrector.correct(&words(&["heck", "heck"]));
        assert_eq!(lookups.load(Ordering::SeqCst), 1);
        assert_eq!(corrector.cache_len(), 1);
    }

    #[test]
    fn test_unknown_word_with_no_suggestions_is_unchanged() {
        let corrector = SpellCorrector::new();
        let corrected = corrector.correct(&words(&["zzzzzzzzzz"]));
        assert_eq!(corrected, words(&["zzzzzzzzzz"]));
    }

    #[test]
    fn test_censorship_style_typos() {
        let corrector = SpellCorrector::new();
        let corrected = corrector.correct(&words(&["f*ck", "t!me", "exc!ted"]));
        assert_eq!(corrected, words(&["fuck", "time", "excited"]));
    }
}
