//! Suggestion oracles for spelling correction
//!
//! Two independent strategies sit behind the [`SuggestionOracle`] trait:
//!
//! - [`DictionaryOracle`] — membership test plus whole-dictionary fuzzy
//!   matching with a distance ceiling above the indexed oracle's, so it
//!   catches typos the bounded index cannot reach.
//! - [`EditDistanceOracle`] — a precomputed deletes index (max edit
//!   distance 2, prefix length 7) answering lookups without scanning the
//!   dictionary; more precise for common single-character errors.

use super::dictionary::FrequencyDictionary;
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

/// A source of spelling suggestions.
pub trait SuggestionOracle: Send + Sync {
    /// Whether the word is considered correctly spelled.
    fn is_valid(&self, word: &str) -> bool;

    /// Candidate corrections, best first. Empty when the oracle has
    /// nothing to offer.
    fn suggest(&self, word: &str) -> Vec<String>;
}

/// Levenshtein distance (insertions, deletions, substitutions).
pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Optimal-string-alignment distance: Levenshtein plus adjacent
/// transposition, the metric typo indexes are usually built around.
pub(crate) fn osa_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut d = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in d.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        d[0][j] = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            d[i][j] = (d[i - 1][j] + 1)
                .min(d[i][j - 1] + 1)
                .min(d[i - 1][j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                d[i][j] = d[i][j].min(d[i - 2][j - 2] + 1);
            }
        }
    }
    d[a.len()][b.len()]
}

/// Whole-dictionary fuzzy matcher.
pub struct DictionaryOracle {
    dictionary: FrequencyDictionary,
    max_distance: usize,
    max_suggestions: usize,
}

impl DictionaryOracle {
    /// Create an oracle over the given dictionary with the default
    /// distance ceiling of 3.
    pub fn new(dictionary: FrequencyDictionary) -> Self {
        Self {
            dictionary,
            max_distance: 3,
            max_suggestions: 5,
        }
    }
}

impl SuggestionOracle for DictionaryOracle {
    fn is_valid(&self, word: &str) -> bool {
        if self.dictionary.contains(word) {
            return true;
        }
        // hyphenated compounds are valid when every part is
        word.contains('-')
            && word
                .split('-')
                .all(|part| !part.is_empty() && self.dictionary.contains(part))
    }

    fn suggest(&self, word: &str) -> Vec<String> {
        let word_len = word.chars().count();
        let mut candidates: Vec<(usize, Reverse<u64>, &str)> = Vec::new();

        for (entry, count) in self.dictionary.iter() {
            let entry_len = entry.chars().count();
            if entry_len.abs_diff(word_len) > self.max_distance {
                continue;
            }
            let dist = levenshtein(word, entry);
            if dist > 0 && dist <= self.max_distance {
                candidates.push((dist, Reverse(count), entry));
            }
        }

        candidates.sort_unstable();
        candidates
            .into_iter()
            .take(self.max_suggestions)
            .map(|(_, _, entry)| entry.to_string())
            .collect()
    }
}

/// Deletes-index fuzzy matcher with a fixed distance ceiling.
pub struct EditDistanceOracle {
    words: Vec<(String, u64)>,
    deletes: HashMap<String, Vec<u32>>,
    max_distance: usize,
    prefix_length: usize,
}

impl EditDistanceOracle {
    /// Build the index with max edit distance 2 and prefix length 7.
    pub fn new(dictionary: &FrequencyDictionary) -> Self {
        Self::with_limits(dictionary, 2, 7)
    }

    /// Build the index with explicit limits.
    pub fn with_limits(
        dictionary: &FrequencyDictionary,
        max_distance: usize,
        prefix_length: usize,
    ) -> Self {
        let mut words: Vec<(String, u64)> = dictionary
            .iter()
            .map(|(w, c)| (w.to_string(), c))
            .collect();
        words.sort_unstable();

        let mut deletes: HashMap<String, Vec<u32>> = HashMap::new();
        for (idx, (word, _)) in words.iter().enumerate() {
            let prefix = Self::prefix(word, prefix_length);
            for variant in Self::delete_variants(&prefix, max_distance) {
                deletes.entry(variant).or_default().push(idx as u32);
            }
        }

        Self {
            words,
            deletes,
            max_distance,
            prefix_length,
        }
    }

    fn prefix(word: &str, prefix_length: usize) -> String {
        word.chars().take(prefix_length).collect()
    }

    /// All strings reachable from `word` by up to `depth` single-character
    /// deletions, the word itself included.
    fn delete_variants(word: &str, depth: usize) -> HashSet<String> {
        let mut variants = HashSet::new();
        variants.insert(word.to_string());
        let mut frontier = vec![word.to_string()];

        for _ in 0..depth {
            let mut next = Vec::new();
            for w in &frontier {
                let chars: Vec<char> = w.chars().collect();
                for skip in 0..chars.len() {
                    let variant: String = chars
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| *i != skip)
                        .map(|(_, c)| *c)
                        .collect();
                    if variants.insert(variant.clone()) {
                        next.push(variant);
                    }
                }
            }
            frontier = next;
        }
        variants
    }
}

impl SuggestionOracle for EditDistanceOracle {
    fn is_valid(&self, word: &str) -> bool {
        self.words
            .binary_search_by(|(w, _)| w.as_str().cmp(word))
            .is_ok()
    }

    fn suggest(&self, word: &str) -> Vec<String> {
        let prefix = Self::prefix(word, self.prefix_length);
        let mut seen: HashSet<u32> = HashSet::new();
        for variant in Self::delete_variants(&prefix, self.max_distance) {
            if let Some(indices) = self.deletes.get(&variant) {
                seen.extend(indices.iter().copied());
            }
        }

        let mut candidates: Vec<(usize, Reverse<u64>, &str)> = seen
            .into_iter()
            .filter_map(|idx| {
                let (entry, count) = &self.words[idx as usize];
                let dist = osa_distance(word, entry);
                (dist > 0 && dist <= self.max_distance)
                    .then_some((dist, Reverse(*count), entry.as_str()))
            })
            .collect();

        candidates.sort_unstable();
        candidates
            .into_iter()
            .map(|(_, _, entry)| entry.to_string())
            .collect()
    }
}
