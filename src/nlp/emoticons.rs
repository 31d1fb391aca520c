//! Emoticon lexicon
//!
//! Fixed mapping from emoticon symbols to sentiment categories. The same
//! lookup is used by the feature extractor (category counting) and the
//! normalizer (exempting emoticons from correction and censorship
//! classification), so both always agree on what counts as an emoticon.

use std::collections::HashMap;

/// Western-style emoticons with their sentiment categories.
const EMOTICONS: &[(&str, &str)] = &[
    // Happy
    (":)", "Happy face or smiley"),
    (":-)", "Happy face or smiley"),
    (":=)", "Happy face or smiley"),
    ("=)", "Happy face or smiley"),
    (":]", "Happy face or smiley"),
    ("(:", "Happy face or smiley"),
    ("^_^", "Happy face or smiley"),
    ("^^", "Happy face or smiley"),
    (":o)", "Happy face or smiley"),
    (":c)", "Happy face or smiley"),
    // Very happy
    (":))", "Very very Happy face or smiley"),
    (":-))", "Very very Happy face or smiley"),
    (":)))", "Very very Happy face or smiley"),
    (":-)))", "Very very Happy face or smiley"),
    (":))))", "Very very Happy face or smiley"),
    // Laughing
    (":D", "Laughing, big grin or laugh with glasses"),
    (":-D", "Laughing, big grin or laugh with glasses"),
    ("=D", "Laughing, big grin or laugh with glasses"),
    ("xD", "Laughing, big grin or laugh with glasses"),
    ("XD", "Laughing, big grin or laugh with glasses"),
    ("8D", "Laughing, big grin or laugh with glasses"),
    // Wink
    (";)", "Wink or smirk"),
    (";-)", "Wink or smirk"),
    ("*)", "Wink or smirk"),
    (";]", "Wink or smirk"),
    (";D", "Wink or smirk"),
    // Sad
    (":(", "Frown, sad, angry or pouting"),
    (":-(", "Frown, sad, angry or pouting"),
    (":[", "Frown, sad, angry or pouting"),
    (":c", "Frown, sad, angry or pouting"),
    ("):", "Frown, sad, angry or pouting"),
    (">:(", "Frown, sad, angry or pouting"),
    // Very sad
    (":((", "Very sad"),
    (":-((", "Very sad"),
    (":(((", "Very sad"),
    // Crying
    (":'(", "Crying"),
    (":'-(", "Crying"),
    (";(", "Crying"),
    ("T_T", "Crying"),
    // Kiss
    (":*", "Kiss"),
    (":-*", "Kiss"),
    (":x", "Kiss"),
    (":X", "Kiss"),
    // Surprised
    (":O", "Surprised"),
    (":-O", "Surprised"),
    (":o", "Surprised"),
    (":-o", "Surprised"),
    ("oO", "Surprised"),
    ("Oo", "Surprised"),
    ("o.O", "Surprised"),
    ("O.o", "Surprised"),
    ("o_O", "Surprised"),
    ("O_o", "Surprised"),
    ("o_o", "Surprised"),
    ("O_O", "Surprised"),
    ("(o.o)", "Surprised"),
    ("(O.O)", "Surprised"),
    // Tongue
    (":P", "Tongue sticking out, cheeky, playful or blowing a raspberry"),
    (":-P", "Tongue sticking out, cheeky, playful or blowing a raspberry"),
    (":p", "Tongue sticking out, cheeky, playful or blowing a raspberry"),
    (":-p", "Tongue sticking out, cheeky, playful or blowing a raspberry"),
    ("xp", "Tongue sticking out, cheeky, playful or blowing a raspberry"),
    ("xP", "Tongue sticking out, cheeky, playful or blowing a raspberry"),
    // Skeptical
    (":/", "Skeptical, annoyed, undecided, uneasy or hesitant"),
    (":-/", "Skeptical, annoyed, undecided, uneasy or hesitant"),
    (":\\", "Skeptical, annoyed, undecided, uneasy or hesitant"),
    (":-\\", "Skeptical, annoyed, undecided, uneasy or hesitant"),
    (">:/", "Skeptical, annoyed, undecided, uneasy or hesitant"),
    // Straight face
    (":|", "Straight face"),
    (":-|", "Straight face"),
    // Embarrassed
    (":$", "Embarrassed or blushing"),
    ("://)", "Embarrassed or blushing"),
    // Angel
    ("O:)", "Angel, saint or innocent"),
    ("O:-)", "Angel, saint or innocent"),
    ("0:)", "Angel, saint or innocent"),
    // Devilish
    (">:)", "Evil or devilish"),
    (">:-)", "Evil or devilish"),
    ("3:)", "Evil or devilish"),
    // Love
    ("<3", "Love or heart"),
    ("</3", "Broken heart"),
];

/// Shared symbol-to-sentiment lookup.
#[derive(Debug, Clone)]
pub struct EmoticonLexicon {
    map: HashMap<&'static str, &'static str>,
    categories: Vec<&'static str>,
}

impl EmoticonLexicon {
    /// Create the standard lexicon.
    pub fn standard() -> Self {
        let map: HashMap<&'static str, &'static str> = EMOTICONS.iter().copied().collect();

        let mut categories: Vec<&'static str> = map.values().copied().collect();
        categories.sort_unstable();
        categories.dedup();

        Self { map, categories }
    }

    /// Whether the exact symbol is a known emoticon.
    pub fn is_emoticon(&self, symbol: &str) -> bool {
        self.map.contains_key(symbol)
    }

    /// Sentiment category of the symbol, if it is a known emoticon.
    pub fn category(&self, symbol: &str) -> Option<&'static str> {
        self.map.get(symbol).copied()
    }

    /// All sentiment categories, sorted and deduplicated.
    ///
    /// The order is stable and defines the emoticon columns of the
    /// feature schema.
    pub fn categories(&self) -> &[&'static str] {
        &self.categories
    }

    /// Number of known symbols.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the lexicon is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for EmoticonLexicon {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_symbols() {
        let lex = EmoticonLexicon::standard();
        assert!(lex.is_emoticon(":)"));
        assert!(lex.is_emoticon("(o.o)"));
        assert!(lex.is_emoticon("oO"));
        assert!(!lex.is_emoticon("hello"));
        assert!(!lex.is_emoticon("."));
    }

    #[test]
    fn test_categories_sorted_and_unique() {
        let lex = EmoticonLexicon::standard();
        let cats = lex.categories();
        let mut sorted = cats.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(cats, sorted.as_slice());
    }

    #[test]
    fn test_category_lookup() {
        let lex = EmoticonLexicon::standard();
        assert_eq!(lex.category(";)"), Some("Wink or smirk"));
        assert_eq!(lex.category(":*"), Some("Kiss"));
        assert_eq!(lex.category("o_O"), Some("Surprised"));
        assert_eq!(lex.category("word"), None);
    }
}
