//! Concatenated-word repair
//!
//! Social-media posts frequently glue words together with punctuation and
//! no following space ("word1.Word2continuing"). Sentence boundaries and
//! token statistics both degrade on such runs, so a space is inserted
//! after each separator before annotation.

use regex::Regex;
use std::sync::LazyLock;

/// A word glued to at least one more word (3+ chars) by non-space
/// separators, possibly repeated.
static CONCATENATED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+[^\s\w]+\w{3,}[^\s\w]*)+").unwrap());

/// A maximal separator run inside a concatenated match.
static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]+").unwrap());

/// Insert a space after every separator run inside concatenated-word
/// matches, leaving the rest of the text untouched. Results are trimmed.
pub fn fix_concatenated_words(texts: &[String]) -> Vec<String> {
    texts
        .iter()
        .map(|text| {
            let mut out = String::with_capacity(text.len());
            let mut last = 0;
            for m in CONCATENATED.find_iter(text) {
                out.push_str(&text[last..m.start()]);
                out.push_str(&SEPARATORS.replace_all(m.as_str(), "${0} "));
                last = m.end();
            }
            out.push_str(&text[last..]);
            out.trim().to_string()
        })
        .collect()
}
