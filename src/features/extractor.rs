//! Per-document statistical feature extraction
//!
//! Turns a batch of annotated documents into a fixed-schema
//! [`FeatureTable`]: URL substitution, punctuation/case rates, sentence
//! statistics, emoticon sentiment counts, and the normalizer's
//! text/censorship/compression outputs.

use crate::data::FeatureTable;
use crate::nlp::{AnnotatedDocument, EmoticonLexicon, TextNormalizer};
use crate::spell::SpellCorrector;
use ndarray::Array2;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::info;

/// Placeholder substituted for every detected URL.
pub const URL_PLACEHOLDER: &str = "[l]";

/// Numeric columns preceding the emoticon category columns.
const BASE_COLUMNS: &[&str] = &[
    "length",
    "upcase_rate",
    "exc_mark_rate",
    "q_mark_rate",
    "dots_rate",
    "new_lines_rate",
    "median_sentence_len",
    "sentences_count",
    "urls_counter",
    "censured",
    "compression",
];

/// URLs in their common social-media shapes: scheme-prefixed, www-prefixed,
/// bare IPv4, or bare domain with a recognized TLD.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:https?://\S+|www\.\S+|(?:\d{1,3}(?:\.\d{1,3}){3}|[a-z0-9][a-z0-9-]*(?:\.[a-z0-9-]+)*\.(?:com|org|net|edu|gov|io|co|me|info|biz|tv|uk|de|fr|ru|us))(?:/\S*)?)",
    )
    .unwrap()
});

/// Punctuation stripped from the tail of a URL match before substitution.
const URL_TRAILING: &[char] = &['.', ',', '!', '?', ':', ';'];

#[derive(Debug, Default)]
struct BaseStats {
    length: f64,
    upcase_rate: f64,
    exc_mark_rate: f64,
    q_mark_rate: f64,
    dots_rate: f64,
    new_lines_rate: f64,
}

/// Batch feature extractor.
pub struct FeatureExtractor {
    normalizer: TextNormalizer,
    lexicon: EmoticonLexicon,
}

impl FeatureExtractor {
    /// Extractor sharing one corrector and the standard emoticon lexicon.
    pub fn new(corrector: SpellCorrector) -> Self {
        let lexicon = EmoticonLexicon::standard();
        Self {
            normalizer: TextNormalizer::new(corrector, lexicon.clone()),
            lexicon,
        }
    }

    /// Extractor over explicit components.
    pub fn with_components(normalizer: TextNormalizer, lexicon: EmoticonLexicon) -> Self {
        Self { normalizer, lexicon }
    }

    /// Output schema: the text column, the base numeric columns, then one
    /// column per emoticon category. Identical for every input.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(1 + BASE_COLUMNS.len() + self.lexicon.categories().len());
        names.push("text".to_string());
        names.extend(BASE_COLUMNS.iter().map(|c| c.to_string()));
        names.extend(self.lexicon.categories().iter().map(|c| c.to_string()));
        names
    }

    fn numeric_columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = BASE_COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.extend(self.lexicon.categories().iter().map(|c| c.to_string()));
        columns
    }

    /// Replace every URL with [`URL_PLACEHOLDER`], returning the
    /// substituted text and the number of URLs found. Trailing sentence
    /// punctuation is kept out of the match.
    pub fn replace_urls(&self, text: &str) -> (String, usize) {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let mut count = 0;

        for m in URL_REGEX.find_iter(text) {
            let url = m.as_str();
            let stripped = url.trim_end_matches(URL_TRAILING);
            out.push_str(&text[last..m.start()]);
            out.push_str(URL_PLACEHOLDER);
            // punctuation trimmed off the URL stays in the text
            out.push_str(&url[stripped.len()..]);
            last = m.end();
            count += 1;
        }
        out.push_str(&text[last..]);
        (out, count)
    }

    /// Median character length of non-empty sentences and their count.
    pub fn sentence_stats(doc: &AnnotatedDocument) -> (f64, usize) {
        let mut lengths: Vec<usize> = doc
            .sentences
            .iter()
            .map(|s| s.trimmed_len())
            .filter(|&len| len > 0)
            .collect();
        lengths.sort_unstable();

        let median = match lengths.len() {
            0 => 0.0,
            n if n % 2 == 1 => lengths[n / 2] as f64,
            n => (lengths[n / 2 - 1] + lengths[n / 2]) as f64 / 2.0,
        };
        (median, lengths.len())
    }

    /// Character-rate statistics normalized by sentence count, with floor
    /// guards so empty input never divides by zero.
    fn base_stats(text: &str, sentences_count: usize) -> BaseStats {
        let sentences = sentences_count.max(1) as f64;
        let mut length = 0usize;
        let mut upcase = 0usize;
        let mut exc = 0usize;
        let mut q = 0usize;
        let mut dots = 0usize;
        let mut newlines = 0usize;

        for c in text.chars() {
            length += 1;
            match c {
                '!' => exc += 1,
                '?' => q += 1,
                '.' => dots += 1,
                '\n' => newlines += 1,
                _ if c.is_uppercase() => upcase += 1,
                _ => {}
            }
        }

        BaseStats {
            length: length.max(1) as f64,
            upcase_rate: upcase as f64 / sentences,
            exc_mark_rate: exc as f64 / sentences,
            q_mark_rate: q as f64 / sentences,
            dots_rate: dots as f64 / sentences,
            new_lines_rate: newlines as f64 / sentences,
        }
    }

    /// Tally emoticon occurrences by sentiment category, aligned with
    /// `lexicon.categories()`.
    fn emoticon_counts(&self, text: &str) -> Vec<f64> {
        let index: HashMap<&str, usize> = self
            .lexicon
            .categories()
            .iter()
            .enumerate()
            .map(|(i, c)| (*c, i))
            .collect();

        let mut counts = vec![0.0; self.lexicon.categories().len()];
        for piece in text.split_whitespace() {
            if let Some(category) = self.lexicon.category(piece) {
                counts[index[category]] += 1.0;
            }
        }
        counts
    }

    /// Extract one feature row per document.
    pub fn extract(&self, docs: &[AnnotatedDocument]) -> FeatureTable {
        info!("feature extraction started for {} documents", docs.len());

        let columns = self.numeric_columns();
        let milestones: Vec<(usize, usize)> = [25, 50, 75]
            .iter()
            .map(|&pct| (docs.len() * pct / 100, pct))
            .filter(|&(idx, _)| idx > 0)
            .collect();

        let mut texts = Vec::with_capacity(docs.len());
        let mut values = Array2::zeros((docs.len(), columns.len()));

        for (i, doc) in docs.iter().enumerate() {
            if let Some(&(_, pct)) = milestones.iter().find(|&&(idx, _)| idx == i) {
                info!("feature extraction {}% complete", pct);
            }

            let (substituted, urls_counter) = self.replace_urls(&doc.text);
            let (median_sentence_len, sentences_count) = Self::sentence_stats(doc);
            let base = Self::base_stats(&substituted, sentences_count);
            let emoticons = self.emoticon_counts(&substituted);
            let normalized = self.normalizer.normalize(doc);

            let mut row = vec![
                base.length,
                base.upcase_rate,
                base.exc_mark_rate,
                base.q_mark_rate,
                base.dots_rate,
                base.new_lines_rate,
                median_sentence_len,
                sentences_count as f64,
                urls_counter as f64,
                normalized.censored as f64,
                normalized.compression as f64,
            ];
            row.extend(emoticons);

            for (j, value) in row.into_iter().enumerate() {
                values[[i, j]] = value;
            }
            texts.push(normalized.text);
        }

        info!("feature extraction finished");
        FeatureTable::new(texts, columns, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{Annotator, RuleAnnotator};

    fn extractor() -> FeatureExtractor {
        FeatureExtractor::new(SpellCorrector::new())
    }

    fn annotate(text: &str) -> AnnotatedDocument {
        RuleAnnotator::new(EmoticonLexicon::standard()).annotate(text)
    }

    #[test]
    fn test_replace_urls() {
        let ex = extractor();
        let cases = [
            (
                "Image: http://www.test.com/img?id=5. Upvote it!",
                ("Image: [l]. Upvote it!", 1),
            ),
            (
                "Profile: test.com/u/123. Profile: 127.0.0.1/u?id=1",
                ("Profile: [l]. Profile: [l]", 2),
            ),
            ("Don't do that", ("Don't do that", 0)),
        ];
        for (input, (expected_text, expected_count)) in cases {
            let (text, count) = ex.replace_urls(input);
            assert_eq!(text, expected_text);
            assert_eq!(count, expected_count);
        }
    }

    #[test]
    fn test_url_count_matches_placeholders() {
        let ex = extractor();
        let input = "See www.a.com and www.b.com and http://c.com/x";
        let (text, count) = ex.replace_urls(input);
        assert_eq!(count, 3);
        assert_eq!(text.matches(URL_PLACEHOLDER).count(), 3);
        assert!(!text.contains("www."));
        assert!(!text.contains("http://"));
    }

    #[test]
    fn test_sentence_stats() {
        let (median, count) = FeatureExtractor::sentence_stats(&annotate("Hello!! My name is Jonas."));
        assert_eq!(median, 12.0);
        assert_eq!(count, 2);

        let (median, count) = FeatureExtractor::sentence_stats(&annotate(""));
        assert_eq!(median, 0.0);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_base_stats_neutral_message() {
        let stats = FeatureExtractor::base_stats("Hello\n This is a typical neutral message.", 2);
        assert_eq!(stats.length, 41.0);
        assert!((stats.upcase_rate - 1.0).abs() < 0.01);
        assert_eq!(stats.exc_mark_rate, 0.0);
        assert_eq!(stats.q_mark_rate, 0.0);
        assert!((stats.dots_rate - 0.5).abs() < 0.01);
        assert!((stats.new_lines_rate - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_base_stats_shouty_message() {
        let stats =
            FeatureExtractor::base_stats("HI!!! I'M SOOOO EXCITED!!!! WHAT ARE YOU DOING?????", 3);
        assert_eq!(stats.length, 51.0);
        assert!((stats.upcase_rate - 10.33).abs() < 0.01);
        assert!((stats.exc_mark_rate - 2.33).abs() < 0.01);
        assert!((stats.q_mark_rate - 1.66).abs() < 0.01);
        assert_eq!(stats.dots_rate, 0.0);
        assert_eq!(stats.new_lines_rate, 0.0);
    }

    #[test]
    fn test_base_stats_empty_text_uses_floor_guards() {
        let stats = FeatureExtractor::base_stats("", 0);
        assert_eq!(stats.length, 1.0);
        assert_eq!(stats.upcase_rate, 0.0);
    }

    #[test]
    fn test_emoticon_counts() {
        let ex = extractor();
        let lexicon = EmoticonLexicon::standard();
        let category_idx = |name: &str| {
            lexicon
                .categories()
                .iter()
                .position(|c| *c == name)
                .unwrap()
        };

        let counts = ex.emoticon_counts("Hey, how you're doing ;)");
        assert_eq!(counts[category_idx("Wink or smirk")], 1.0);

        let counts = ex.emoticon_counts("It's so stuped lol :-)))");
        assert_eq!(counts[category_idx("Very very Happy face or smiley")], 1.0);

        let counts = ex.emoticon_counts("Love you :* :* :*");
        assert_eq!(counts[category_idx("Kiss")], 3.0);
    }

    #[test]
    fn test_schema_invariance() {
        let ex = extractor();
        let rich = ex.extract(&[annotate("Wow :) visit www.a.com f*ck!!!")]);
        let empty = ex.extract(&[annotate("")]);
        let plain = ex.extract(&[annotate("just words")]);

        assert_eq!(rich.columns(), empty.columns());
        assert_eq!(rich.columns(), plain.columns());
        assert_eq!(rich.schema()[0], "text");
    }

    #[test]
    fn test_empty_document_defaults() {
        let ex = extractor();
        let table = ex.extract(&[annotate("")]);
        assert_eq!(table.column("sentences_count").unwrap()[0], 0.0);
        assert_eq!(table.column("median_sentence_len").unwrap()[0], 0.0);
        assert_eq!(table.column("length").unwrap()[0], 1.0);
        assert_eq!(table.texts()[0], "");
    }

    #[test]
    fn test_full_row() {
        let ex = extractor();
        let table = ex.extract(&[annotate("Oh f*ck!!!!! It's really surpr!sing. oO (o.o)")]);

        assert_eq!(table.texts()[0], "oh fuck!! it's really surprising. oO (o.o)");
        assert_eq!(table.column("censured").unwrap()[0], 2.0);
        assert_eq!(table.column("Surprised").unwrap()[0], 2.0);
        assert_eq!(table.column("length").unwrap()[0], 45.0);
        assert_eq!(table.column("sentences_count").unwrap()[0], 3.0);
        assert_eq!(table.column("exc_mark_rate").unwrap()[0], 2.0);
        assert_eq!(table.column("urls_counter").unwrap()[0], 0.0);
    }
}
