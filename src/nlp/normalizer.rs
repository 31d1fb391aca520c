//! Token-level typo and censorship normalization
//!
//! Rewrites a document into its canonical lowercase, spell-corrected form
//! while counting censorship-suspected tokens and the characters saved by
//! the rewrite. The output text feeds both the statistical features and
//! the embedding stage.

use super::emoticons::EmoticonLexicon;
use super::types::AnnotatedDocument;
use crate::spell::SpellCorrector;
use std::collections::HashMap;

/// Result of normalizing one document.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedText {
    /// Canonical normalized text
    pub text: String,
    /// Number of censorship-suspected tokens
    pub censored: usize,
    /// Characters removed by normalization, never negative
    pub compression: usize,
}

/// Collapse every run of three or more identical non-whitespace
/// characters to exactly two.
///
/// Idempotent: a string with no run longer than two is returned as-is.
pub fn collapse_repeats(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run_char = None;
    let mut run_len = 0usize;

    for c in text.chars() {
        if Some(c) == run_char && !c.is_whitespace() {
            run_len += 1;
            if run_len <= 2 {
                out.push(c);
            }
        } else {
            run_char = Some(c);
            run_len = 1;
            out.push(c);
        }
    }
    out
}

/// Document normalizer combining repeat collapsing, emoticon exemption,
/// censorship classification and cached spell correction.
pub struct TextNormalizer {
    corrector: SpellCorrector,
    lexicon: EmoticonLexicon,
}

impl TextNormalizer {
    /// Create a normalizer sharing the given corrector and lexicon.
    pub fn new(corrector: SpellCorrector, lexicon: EmoticonLexicon) -> Self {
        Self { corrector, lexicon }
    }

    /// Whether a lemma-lowered token looks like symbol-substitution
    /// censorship: any character outside letters, digits, whitespace,
    /// apostrophe, hyphen and colon.
    fn is_censorship_suspect(lemma: &str) -> bool {
        lemma
            .chars()
            .any(|c| !c.is_alphanumeric() && !c.is_whitespace() && !matches!(c, '\'' | '-' | ':'))
    }

    /// Normalize one annotated document.
    pub fn normalize(&self, doc: &AnnotatedDocument) -> NormalizedText {
        let mut rendered: Vec<String> = Vec::with_capacity(doc.tokens.len());
        let mut candidates: Vec<String> = Vec::new();
        let mut censored = 0usize;

        for token in &doc.tokens {
            let is_emoticon = self.lexicon.is_emoticon(&token.text);

            if is_emoticon {
                rendered.push(token.text.clone());
                continue;
            }

            let collapsed = collapse_repeats(&token.lemma);
            if !token.is_punct {
                if Self::is_censorship_suspect(&token.lemma) {
                    censored += 1;
                }
                if !token.is_stop && !token.lemma.trim().is_empty() {
                    candidates.push(collapsed.clone());
                }
            }
            rendered.push(collapsed);
        }

        let corrections = self.corrector.correct(&candidates);
        let mapper: HashMap<&str, &str> = candidates
            .iter()
            .map(String::as_str)
            .zip(corrections.iter().map(String::as_str))
            .collect();

        let mut out = String::with_capacity(doc.text.len());
        for (token, rendered) in doc.tokens.iter().zip(&rendered) {
            let replacement = mapper.get(rendered.as_str()).copied().unwrap_or(rendered);
            out.push_str(replacement);
            out.push_str(&token.whitespace);
        }

        let text = collapse_repeats(&out);
        let compression = doc.char_len().saturating_sub(text.chars().count());

        NormalizedText {
            text,
            censored,
            compression,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::annotator::{Annotator, RuleAnnotator};

    fn normalizer() -> TextNormalizer {
        TextNormalizer::new(SpellCorrector::new(), EmoticonLexicon::standard())
    }

    fn annotate(text: &str) -> AnnotatedDocument {
        RuleAnnotator::new(EmoticonLexicon::standard()).annotate(text)
    }

    #[test]
    fn test_collapse_repeats() {
        assert_eq!(collapse_repeats("soooooo"), "soo");
        assert_eq!(collapse_repeats("!!!!!"), "!!");
        assert_eq!(collapse_repeats("hello"), "hello");
        assert_eq!(collapse_repeats("a   b"), "a   b");
    }

    #[test]
    fn test_collapse_repeats_is_idempotent() {
        for text in ["soo", "!!", "already clean", "aa bb cc!!"] {
            assert_eq!(collapse_repeats(text), text);
        }
        let once = collapse_repeats("wooooow!!!!");
        assert_eq!(collapse_repeats(&once), once);
    }

    #[test]
    fn test_censored_substitution() {
        let result = normalizer().normalize(&annotate("Stop f*ck my brain!!!!!"));
        assert_eq!(result.text, "stop fuck my brain!!");
        assert_eq!(result.censored, 1);
        assert_eq!(result.compression, 3);
    }

    #[test]
    fn test_repeats_and_censorship_combined() {
        let result = normalizer().normalize(&annotate("I'm sooooooo exc!ted!"));
        assert_eq!(result.text, "i'm so excited!");
        assert_eq!(result.censored, 1);
        assert_eq!(result.compression, 6);
    }

    #[test]
    fn test_clean_text_passes_through() {
        let result = normalizer().normalize(&annotate("Don't do that. He's my co-worker."));
        assert_eq!(result.text, "don't do that. he's my co-worker.");
        assert_eq!(result.censored, 0);
        assert_eq!(result.compression, 0);
    }

    #[test]
    fn test_heavy_obfuscation() {
        let result = normalizer().normalize(&annotate(
            "FFFFFFFFF*CK!!!! It was soooooooo long t!me ago...",
        ));
        assert_eq!(result.text, "fuck!! it was so long time ago..");
    }

    #[test]
    fn test_emoticons_left_untouched() {
        let result = normalizer().normalize(&annotate("so excited oO (o.o)"));
        assert_eq!(result.text, "so excited oO (o.o)");
        assert_eq!(result.censored, 0);
    }

    #[test]
    fn test_empty_document() {
        let result = normalizer().normalize(&annotate(""));
        assert_eq!(result.text, "");
        assert_eq!(result.censored, 0);
        assert_eq!(result.compression, 0);
    }
}
