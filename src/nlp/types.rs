//! Core document types produced by annotation
//!
//! An [`AnnotatedDocument`] is the unit of work for the feature pipeline:
//! one input message with its token sequence and sentence boundaries.

use serde::{Deserialize, Serialize};

/// A single token within an annotated document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// Surface text exactly as it appears in the input
    pub text: String,
    /// Lowercase/lemma form used for matching and correction
    pub lemma: String,
    /// Whether the token consists solely of punctuation/symbol characters
    pub is_punct: bool,
    /// Whether the token is a function word excluded from correction
    pub is_stop: bool,
    /// Whitespace that followed the token in the input; joining
    /// `text + whitespace` over all tokens reproduces the input exactly
    pub whitespace: String,
    /// Position index within the document's token sequence
    pub position: usize,
}

/// A contiguous sentence span within a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sentence {
    /// The sentence text, untrimmed
    pub text: String,
}

impl Sentence {
    /// Character length of the trimmed sentence text.
    pub fn trimmed_len(&self) -> usize {
        self.text.trim().chars().count()
    }
}

/// One input message with its linguistic annotations.
///
/// Immutable once produced by an [`Annotator`](super::Annotator);
/// discarded after feature extraction for the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedDocument {
    /// The original input text
    pub text: String,
    /// Ordered token sequence
    pub tokens: Vec<Token>,
    /// Ordered sentence spans
    pub sentences: Vec<Sentence>,
}

impl AnnotatedDocument {
    /// Reconstruct the original text from tokens and trailing whitespace.
    pub fn reconstruct(&self) -> String {
        let mut out = String::with_capacity(self.text.len());
        for token in &self.tokens {
            out.push_str(&token.text);
            out.push_str(&token.whitespace);
        }
        out
    }

    /// Character length of the original text.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
