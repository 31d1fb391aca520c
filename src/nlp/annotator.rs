//! Document annotation
//!
//! [`Annotator`] is the boundary to the linguistic tokenizer: it turns one
//! raw message into an [`AnnotatedDocument`] with tokens, lemmas,
//! punctuation/stopword flags and sentence spans. [`RuleAnnotator`] is a
//! lightweight rule-based implementation of that contract; a full
//! linguistic tokenizer can be plugged in behind the same trait.

use super::emoticons::EmoticonLexicon;
use super::types::{AnnotatedDocument, Sentence, Token};
use std::collections::HashSet;

/// Function words excluded from spelling correction.
///
/// Roughly the usual English stopword inventory, plus the contracted forms
/// the tokenizer keeps as single tokens.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "became", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "came", "can", "come", "could", "did", "do", "does", "doing", "down",
    "during", "each", "else", "ever", "every", "few", "for", "from", "further", "get", "got",
    "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him", "himself",
    "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "like", "may",
    "me", "might", "mine", "more", "most", "much", "must", "my", "myself", "never", "no", "nor",
    "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves",
    "out", "over", "own", "quite", "rather", "really", "same", "shall", "she", "should", "so",
    "some", "still", "such", "than", "that", "the", "their", "theirs", "them", "themselves",
    "then", "there", "these", "they", "this", "those", "through", "too", "under", "until", "up",
    "upon", "us", "very", "was", "we", "well", "were", "what", "when", "where", "which", "while",
    "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
    // contracted forms kept whole by the tokenizer
    "ain't", "aren't", "can't", "couldn't", "didn't", "doesn't", "don't", "hadn't", "hasn't",
    "haven't", "he'd", "he'll", "he's", "here's", "i'd", "i'll", "i'm", "i've", "isn't", "it'd",
    "it'll", "it's", "let's", "mustn't", "needn't", "she'd", "she'll", "she's", "shouldn't",
    "that's", "there's", "they'd", "they'll", "they're", "they've", "wasn't", "we'd", "we'll",
    "we're", "we've", "weren't", "what's", "who's", "won't", "wouldn't", "you'd", "you'll",
    "you're", "you've",
];

/// Anything that can annotate raw text into a document.
pub trait Annotator {
    /// Annotate one input string.
    fn annotate(&self, text: &str) -> AnnotatedDocument;

    /// Annotate a batch of input strings.
    fn annotate_batch(&self, texts: &[String]) -> Vec<AnnotatedDocument> {
        texts.iter().map(|t| self.annotate(t)).collect()
    }
}

/// Rule-based [`Annotator`] implementation.
///
/// Tokenization: whitespace segmentation with leading/trailing
/// punctuation-run peeling; emoticon symbols survive as single tokens;
/// word-internal symbols (apostrophes, hyphens, censorship substitutions)
/// stay attached. Lemma = lowercased surface. Sentences break after
/// `.`/`!`/`?` runs followed by whitespace, and at newlines.
pub struct RuleAnnotator {
    stopwords: HashSet<&'static str>,
    lexicon: EmoticonLexicon,
}

impl RuleAnnotator {
    /// Create an annotator with the standard stopword list and emoticon
    /// lexicon.
    pub fn new(lexicon: EmoticonLexicon) -> Self {
        Self {
            stopwords: STOP_WORDS.iter().copied().collect(),
            lexicon,
        }
    }

    fn is_symbol(c: char) -> bool {
        !c.is_alphanumeric() && !c.is_whitespace()
    }

    fn is_stopword(&self, lemma: &str) -> bool {
        self.stopwords.contains(lemma)
    }

    /// Split one whitespace-delimited piece into token texts.
    ///
    /// A piece that exactly matches an emoticon symbol is kept whole, as is
    /// the core left after peeling punctuation runs off either end.
    fn split_piece<'a>(&self, piece: &'a str) -> Vec<&'a str> {
        if piece.is_empty() {
            return Vec::new();
        }
        if self.lexicon.is_emoticon(piece) {
            return vec![piece];
        }

        // All-symbol pieces are a single punctuation token.
        if piece.chars().all(Self::is_symbol) {
            return vec![piece];
        }

        let lead_end = piece
            .char_indices()
            .find(|(_, c)| !Self::is_symbol(*c))
            .map(|(i, _)| i)
            .unwrap_or(piece.len());
        let tail_start = piece
            .char_indices()
            .rev()
            .find(|(_, c)| !Self::is_symbol(*c))
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);

        let mut parts = Vec::new();
        if lead_end > 0 {
            parts.push(&piece[..lead_end]);
        }
        let core = &piece[lead_end..tail_start];
        if !core.is_empty() {
            parts.push(core);
        }
        if tail_start < piece.len() {
            parts.push(&piece[tail_start..]);
        }
        parts
    }

    fn make_token(&self, text: &str, whitespace: String, position: usize) -> Token {
        let lemma = text.to_lowercase();
        let is_emoticon = self.lexicon.is_emoticon(text);
        let is_punct = !is_emoticon && text.chars().all(Self::is_symbol);
        let is_stop = !is_emoticon && !is_punct && self.is_stopword(&lemma);
        Token {
            text: text.to_string(),
            lemma,
            is_punct,
            is_stop,
            whitespace,
            position,
        }
    }

    /// Sentence boundaries: after a `.`/`!`/`?` run followed by whitespace
    /// or end of input, and at every newline.
    fn split_sentences(text: &str) -> Vec<Sentence> {
        let mut sentences = Vec::new();
        let mut current = String::new();
        let chars: Vec<char> = text.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if c == '\n' {
                if !current.trim().is_empty() {
                    sentences.push(Sentence {
                        text: std::mem::take(&mut current),
                    });
                } else {
                    current.clear();
                }
                i += 1;
                continue;
            }
            current.push(c);
            if matches!(c, '.' | '!' | '?') {
                // absorb the rest of the terminator run
                while i + 1 < chars.len() && matches!(chars[i + 1], '.' | '!' | '?') {
                    i += 1;
                    current.push(chars[i]);
                }
                let at_boundary =
                    i + 1 >= chars.len() || chars[i + 1].is_whitespace();
                if at_boundary && !current.trim().is_empty() {
                    sentences.push(Sentence {
                        text: std::mem::take(&mut current),
                    });
                }
            }
            i += 1;
        }
        if !current.trim().is_empty() {
            sentences.push(Sentence { text: current });
        }
        sentences
    }
}

impl Annotator for RuleAnnotator {
    fn annotate(&self, text: &str) -> AnnotatedDocument {
        let mut tokens = Vec::new();
        let mut position = 0;

        // Walk the text as alternating piece/whitespace spans so every
        // token records the whitespace that followed it.
        let mut idx = 0;
        while idx < text.len() {
            let rest = &text[idx..];
            let piece_len = rest
                .char_indices()
                .find(|(_, c)| c.is_whitespace())
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            let piece = &rest[..piece_len];
            let after_piece = &rest[piece_len..];
            let ws_len = after_piece
                .char_indices()
                .find(|(_, c)| !c.is_whitespace())
                .map(|(i, _)| i)
                .unwrap_or(after_piece.len());
            let whitespace = &after_piece[..ws_len];

            if !piece.is_empty() {
                let parts = self.split_piece(piece);
                let last = parts.len().saturating_sub(1);
                for (k, part) in parts.iter().enumerate() {
                    let ws = if k == last { whitespace } else { "" };
                    tokens.push(self.make_token(part, ws.to_string(), position));
                    position += 1;
                }
            }
            idx += piece_len + ws_len;
        }

        AnnotatedDocument {
            text: text.to_string(),
            tokens,
            sentences: Self::split_sentences(text),
        }
    }
}
