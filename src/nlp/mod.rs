//! Linguistic processing
//!
//! Includes:
//! - Document annotation (tokens, lemmas, sentence boundaries)
//! - The shared emoticon lexicon
//! - Typo/censorship normalization
//! - Concatenated-word repair

pub mod annotator;
pub mod emoticons;
pub mod normalizer;
pub mod splitter;
pub mod types;

pub use annotator::{Annotator, RuleAnnotator};
pub use emoticons::EmoticonLexicon;
pub use normalizer::{collapse_repeats, NormalizedText, TextNormalizer};
pub use splitter::fix_concatenated_words;
pub use types::{AnnotatedDocument, Sentence, Token};
