//! # Text Risk - normalization and feature engineering for message risk classification
//!
//! This library turns noisy, adversarial social-media text (misspellings,
//! censorship substitutions, repeated characters, concatenated words,
//! emoticons, URLs, run-on messages) into a stable numeric representation
//! for a downstream classifier. It provides:
//!
//! - Caching dual-oracle spelling correction
//! - Token-level typo/censorship normalization with diagnostic counters
//! - Fixed-schema statistical feature extraction
//! - Multi-method consensus feature selection
//! - Token-budgeted chunking with length-weighted embedding aggregation

pub mod data;
pub mod embedding;
pub mod error;
pub mod features;
pub mod ml;
pub mod nlp;
pub mod pipeline;
pub mod spell;

pub use data::{DataLoader, FeatureTable, LabelEncoder, LabelledMessage};
pub use embedding::{Embedder, HashingEmbedder, SemanticChunker};
pub use error::{PipelineError, Result};
pub use features::{FeatureExtractor, FeatureSelector, StandardScaler};
pub use nlp::{AnnotatedDocument, Annotator, EmoticonLexicon, RuleAnnotator, TextNormalizer};
pub use pipeline::RiskPipeline;
pub use spell::SpellCorrector;
