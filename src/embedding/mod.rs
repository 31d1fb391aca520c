//! Semantic embedding of normalized text
//!
//! The [`Embedder`] trait is the boundary to the embedding model; the
//! [`SemanticChunker`] handles documents longer than the model's context
//! by chunking and length-weighted aggregation.

pub mod chunker;
pub mod hashing;
pub mod semantic;

pub use chunker::{split_sentence_groups, split_with_budget, SEPARATOR_PRIORITY};
pub use hashing::HashingEmbedder;
pub use semantic::SemanticChunker;

use crate::error::Result;

/// A model mapping batches of strings to fixed-length vectors.
pub trait Embedder {
    /// Embed a batch of texts, one vector per input, all of
    /// [`dimension`](Embedder::dimension) length.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f64>>>;

    /// Output vector dimensionality.
    fn dimension(&self) -> usize;

    /// Maximum input length in the model's own tokens.
    fn max_input_tokens(&self) -> usize;

    /// Length of a text under the model's own tokenization.
    fn token_count(&self, text: &str) -> usize;
}
