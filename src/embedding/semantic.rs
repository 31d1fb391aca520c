//! Chunked document embedding
//!
//! Long documents exceed the embedding model's context, so each text is
//! split into token-bounded chunks, every chunk is embedded, and the
//! chunk vectors are folded into one document vector weighted by chunk
//! character length.

use super::chunker::{split_sentence_groups, split_with_budget, SEPARATOR_PRIORITY};
use super::Embedder;
use crate::error::{PipelineError, Result};
use ndarray::Array2;
use tracing::{info, warn};

/// Tokens held back from the embedder's maximum as a safety margin.
const SAFETY_MARGIN: usize = 50;

/// Chunks sent to the embedder per call.
const EMBED_BATCH_SIZE: usize = 512;

/// Fraction of the chunk budget shared between neighboring chunks.
const OVERLAP_FRACTION: f64 = 0.2;

/// Document embedder built on a chunking front-end.
pub struct SemanticChunker<E: Embedder> {
    embedder: E,
    chunk_token_size: usize,
    overlap: usize,
    batch_size: usize,
}

impl<E: Embedder> SemanticChunker<E> {
    /// Wrap an embedder, deriving the chunk budget from its input limit.
    pub fn new(embedder: E) -> Self {
        let chunk_token_size = embedder.max_input_tokens().saturating_sub(SAFETY_MARGIN).max(1);
        let overlap = (chunk_token_size as f64 * OVERLAP_FRACTION) as usize;
        Self {
            embedder,
            chunk_token_size,
            overlap,
            batch_size: EMBED_BATCH_SIZE,
        }
    }

    /// The derived per-chunk token budget.
    pub fn chunk_token_size(&self) -> usize {
        self.chunk_token_size
    }

    /// Access the wrapped embedder.
    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Split one text into chunks within the token budget.
    ///
    /// In-budget text is a single chunk; oversized text is first cut at
    /// sentence boundaries, then each sentence group is split further
    /// down the separator priority list. Whitespace-only text yields no
    /// chunks.
    pub fn chunk_text(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        if self.embedder.token_count(text) <= self.chunk_token_size {
            return vec![text.to_string()];
        }

        let measure = |t: &str| self.embedder.token_count(t);
        let mut chunks = Vec::new();
        for sentence in split_sentence_groups(text) {
            chunks.extend(split_with_budget(
                &sentence,
                self.chunk_token_size,
                self.overlap,
                SEPARATOR_PRIORITY,
                &measure,
            ));
        }

        for chunk in &chunks {
            if self.embedder.token_count(chunk) > self.chunk_token_size {
                warn!(
                    "chunk of {} tokens exceeds budget {}",
                    self.embedder.token_count(chunk),
                    self.chunk_token_size
                );
            }
        }
        chunks
    }

    /// Embed every text into one fixed-length vector per row.
    ///
    /// Chunks from all texts are batched through the embedder together;
    /// a text with no chunks embeds to the zero vector.
    pub fn embed(&self, texts: &[String]) -> Result<Array2<f64>> {
        let dim = self.embedder.dimension();

        let mut all_chunks: Vec<String> = Vec::new();
        let mut spans: Vec<(usize, usize)> = Vec::with_capacity(texts.len());
        for text in texts {
            let chunks = self.chunk_text(text);
            spans.push((all_chunks.len(), chunks.len()));
            all_chunks.extend(chunks);
        }
        info!(
            "embedding {} chunks for {} documents",
            all_chunks.len(),
            texts.len()
        );

        let mut chunk_vectors: Vec<Vec<f64>> = Vec::with_capacity(all_chunks.len());
        for batch in all_chunks.chunks(self.batch_size.max(1)) {
            let refs: Vec<&str> = batch.iter().map(String::as_str).collect();
            let vectors = self.embedder.embed_batch(&refs)?;
            for vector in &vectors {
                if vector.len() != dim {
                    return Err(PipelineError::DimensionMismatch {
                        expected: dim,
                        actual: vector.len(),
                    });
                }
            }
            chunk_vectors.extend(vectors);
        }

        let mut out = Array2::zeros((texts.len(), dim));
        for (row, &(start, count)) in spans.iter().enumerate() {
            match count {
                0 => {} // zero vector
                1 => {
                    for (j, &v) in chunk_vectors[start].iter().enumerate() {
                        out[[row, j]] = v;
                    }
                }
                _ => {
                    let chunks = &all_chunks[start..start + count];
                    let lengths: Vec<f64> =
                        chunks.iter().map(|c| c.chars().count() as f64).collect();
                    let total: f64 = lengths.iter().sum();
                    for (vector, &length) in chunk_vectors[start..start + count].iter().zip(&lengths)
                    {
                        let weight = length / total;
                        for (j, &v) in vector.iter().enumerate() {
                            out[[row, j]] += weight * v;
                        }
                    }
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Embedder stub: whitespace token count plus two specials, vectors
    /// chosen per call order, batch sizes recorded.
    struct StubEmbedder {
        dim: usize,
        max_tokens: usize,
        batches: RefCell<Vec<usize>>,
        served: RefCell<usize>,
    }

    impl StubEmbedder {
        fn new(dim: usize, max_tokens: usize) -> Self {
            Self {
                dim,
                max_tokens,
                batches: RefCell::new(Vec::new()),
                served: RefCell::new(0),
            }
        }
    }

    impl Embedder for StubEmbedder {
        fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f64>>> {
            self.batches.borrow_mut().push(texts.len());
            let mut served = self.served.borrow_mut();
            Ok(texts
                .iter()
                .map(|_| {
                    let mut v = vec![0.0; self.dim];
                    v[*served % self.dim] = 1.0;
                    *served += 1;
                    v
                })
                .collect())
        }

        fn dimension(&self) -> usize {
            self.dim
        }

        fn max_input_tokens(&self) -> usize {
            self.max_tokens
        }

        fn token_count(&self, text: &str) -> usize {
            text.split_whitespace().count() + 2
        }
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunker = SemanticChunker::new(StubEmbedder::new(4, 60));
        assert_eq!(chunker.chunk_text("a few words"), vec!["a few words"]);
    }

    #[test]
    fn test_single_chunk_embedding_is_exact() {
        let chunker = SemanticChunker::new(StubEmbedder::new(4, 60));
        let out = chunker.embed(&["short".to_string()]).unwrap();
        assert_eq!(out.row(0).to_vec(), vec![1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_text_embeds_to_zero_vector() {
        let chunker = SemanticChunker::new(StubEmbedder::new(4, 60));
        let out = chunker
            .embed(&["".to_string(), "   ".to_string()])
            .unwrap();
        assert_eq!(out.row(0).to_vec(), vec![0.0; 4]);
        assert_eq!(out.row(1).to_vec(), vec![0.0; 4]);
    }

    #[test]
    fn test_two_chunk_weighting() {
        // budget = 54 - 50 = 4 tokens; each sentence fits, the whole does not
        let chunker = SemanticChunker::new(StubEmbedder::new(2, 54));
        let text = "aa bb. cccccc dddddddd.".to_string();

        let chunks = chunker.chunk_text(&text);
        assert_eq!(chunks.len(), 2);
        let l1 = chunks[0].chars().count() as f64;
        let l2 = chunks[1].chars().count() as f64;

        let out = chunker.embed(&[text]).unwrap();
        let expected = vec![l1 / (l1 + l2), l2 / (l1 + l2)];
        for (got, want) in out.row(0).iter().zip(&expected) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn test_chunks_fit_token_budget() {
        let embedder = StubEmbedder::new(2, 55);
        let chunker = SemanticChunker::new(embedder);
        let text = "one two three four five six seven eight nine ten. eleven twelve thirteen fourteen.";
        for chunk in chunker.chunk_text(text) {
            assert!(chunker.embedder().token_count(&chunk) <= chunker.chunk_token_size());
        }
    }

    #[test]
    fn test_chunks_are_batched() {
        let embedder = StubEmbedder::new(2, 54);
        let mut chunker = SemanticChunker::new(embedder);
        chunker.batch_size = 2;

        let texts: Vec<String> = (0..3).map(|_| "aa bb. cc dd. ee ff.".to_string()).collect();
        chunker.embed(&texts).unwrap();

        let batches = chunker.embedder().batches.borrow();
        assert!(batches.iter().all(|&len| len <= 2));
        assert_eq!(batches.iter().sum::<usize>(), 9);
    }
}
