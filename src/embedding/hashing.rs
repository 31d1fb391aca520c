//! Feature-hashing embedder
//!
//! Deterministic, dependency-free [`Embedder`] implementation: tokens are
//! sign-hashed into a fixed-dimension vector which is then L2-normalized.
//! Serves the CLI demo and tests; a sentence-transformer backend plugs in
//! behind the same trait for production use.

use super::Embedder;
use crate::error::Result;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Sign-hash bag-of-tokens embedder.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dim: usize,
    max_tokens: usize,
}

impl HashingEmbedder {
    /// Create an embedder with the given output dimension and input
    /// token limit.
    pub fn new(dim: usize, max_tokens: usize) -> Self {
        assert!(dim > 0, "dimension must be positive");
        Self { dim, max_tokens }
    }

    fn hash(token: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        hasher.finish()
    }

    fn embed_one(&self, text: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.dim];

        for token in text.split_whitespace() {
            let token = token.to_lowercase();
            let h = Self::hash(&token);
            let idx = (h % self.dim as u64) as usize;
            let sign = if h & (1 << 63) == 0 { 1.0 } else { -1.0 };
            vector[idx] += sign;
        }

        let norm: f64 = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

impl Default for HashingEmbedder {
    /// Mirrors a common sentence-transformer shape: 384 dimensions,
    /// 384-token context.
    fn default() -> Self {
        Self::new(384, 384)
    }
}

impl Embedder for HashingEmbedder {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f64>>> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn max_input_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Word-piece style count: alphanumeric runs and standalone symbols,
    /// plus two special tokens.
    fn token_count(&self, text: &str) -> usize {
        let mut count = 2;
        let mut in_word = false;
        for c in text.chars() {
            if c.is_alphanumeric() {
                if !in_word {
                    count += 1;
                    in_word = true;
                }
            } else {
                in_word = false;
                if !c.is_whitespace() {
                    count += 1;
                }
            }
        }
        count
    }
}
