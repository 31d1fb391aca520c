//! End-to-end preprocessing pipeline
//!
//! Chains concatenated-word repair, annotation, feature extraction,
//! consensus selection, scaling and semantic embedding into the numeric
//! matrix handed to the classifier: scaled selected features on the
//! left, the document embedding on the right.

use crate::data::FeatureTable;
use crate::embedding::{Embedder, SemanticChunker};
use crate::error::Result;
use crate::features::{FeatureExtractor, FeatureSelector, StandardScaler};
use crate::nlp::{fix_concatenated_words, Annotator, EmoticonLexicon, RuleAnnotator};
use crate::spell::SpellCorrector;
use ndarray::{concatenate, Array2, Axis};
use tracing::info;

/// Full text-to-matrix pipeline.
///
/// Fit once on labelled training texts, then transform any batch. The
/// only state learned at fit time is the selector's column set and the
/// scaler's statistics; everything else is stateless per batch.
pub struct RiskPipeline<E: Embedder> {
    annotator: RuleAnnotator,
    extractor: FeatureExtractor,
    selector: FeatureSelector,
    scaler: StandardScaler,
    chunker: SemanticChunker<E>,
}

impl<E: Embedder> RiskPipeline<E> {
    /// Assemble a pipeline around an embedder, keeping `top_k` consensus
    /// features.
    pub fn new(embedder: E, top_k: usize) -> Self {
        let lexicon = EmoticonLexicon::standard();
        Self {
            annotator: RuleAnnotator::new(lexicon.clone()),
            extractor: FeatureExtractor::new(SpellCorrector::new()),
            selector: FeatureSelector::with_top_k(top_k),
            scaler: StandardScaler::new(),
            chunker: SemanticChunker::new(embedder),
        }
    }

    /// Run repair, annotation and extraction for a batch of raw texts.
    pub fn extract_features(&self, texts: &[String]) -> FeatureTable {
        let repaired = fix_concatenated_words(texts);
        let docs = self.annotator.annotate_batch(&repaired);
        self.extractor.extract(&docs)
    }

    /// Fit the supervised stages and produce the training matrix.
    pub fn fit_transform(&mut self, texts: &[String], labels: &[f64]) -> Result<Array2<f64>> {
        info!("pipeline fit on {} documents", texts.len());
        let table = self.extract_features(texts);

        self.selector.fit(&table, labels)?;
        let selected = self.selector.transform(&table)?;
        let scaled = self.scaler.fit_transform(selected.values())?;
        let embedded = self.chunker.embed(selected.texts())?;

        Ok(concatenate(Axis(1), &[scaled.view(), embedded.view()])
            .expect("scaled and embedded row counts match"))
    }

    /// Produce the matrix for new texts with the fitted stages.
    pub fn transform(&self, texts: &[String]) -> Result<Array2<f64>> {
        let table = self.extract_features(texts);

        let selected = self.selector.transform(&table)?;
        let scaled = self.scaler.transform(selected.values())?;
        let embedded = self.chunker.embed(selected.texts())?;

        Ok(concatenate(Axis(1), &[scaled.view(), embedded.view()])
            .expect("scaled and embedded row counts match"))
    }

    /// Consensus feature names chosen at fit time.
    pub fn selected_features(&self) -> Result<&[String]> {
        self.selector.selected_features()
    }
}
