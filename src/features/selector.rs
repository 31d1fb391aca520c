//! Consensus feature selection
//!
//! Runs four independent importance rankings and fuses them by
//! rank-normalized voting. Rank-based fusion sidesteps the incompatible
//! score scales of the underlying methods (correlation lives in [-1, 1],
//! F-statistics are unbounded, forest importances sum to one). A method
//! that fails on the given data is logged and simply casts no votes.

use super::ranking::{
    correlation_ranking, f_statistic_ranking, forest_importance_ranking,
    mutual_information_ranking, ImportanceRanking,
};
use crate::data::FeatureTable;
use crate::error::{PipelineError, Result};
use crate::ml::ForestConfig;
use std::collections::HashMap;
use tracing::{info, warn};

/// Selector configuration
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    /// Number of consensus columns to keep
    pub top_k: usize,
    /// Bins for mutual-information discretization
    pub mi_bins: usize,
    /// Column cap for the F-statistic ranking
    pub f_test_cap: usize,
    /// Forest used by the model-based ranking
    pub forest: ForestConfig,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            top_k: 15,
            mi_bins: 20,
            f_test_cap: 100,
            forest: ForestConfig::default(),
        }
    }
}

/// Sum rank-normalized votes across rankings: the column at 0-indexed
/// rank `r` within a method's top-K earns `(K - r) / K`. Ties are broken
/// by column name so the result is deterministic.
pub fn consensus_vote(rankings: &[ImportanceRanking], top_k: usize) -> Vec<(String, f64)> {
    let mut votes: HashMap<&str, f64> = HashMap::new();
    for ranking in rankings {
        for (rank, (column, _score)) in ranking.iter().take(top_k).enumerate() {
            *votes.entry(column.as_str()).or_insert(0.0) +=
                (top_k - rank) as f64 / top_k as f64;
        }
    }

    let mut consensus: Vec<(String, f64)> = votes
        .into_iter()
        .map(|(column, weight)| (column.to_string(), weight))
        .collect();
    consensus.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    consensus.truncate(top_k);
    consensus
}

/// Label-supervised column selector; fit once, then project tables.
#[derive(Debug, Clone)]
pub struct FeatureSelector {
    config: SelectorConfig,
    selected: Option<Vec<String>>,
}

impl FeatureSelector {
    /// Create an unfitted selector.
    pub fn new(config: SelectorConfig) -> Self {
        Self {
            config,
            selected: None,
        }
    }

    /// Create an unfitted selector keeping `top_k` columns.
    pub fn with_top_k(top_k: usize) -> Self {
        Self::new(SelectorConfig {
            top_k,
            ..Default::default()
        })
    }

    fn validate_labels(table: &FeatureTable, labels: &[f64]) -> Result<()> {
        if labels.is_empty() {
            return Err(PipelineError::invalid_labels("labels are empty"));
        }
        if labels.len() != table.n_rows() {
            return Err(PipelineError::invalid_labels(format!(
                "{} labels for {} rows",
                labels.len(),
                table.n_rows()
            )));
        }
        if labels.iter().any(|l| !l.is_finite()) {
            return Err(PipelineError::invalid_labels(
                "labels contain non-finite values",
            ));
        }
        Ok(())
    }

    /// Rank all numeric columns with every method and store the consensus
    /// top-K selection.
    ///
    /// Individual method failures are tolerated: a failing method is
    /// logged and contributes no votes, the others proceed.
    pub fn fit(&mut self, table: &FeatureTable, labels: &[f64]) -> Result<()> {
        Self::validate_labels(table, labels)?;

        let methods: [(&'static str, std::result::Result<ImportanceRanking, PipelineError>); 4] = [
            ("correlation", correlation_ranking(table, labels)),
            (
                "mutual_information",
                mutual_information_ranking(table, labels, self.config.mi_bins),
            ),
            (
                "forest_importance",
                forest_importance_ranking(table, labels, self.config.forest.clone()),
            ),
            (
                "f_statistic",
                f_statistic_ranking(table, labels, self.config.f_test_cap),
            ),
        ];

        let mut rankings = Vec::with_capacity(methods.len());
        for (name, outcome) in methods {
            match outcome {
                Ok(ranking) => rankings.push(ranking),
                Err(err) => warn!("ranking method {} contributed no votes: {}", name, err),
            }
        }

        let consensus = consensus_vote(&rankings, self.config.top_k);
        let selected: Vec<String> = consensus.into_iter().map(|(column, _)| column).collect();

        info!(
            "selected {} of {} columns by consensus",
            selected.len(),
            table.n_columns()
        );
        self.selected = Some(selected);
        Ok(())
    }

    /// The fitted selection.
    pub fn selected_features(&self) -> Result<&[String]> {
        self.selected
            .as_deref()
            .ok_or(PipelineError::NotFitted("FeatureSelector"))
    }

    /// Project a table onto the fitted selection.
    pub fn transform(&self, table: &FeatureTable) -> Result<FeatureTable> {
        let selected = self.selected_features()?;
        table.select_columns(selected)
    }

    /// Fit and project in one step.
    pub fn fit_transform(&mut self, table: &FeatureTable, labels: &[f64]) -> Result<FeatureTable> {
        self.fit(table, labels)?;
        self.transform(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn ranking(pairs: &[(&str, f64)]) -> ImportanceRanking {
        pairs.iter().map(|(n, s)| (n.to_string(), *s)).collect()
    }

    fn synthetic_table() -> (FeatureTable, Vec<f64>) {
        let mut values = Array2::zeros((12, 3));
        let mut labels = Vec::new();
        for i in 0..12 {
            let class = (i >= 6) as usize as f64;
            values[[i, 0]] = class * 5.0 + (i % 3) as f64 * 0.1; // signal
            values[[i, 1]] = (i % 2) as f64; // noise
            values[[i, 2]] = ((i * 7) % 5) as f64; // noise
            labels.push(class);
        }
        let table = FeatureTable::new(
            vec![String::new(); 12],
            vec!["signal".into(), "parity".into(), "mod5".into()],
            values,
        );
        (table, labels)
    }

    #[test]
    fn test_consensus_vote_weights() {
        let rankings = vec![
            ranking(&[("a", 0.9), ("b", 0.5)]),
            ranking(&[("b", 120.0), ("c", 3.0)]),
        ];
        let consensus = consensus_vote(&rankings, 2);
        // a: 1.0, b: 0.5 + 1.0, c: 0.5
        assert_eq!(consensus[0], ("b".to_string(), 1.5));
        assert_eq!(consensus[1], ("a".to_string(), 1.0));
        assert_eq!(consensus.len(), 2);
    }

    #[test]
    fn test_consensus_vote_tie_breaks_by_name() {
        let rankings = vec![ranking(&[("b", 1.0)]), ranking(&[("a", 1.0)])];
        let consensus = consensus_vote(&rankings, 1);
        assert_eq!(consensus[0].0, "a");
    }

    #[test]
    fn test_fit_selects_signal_column() {
        let (table, labels) = synthetic_table();
        let mut selector = FeatureSelector::with_top_k(2);
        selector.fit(&table, &labels).unwrap();
        let selected = selector.selected_features().unwrap();
        assert!(selected.contains(&"signal".to_string()));
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (table, labels) = synthetic_table();
        let mut first = FeatureSelector::with_top_k(2);
        first.fit(&table, &labels).unwrap();
        let mut second = FeatureSelector::with_top_k(2);
        second.fit(&table, &labels).unwrap();
        assert_eq!(
            first.selected_features().unwrap(),
            second.selected_features().unwrap()
        );
    }

    #[test]
    fn test_transform_projects_selection() {
        let (table, labels) = synthetic_table();
        let mut selector = FeatureSelector::with_top_k(1);
        let projected = selector.fit_transform(&table, &labels).unwrap();
        assert_eq!(projected.n_columns(), 1);
        assert_eq!(projected.n_rows(), table.n_rows());
    }

    #[test]
    fn test_transform_before_fit_fails() {
        let (table, _) = synthetic_table();
        let selector = FeatureSelector::with_top_k(2);
        assert!(matches!(
            selector.transform(&table),
            Err(PipelineError::NotFitted(_))
        ));
    }

    #[test]
    fn test_invalid_labels_fail_fast() {
        let (table, mut labels) = synthetic_table();
        let mut selector = FeatureSelector::with_top_k(2);

        assert!(matches!(
            selector.fit(&table, &[]),
            Err(PipelineError::InvalidLabels(_))
        ));
        assert!(matches!(
            selector.fit(&table, &labels[..5]),
            Err(PipelineError::InvalidLabels(_))
        ));

        labels[0] = f64::NAN;
        assert!(matches!(
            selector.fit(&table, &labels),
            Err(PipelineError::InvalidLabels(_))
        ));
    }

    #[test]
    fn test_constant_labels_yield_empty_selection() {
        // every method degenerates, none aborts the fit
        let (table, _) = synthetic_table();
        let constant = vec![1.0; table.n_rows()];
        let mut selector = FeatureSelector::with_top_k(2);
        selector.fit(&table, &constant).unwrap();
        let selected = selector.selected_features().unwrap();
        // mutual information still ranks (all scores zero), so a selection
        // may exist; the fit itself must not fail
        assert!(selected.len() <= 2);
    }

    #[test]
    fn test_selected_set_is_deduplicated() {
        let (table, labels) = synthetic_table();
        let mut selector = FeatureSelector::with_top_k(3);
        selector.fit(&table, &labels).unwrap();
        let selected = selector.selected_features().unwrap();
        let unique: std::collections::HashSet<_> = selected.iter().collect();
        assert_eq!(unique.len(), selected.len());
    }

}
