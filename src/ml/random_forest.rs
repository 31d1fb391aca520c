//! Random forest classifier
//!
//! Bagged, depth-capped trees with aggregated impurity importances. The
//! selector's model-based ranking reads `feature_importances` after a
//! fit; prediction is majority vote across trees.

use super::decision_tree::{DecisionTree, TreeConfig};
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::collections::HashMap;

/// Random forest configuration
#[derive(Debug, Clone)]
pub struct ForestConfig {
    /// Number of trees
    pub n_trees: usize,
    /// Maximum depth per tree
    pub max_depth: usize,
    /// Minimum samples to split
    pub min_samples_split: usize,
    /// Minimum samples in a leaf
    pub min_samples_leaf: usize,
    /// Features per split (None = sqrt of total)
    pub max_features: Option<usize>,
    /// Bootstrap sampling
    pub bootstrap: bool,
    /// Random seed
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_samples_split: 5,
            min_samples_leaf: 2,
            max_features: None,
            bootstrap: true,
            seed: 42,
        }
    }
}

/// Bagged ensemble of [`DecisionTree`]s.
#[derive(Debug, Clone)]
pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<DecisionTree>,
    importances: Vec<f64>,
}

impl RandomForest {
    /// Create an untrained forest.
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            importances: Vec::new(),
        }
    }

    /// Train the forest; trees build in parallel with per-tree seeds so
    /// repeated fits are identical.
    pub fn fit(&mut self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>) {
        assert_eq!(x.nrows(), y.len(), "X rows must match y length");

        let n_features = x.ncols();
        let max_features = self
            .config
            .max_features
            .unwrap_or_else(|| (n_features as f64).sqrt().ceil() as usize)
            .max(1);

        let config = self.config.clone();
        self.trees = (0..config.n_trees)
            .into_par_iter()
            .map(|i| {
                let seed = config.seed.wrapping_add(i as u64);
                let tree_config = TreeConfig {
                    max_depth: config.max_depth,
                    min_samples_split: config.min_samples_split,
                    min_samples_leaf: config.min_samples_leaf,
                    max_features: Some(max_features),
                    seed,
                };

                let mut tree = DecisionTree::new(tree_config);
                if config.bootstrap {
                    let indices = Self::bootstrap_indices(x.nrows(), seed);
                    let x_boot = x.select(Axis(0), &indices);
                    let y_boot = Array1::from_iter(indices.iter().map(|&i| y[i]));
                    tree.fit(x_boot.view(), y_boot.view());
                } else {
                    tree.fit(x, y);
                }
                tree
            })
            .collect();

        self.importances = vec![0.0; n_features];
        for tree in &self.trees {
            for (total, &imp) in self.importances.iter_mut().zip(tree.feature_importances()) {
                *total += imp;
            }
        }
        let sum: f64 = self.importances.iter().sum();
        if sum > 0.0 {
            for imp in &mut self.importances {
                *imp /= sum;
            }
        }
    }

    /// Majority-vote prediction for each row.
    pub fn predict(&self, x: ArrayView2<'_, f64>) -> Array1<f64> {
        Array1::from_iter(x.rows().into_iter().map(|row| self.predict_one(row)))
    }

    fn predict_one(&self, row: ArrayView1<'_, f64>) -> f64 {
        let mut votes: HashMap<u64, usize> = HashMap::new();
        for tree in &self.trees {
            *votes.entry(tree.predict_one(row).to_bits()).or_insert(0) += 1;
        }
        votes
            .into_iter()
            .map(|(bits, count)| (f64::from_bits(bits), count))
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.total_cmp(&a.0)))
            .map(|(class, _)| class)
            .unwrap_or(0.0)
    }

    /// Normalized, ensemble-aggregated feature importances.
    pub fn feature_importances(&self) -> &[f64] {
        &self.importances
    }

    fn bootstrap_indices(n: usize, seed: u64) -> Vec<usize> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..n).map(|_| rng.gen_range(0..n)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_forest_importances_are_deterministic() {
        let x = array![
            [0.1, 9.0],
            [0.3, 2.0],
            [0.2, 7.5],
            [0.4, 1.0],
            [5.0, 8.0],
            [5.2, 3.0],
            [5.1, 6.0],
            [5.3, 2.5],
        ];
        let y = array![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];

        let config = ForestConfig {
            n_trees: 15,
            min_samples_split: 2,
            min_samples_leaf: 1,
            ..Default::default()
        };

        let mut first = RandomForest::new(config.clone());
        first.fit(x.view(), y.view());
        let mut second = RandomForest::new(config);
        second.fit(x.view(), y.view());

        assert_eq!(first.feature_importances(), second.feature_importances());
        assert!(first.feature_importances()[0] > first.feature_importances()[1]);
    }

    #[test]
    fn test_forest_predicts_separable_classes() {
        let x = array![[0.0], [0.2], [0.4], [0.6], [5.0], [5.2], [5.4], [5.6]];
        let y = array![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];

        let mut forest = RandomForest::new(ForestConfig {
            n_trees: 11,
            min_samples_split: 2,
            min_samples_leaf: 1,
            ..Default::default()
        });
        forest.fit(x.view(), y.view());

        let predictions = forest.predict(array![[0.1], [5.5]].view());
        assert_eq!(predictions, array![0.0, 1.0]);
    }
}
