//! Decision tree classifier
//!
//! Depth-capped CART used as the building block of the bagged ensemble
//! behind model-based feature ranking. Splits minimize Gini impurity;
//! every accepted split credits its impurity gain (weighted by node size)
//! to the split feature, which is what the selector consumes.

use ndarray::{ArrayView1, ArrayView2};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

/// Decision tree configuration
#[derive(Debug, Clone)]
pub struct TreeConfig {
    /// Maximum depth of the tree
    pub max_depth: usize,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Minimum samples in a leaf
    pub min_samples_leaf: usize,
    /// Features considered per split (None = all)
    pub max_features: Option<usize>,
    /// Random seed for feature subsampling
    pub seed: u64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            min_samples_split: 5,
            min_samples_leaf: 2,
            max_features: None,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    feature: Option<usize>,
    threshold: f64,
    prediction: f64,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn leaf(prediction: f64) -> Self {
        Self {
            feature: None,
            threshold: 0.0,
            prediction,
            left: None,
            right: None,
        }
    }

    fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// CART classifier over a numeric feature matrix.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    config: TreeConfig,
    root: Option<Node>,
    importances: Vec<f64>,
}

impl DecisionTree {
    /// Create an untrained tree.
    pub fn new(config: TreeConfig) -> Self {
        Self {
            config,
            root: None,
            importances: Vec::new(),
        }
    }

    /// Train on a feature matrix and class-id labels.
    pub fn fit(&mut self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>) {
        assert_eq!(x.nrows(), y.len(), "X rows must match y length");

        self.importances = vec![0.0; x.ncols()];
        let indices: Vec<usize> = (0..x.nrows()).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);

        self.root = Some(self.build(x, y, &indices, 0, &mut rng));

        let total: f64 = self.importances.iter().sum();
        if total > 0.0 {
            for imp in &mut self.importances {
                *imp /= total;
            }
        }
    }

    /// Predict the class id of a single sample.
    pub fn predict_one(&self, row: ArrayView1<'_, f64>) -> f64 {
        let mut node = match &self.root {
            Some(root) => root,
            None => return 0.0,
        };
        loop {
            if node.is_leaf() {
                return node.prediction;
            }
            let feature = node.feature.expect("internal node without feature");
            node = if row[feature] <= node.threshold {
                node.left.as_ref().expect("internal node without left child")
            } else {
                node.right.as_ref().expect("internal node without right child")
            };
        }
    }

    /// Normalized per-feature impurity-gain importances.
    pub fn feature_importances(&self) -> &[f64] {
        &self.importances
    }

    fn build(
        &mut self,
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, f64>,
        indices: &[usize],
        depth: usize,
        rng: &mut ChaCha8Rng,
    ) -> Node {
        let impurity = Self::gini(y, indices);

        if depth >= self.config.max_depth
            || indices.len() < self.config.min_samples_split
            || impurity < 1e-10
        {
            return Node::leaf(Self::majority(y, indices));
        }

        let Some(split) = self.best_split(x, y, indices, impurity, rng) else {
            return Node::leaf(Self::majority(y, indices));
        };

        if split.left.len() < self.config.min_samples_leaf
            || split.right.len() < self.config.min_samples_leaf
        {
            return Node::leaf(Self::majority(y, indices));
        }

        self.importances[split.feature] += split.gain * indices.len() as f64;

        let left = self.build(x, y, &split.left, depth + 1, rng);
        let right = self.build(x, y, &split.right, depth + 1, rng);

        Node {
            feature: Some(split.feature),
            threshold: split.threshold,
            prediction: Self::majority(y, indices),
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    fn best_split(
        &self,
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, f64>,
        indices: &[usize],
        parent_impurity: f64,
        rng: &mut ChaCha8Rng,
    ) -> Option<Split> {
        let n_features = x.ncols();
        let max_features = self.config.max_features.unwrap_or(n_features).min(n_features);

        let mut candidates: Vec<usize> = (0..n_features).collect();
        candidates.shuffle(rng);
        candidates.truncate(max_features);
        // deterministic tie-breaking across equal-gain features
        candidates.sort_unstable();

        let mut best: Option<Split> = None;

        for feature in candidates {
            let mut values: Vec<f64> = indices.iter().map(|&i| x[[i, feature]]).collect();
            values.sort_by(|a, b| a.total_cmp(b));
            values.dedup();

            for window in values.windows(2) {
                let threshold = (window[0] + window[1]) / 2.0;

                let (left, right): (Vec<usize>, Vec<usize>) =
                    indices.iter().partition(|&&i| x[[i, feature]] <= threshold);
                if left.is_empty() || right.is_empty() {
                    continue;
                }

                let weighted = (left.len() as f64 * Self::gini(y, &left)
                    + right.len() as f64 * Self::gini(y, &right))
                    / indices.len() as f64;
                let gain = parent_impurity - weighted;

                if best.as_ref().map_or(gain > 0.0, |b| gain > b.gain) {
                    best = Some(Split {
                        feature,
                        threshold,
                        gain,
                        left,
                        right,
                    });
                }
            }
        }
        best
    }

    fn class_counts(y: ArrayView1<'_, f64>, indices: &[usize]) -> HashMap<u64, usize> {
        let mut counts = HashMap::new();
        for &i in indices {
            *counts.entry(y[i].to_bits()).or_insert(0) += 1;
        }
        counts
    }

    fn gini(y: ArrayView1<'_, f64>, indices: &[usize]) -> f64 {
        if indices.is_empty() {
            return 0.0;
        }
        let n = indices.len() as f64;
        let counts = Self::class_counts(y, indices);
        1.0 - counts
            .values()
            .map(|&c| {
                let p = c as f64 / n;
                p * p
            })
            .sum::<f64>()
    }

    fn majority(y: ArrayView1<'_, f64>, indices: &[usize]) -> f64 {
        Self::class_counts(y, indices)
            .into_iter()
            .map(|(bits, count)| (f64::from_bits(bits), count))
            // tie-break on the smaller class id so training is deterministic
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.total_cmp(&a.0)))
            .map(|(class, _)| class)
            .unwrap_or(0.0)
    }
}

struct Split {
    feature: usize,
    threshold: f64,
    gain: f64,
    left: Vec<usize>,
    right: Vec<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1, Array2};

    fn separable_data() -> (Array2<f64>, Array1<f64>) {
        let x = array![
            [0.1, 5.0],
            [0.2, 4.0],
            [0.3, 6.0],
            [0.4, 5.5],
            [5.1, 5.2],
            [5.2, 4.8],
            [5.3, 6.1],
            [5.4, 5.0],
        ];
        let y = array![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];
        (x, y)
    }

    #[test]
    fn test_learns_separable_classes() {
        let (x, y) = separable_data();
        let mut tree = DecisionTree::new(TreeConfig {
            min_samples_split: 2,
            min_samples_leaf: 1,
            ..Default::default()
        });
        tree.fit(x.view(), y.view());

        assert_eq!(tree.predict_one(array![0.25, 5.0].view()), 0.0);
        assert_eq!(tree.predict_one(array![5.25, 5.0].view()), 1.0);
    }

    #[test]
    fn test_importance_goes_to_informative_feature() {
        let (x, y) = separable_data();
        let mut tree = DecisionTree::new(TreeConfig {
            min_samples_split: 2,
            min_samples_leaf: 1,
            ..Default::default()
        });
        tree.fit(x.view(), y.view());

        let importances = tree.feature_importances();
        assert!(importances[0] > importances[1]);
        assert!((importances.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_constant_labels_yield_single_leaf() {
        let x = array![[1.0], [2.0], [3.0]];
        let y = array![1.0, 1.0, 1.0];
        let mut tree = DecisionTree::new(TreeConfig::default());
        tree.fit(x.view(), y.view());
        assert_eq!(tree.predict_one(array![10.0].view()), 1.0);
    }
}
