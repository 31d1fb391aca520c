//! Tree models backing model-based feature ranking

pub mod decision_tree;
pub mod random_forest;

pub use decision_tree::{DecisionTree, TreeConfig};
pub use random_forest::{ForestConfig, RandomForest};
