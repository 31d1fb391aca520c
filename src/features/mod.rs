//! Feature engineering: extraction, ranking, selection and scaling

pub mod extractor;
pub mod ranking;
pub mod scaler;
pub mod selector;

pub use extractor::{FeatureExtractor, URL_PLACEHOLDER};
pub use ranking::ImportanceRanking;
pub use scaler::StandardScaler;
pub use selector::{consensus_vote, FeatureSelector, SelectorConfig};
