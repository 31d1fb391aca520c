//! Data structures and I/O for the feature pipeline

pub mod labels;
pub mod loader;
pub mod types;

pub use labels::LabelEncoder;
pub use loader::{DataLoader, LabelledMessage};
pub use types::FeatureTable;
