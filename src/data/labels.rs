//! Label encoding
//!
//! Maps string class labels to contiguous numeric ids for the selector
//! and classifier, and back again for reporting.

use crate::error::{PipelineError, Result};

/// String-to-id label codec. Classes are ordered alphabetically so the
/// encoding is stable across runs.
#[derive(Debug, Clone, Default)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Create an unfitted encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn the class inventory from the given labels.
    pub fn fit(&mut self, labels: &[String]) {
        let mut classes: Vec<String> = labels.to_vec();
        classes.sort_unstable();
        classes.dedup();
        self.classes = classes;
    }

    /// Encode labels to numeric ids.
    pub fn transform(&self, labels: &[String]) -> Result<Vec<f64>> {
        if self.classes.is_empty() {
            return Err(PipelineError::NotFitted("LabelEncoder"));
        }
        labels
            .iter()
            .map(|label| {
                self.classes
                    .binary_search(label)
                    .map(|idx| idx as f64)
                    .map_err(|_| {
                        PipelineError::invalid_input(format!("unknown class '{label}'"))
                    })
            })
            .collect()
    }

    /// Fit and encode in one step.
    pub fn fit_transform(&mut self, labels: &[String]) -> Result<Vec<f64>> {
        self.fit(labels);
        self.transform(labels)
    }

    /// Decode numeric ids back to class labels.
    pub fn inverse_transform(&self, ids: &[f64]) -> Result<Vec<String>> {
        ids.iter()
            .map(|&id| {
                self.classes
                    .get(id as usize)
                    .cloned()
                    .ok_or_else(|| PipelineError::invalid_input(format!("unknown class id {id}")))
            })
            .collect()
    }

    /// The learned class inventory.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}
