//! Core data types for the feature pipeline
//!
//! [`FeatureTable`] is the tabular interchange format between extraction,
//! selection, scaling and embedding: one row per input document, a fixed
//! ordered set of numeric columns, and the normalized text carried
//! alongside the numeric block.

use crate::error::{PipelineError, Result};
use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

/// Fixed-schema feature table.
///
/// Invariant: every row has exactly the same columns in the same order,
/// regardless of input content. Absent signals are zeros, never missing.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    texts: Vec<String>,
    columns: Vec<String>,
    values: Array2<f64>,
}

impl FeatureTable {
    /// Create a table from its parts.
    ///
    /// # Panics
    /// Panics when row counts or column counts disagree.
    pub fn new(texts: Vec<String>, columns: Vec<String>, values: Array2<f64>) -> Self {
        assert_eq!(texts.len(), values.nrows(), "texts must match row count");
        assert_eq!(
            columns.len(),
            values.ncols(),
            "columns must match value width"
        );
        Self {
            texts,
            columns,
            values,
        }
    }

    /// Number of document rows.
    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of numeric columns.
    pub fn n_columns(&self) -> usize {
        self.values.ncols()
    }

    /// Numeric column names in schema order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Full schema: the text column followed by the numeric columns.
    pub fn schema(&self) -> Vec<String> {
        let mut schema = Vec::with_capacity(self.columns.len() + 1);
        schema.push("text".to_string());
        schema.extend(self.columns.iter().cloned());
        schema
    }

    /// Normalized document texts, one per row.
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// The numeric block.
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Index of a numeric column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// View of one numeric column by name.
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.column_index(name)
            .map(|idx| self.values.index_axis(Axis(1), idx))
    }

    /// Project the table onto the given numeric columns, keeping texts.
    pub fn select_columns(&self, names: &[String]) -> Result<FeatureTable> {
        let indices: Vec<usize> = names
            .iter()
            .map(|name| {
                self.column_index(name).ok_or_else(|| {
                    PipelineError::invalid_input(format!("unknown column '{name}'"))
                })
            })
            .collect::<Result<_>>()?;

        let values = self.values.select(Axis(1), &indices);
        Ok(FeatureTable::new(
            self.texts.clone(),
            names.to_vec(),
            values,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn table() -> FeatureTable {
        FeatureTable::new(
            vec!["a".into(), "b".into()],
            vec!["x".into(), "y".into(), "z".into()],
            array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]],
        )
    }

    #[test]
    fn test_schema_starts_with_text() {
        assert_eq!(table().schema(), vec!["text", "x", "y", "z"]);
    }

    #[test]
    fn test_column_lookup() {
        let t = table();
        let y = t.column("y").unwrap();
        assert_eq!(y.to_vec(), vec![2.0, 5.0]);
        assert!(t.column("missing").is_none());
    }

    #[test]
    fn test_select_columns_projects_and_keeps_texts() {
        let t = table();
        let selected = t.select_columns(&["z".into(), "x".into()]).unwrap();
        assert_eq!(selected.columns(), &["z".to_string(), "x".to_string()]);
        assert_eq!(selected.values().row(0).to_vec(), vec![3.0, 1.0]);
        assert_eq!(selected.texts(), t.texts());
    }

    #[test]
    fn test_select_unknown_column_fails() {
        assert!(table().select_columns(&["nope".into()]).is_err());
    }
}
