//! Dataset and artifact I/O
//!
//! Loads labelled message CSVs and writes feature tables / numeric
//! matrices produced by the pipeline. Thin glue around the `csv` crate.

use super::types::FeatureTable;
use anyhow::{Context, Result};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// One labelled input message, as stored in the dataset CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelledMessage {
    /// Raw message text
    pub text: String,
    /// Class label
    pub class: String,
}

/// Data loader for CSV files
pub struct DataLoader;

impl DataLoader {
    /// Load labelled messages from a CSV file with `text,class` columns.
    pub fn load_messages<P: AsRef<Path>>(path: P) -> Result<Vec<LabelledMessage>> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open file: {:?}", path.as_ref()))?;

        let mut reader = csv::Reader::from_reader(file);
        let mut messages = Vec::new();

        for result in reader.deserialize() {
            let message: LabelledMessage = result.context("Failed to parse message row")?;
            messages.push(message);
        }

        Ok(messages)
    }

    /// Save a feature table to CSV, text column first.
    pub fn save_table<P: AsRef<Path>>(table: &FeatureTable, path: P) -> Result<()> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create file: {:?}", path.as_ref()))?;

        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(table.schema())?;

        let values = table.values();
        for (text, row) in table.texts().iter().zip(values.rows()) {
            let mut record = Vec::with_capacity(row.len() + 1);
            record.push(text.clone());
            record.extend(row.iter().map(|v| v.to_string()));
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Save a numeric matrix to CSV without a header.
    pub fn save_matrix<P: AsRef<Path>>(matrix: ArrayView2<'_, f64>, path: P) -> Result<()> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create file: {:?}", path.as_ref()))?;

        let mut writer = csv::Writer::from_writer(file);
        for row in matrix.rows() {
            let record: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Save the selected feature names as JSON.
    pub fn save_selected_features<P: AsRef<Path>>(features: &[String], path: P) -> Result<()> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create file: {:?}", path.as_ref()))?;

        serde_json::to_writer_pretty(file, features)?;
        Ok(())
    }

    /// Load selected feature names from JSON.
    pub fn load_selected_features<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open file: {:?}", path.as_ref()))?;

        let features: Vec<String> = serde_json::from_reader(file)?;
        Ok(features)
    }
}
