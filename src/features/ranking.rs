//! Independent feature-importance rankings
//!
//! Four ways of scoring numeric columns against class labels:
//! Pearson correlation, binned mutual information, random-forest
//! importances and one-way ANOVA F-statistics. Each method returns its
//! own ordering; score scales are not comparable across methods, which
//! is why the selector fuses ranks rather than scores.

use crate::data::FeatureTable;
use crate::error::{PipelineError, Result};
use crate::ml::{ForestConfig, RandomForest};
use ndarray::{Array1, ArrayView1};
use std::collections::HashMap;

/// One method's ordered (column, score) pairs, best first.
pub type ImportanceRanking = Vec<(String, f64)>;

fn labels_array(labels: &[f64]) -> Array1<f64> {
    Array1::from_iter(labels.iter().copied())
}

/// Sort scored columns descending, breaking ties on name so rankings are
/// deterministic.
fn sorted_ranking(mut scored: Vec<(String, f64)>) -> ImportanceRanking {
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    scored
}

fn mean(values: ArrayView1<'_, f64>) -> f64 {
    values.mean().unwrap_or(0.0)
}

/// Pearson correlation between a column and the labels; `None` when
/// either side is constant.
fn pearson(x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> Option<f64> {
    let mx = mean(x);
    let my = mean(y);

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&a, &b) in x.iter().zip(y.iter()) {
        cov += (a - mx) * (b - my);
        var_x += (a - mx) * (a - mx);
        var_y += (b - my) * (b - my);
    }

    let denom = (var_x * var_y).sqrt();
    (denom > 0.0).then(|| cov / denom)
}

/// Rank columns by absolute Pearson correlation with the labels.
///
/// The signed correlation is kept as the score; constant columns carry no
/// correlation and are left out of the ranking.
pub fn correlation_ranking(table: &FeatureTable, labels: &[f64]) -> Result<ImportanceRanking> {
    let y = labels_array(labels);
    let scored: Vec<(String, f64)> = table
        .columns()
        .iter()
        .filter_map(|name| {
            let column = table.column(name)?;
            pearson(column, y.view()).map(|r| (name.clone(), r))
        })
        .collect();

    if scored.is_empty() {
        return Err(PipelineError::RankingFailed {
            method: "correlation",
            reason: "no column has a finite correlation with the labels".into(),
        });
    }

    let mut scored = scored;
    scored.sort_by(|a, b| {
        b.1.abs()
            .total_cmp(&a.1.abs())
            .then_with(|| a.0.cmp(&b.0))
    });
    Ok(scored)
}

/// Assign each value to one of `n_bins` equal-width bins.
fn discretize(values: ArrayView1<'_, f64>, n_bins: usize) -> Vec<usize> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    values
        .iter()
        .map(|&v| {
            if range <= 0.0 {
                0
            } else {
                (((v - min) / range * n_bins as f64) as usize).min(n_bins - 1)
            }
        })
        .collect()
}

/// Mutual information (nats) between binned column values and discrete
/// labels.
fn mutual_information(column: ArrayView1<'_, f64>, labels: &[f64], n_bins: usize) -> f64 {
    let n = labels.len() as f64;
    let bins = discretize(column, n_bins);

    let mut joint: HashMap<(usize, u64), f64> = HashMap::new();
    let mut px: HashMap<usize, f64> = HashMap::new();
    let mut py: HashMap<u64, f64> = HashMap::new();

    for (&bin, &label) in bins.iter().zip(labels.iter()) {
        let class = label.to_bits();
        *joint.entry((bin, class)).or_insert(0.0) += 1.0;
        *px.entry(bin).or_insert(0.0) += 1.0;
        *py.entry(class).or_insert(0.0) += 1.0;
    }

    joint
        .iter()
        .map(|(&(bin, class), &count)| {
            let p_xy = count / n;
            let p_x = px[&bin] / n;
            let p_y = py[&class] / n;
            p_xy * (p_xy / (p_x * p_y)).ln()
        })
        .sum()
}

/// Rank columns by classification mutual information.
pub fn mutual_information_ranking(
    table: &FeatureTable,
    labels: &[f64],
    n_bins: usize,
) -> Result<ImportanceRanking> {
    if n_bins == 0 {
        return Err(PipelineError::RankingFailed {
            method: "mutual_information",
            reason: "n_bins must be positive".into(),
        });
    }

    let scored: Vec<(String, f64)> = table
        .columns()
        .iter()
        .filter_map(|name| {
            let column = table.column(name)?;
            Some((name.clone(), mutual_information(column, labels, n_bins)))
        })
        .collect();

    Ok(sorted_ranking(scored))
}

/// Rank columns by random-forest impurity importance over a joint fit.
pub fn forest_importance_ranking(
    table: &FeatureTable,
    labels: &[f64],
    config: ForestConfig,
) -> Result<ImportanceRanking> {
    let distinct_classes = labels
        .iter()
        .map(|l| l.to_bits())
        .collect::<std::collections::HashSet<_>>()
        .len();
    if distinct_classes < 2 {
        return Err(PipelineError::RankingFailed {
            method: "forest_importance",
            reason: "labels contain fewer than two classes".into(),
        });
    }

    let y = labels_array(labels);
    let mut forest = RandomForest::new(config);
    forest.fit(table.values(), y.view());

    let scored: Vec<(String, f64)> = table
        .columns()
        .iter()
        .cloned()
        .zip(forest.feature_importances().iter().copied())
        .collect();

    Ok(sorted_ranking(scored))
}

/// One-way ANOVA F-statistic of a column across label groups; `None` for
/// degenerate groupings.
fn f_statistic(column: ArrayView1<'_, f64>, labels: &[f64]) -> Option<f64> {
    let mut groups: HashMap<u64, Vec<f64>> = HashMap::new();
    for (&value, &label) in column.iter().zip(labels.iter()) {
        groups.entry(label.to_bits()).or_default().push(value);
    }

    let k = groups.len();
    let n = column.len();
    if k < 2 || n <= k {
        return None;
    }

    let grand_mean = column.sum() / n as f64;
    let mut between = 0.0;
    let mut within = 0.0;

    for values in groups.values() {
        let group_mean = values.iter().sum::<f64>() / values.len() as f64;
        between += values.len() as f64 * (group_mean - grand_mean).powi(2);
        within += values
            .iter()
            .map(|v| (v - group_mean).powi(2))
            .sum::<f64>();
    }

    let f = (between / (k - 1) as f64) / (within / (n - k) as f64);
    f.is_finite().then_some(f)
}

/// Rank columns by ANOVA F-statistic, keeping at most `cap` columns.
pub fn f_statistic_ranking(
    table: &FeatureTable,
    labels: &[f64],
    cap: usize,
) -> Result<ImportanceRanking> {
    let scored: Vec<(String, f64)> = table
        .columns()
        .iter()
        .filter_map(|name| {
            let column = table.column(name)?;
            f_statistic(column, labels).map(|f| (name.clone(), f))
        })
        .collect();

    if scored.is_empty() {
        return Err(PipelineError::RankingFailed {
            method: "f_statistic",
            reason: "no column produced a finite F-statistic".into(),
        });
    }

    let mut ranking = sorted_ranking(scored);
    ranking.truncate(cap);
    Ok(ranking)
}
