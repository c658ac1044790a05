use super::structure::TreeStructure;
use crate::dataset::CategoryColumn;
use crate::error::{ProbeError, Result, ResultExt as _};
use linfa::prelude::*;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::Array1;
use polars::prelude::*;
use std::time::{Duration, Instant};

/// A fitted tree together with everything needed to print or draw it.
pub struct TrainedTree {
    pub model: DecisionTree<f64, usize>,
    pub structure: TreeStructure,
    pub feature_names: Vec<String>,
    pub class_names: Vec<String>,
    /// Fraction of training rows the tree classifies correctly
    pub accuracy: f32,
    pub samples: usize,
    pub duration: Duration,
}

/// Fits an entropy-split decision tree on already encoded columns.
///
/// Rows with a null in any used column are dropped before fitting. linfa
/// prunes the fitted tree: a split whose two subtrees predict the same class
/// is merged into a single leaf.
///
/// # Errors
///
/// Fails when a column is missing or not numeric, when no rows are left, when
/// the target has fewer than two classes, or when linfa rejects the fit.
pub fn train_tree(
    df: &DataFrame,
    features: &[CategoryColumn],
    target: CategoryColumn,
    min_samples_split: f32,
) -> Result<TrainedTree> {
    let start = Instant::now();
    let feature_cols: Vec<&str> = features.iter().map(|c| c.name()).collect();

    // 0. Drop rows we cannot train on
    let original_rows = df.height();
    let mut df = df.clone();
    for name in feature_cols.iter().copied().chain([target.name()]) {
        let mask = df
            .column(name)
            .with_context(|| format!("Column '{name}' not found"))?
            .is_not_null();
        df = df.filter(&mask)?;
    }
    let dropped = original_rows - df.height();
    if dropped > 0 {
        tracing::warn!(dropped, "Dropped rows with missing values before training");
    }
    if df.height() == 0 {
        return Err(ProbeError::Training(format!(
            "No complete rows left to train on for target '{target}'"
        )));
    }

    // 1. Prepare features
    let x = df
        .select(feature_cols.iter().copied())?
        .iter()
        .map(|s| s.cast(&DataType::Float64).map(Column::from))
        .collect::<PolarsResult<Vec<_>>>()
        .map(DataFrame::new)??
        .to_ndarray::<Float64Type>(IndexOrder::C)
        .context("Failed to create feature matrix")?;

    // 2. Prepare target
    let target_series = df.column(target.name())?.as_materialized_series();
    let n_unique = target_series.n_unique()?;
    if n_unique < 2 {
        return Err(ProbeError::Training(format!(
            "The target column '{target}' must have at least two distinct classes. Found {n_unique}."
        )));
    }
    let y: Array1<usize> = target_series
        .cast(&DataType::UInt32)?
        .u32()?
        .into_no_null_iter()
        .map(|v| v as usize)
        .collect();

    let class_names: Vec<String> = target.ordering().iter().map(|s| (*s).to_owned()).collect();
    if let Some(bad) = y.iter().find(|label| **label >= class_names.len()) {
        return Err(ProbeError::Training(format!(
            "Target code {bad} is outside the {} classes of '{target}'",
            class_names.len()
        )));
    }

    let feature_names: Vec<String> = feature_cols.iter().map(|s| (*s).to_owned()).collect();
    let dataset = Dataset::new(x, y).with_feature_names(feature_names.clone());

    tracing::info!(
        rows = dataset.nsamples(),
        features = feature_names.len(),
        min_samples_split,
        "Fitting decision tree"
    );
    let model = DecisionTree::params()
        .split_quality(SplitQuality::Entropy)
        .min_weight_split(min_samples_split)
        .fit(&dataset)
        .map_err(|e| ProbeError::Training(format!("Decision Tree training failed: {e}")))?;

    let prediction = model.predict(&dataset);
    let accuracy = prediction
        .confusion_matrix(&dataset)
        .map_err(|e| ProbeError::Training(e.to_string()))?
        .accuracy();

    let structure = TreeStructure::from_fitted(
        &model,
        dataset.records(),
        dataset.targets(),
        class_names.len(),
    );
    tracing::info!(
        nodes = structure.node_count(),
        leaves = structure.leaf_count(),
        accuracy,
        "Decision tree trained"
    );

    Ok(TrainedTree {
        model,
        structure,
        feature_names,
        class_names,
        accuracy,
        samples: dataset.nsamples(),
        duration: start.elapsed(),
    })
}
