//! The probe run from data acquisition to the rendered image.
//!
//! ```text
//! run_probe()
//!   ├─> load_or_fetch      Cars.csv, or download + cache
//!   ├─> previews           head / tail / rating types
//!   ├─> encode_all         labels -> ranks
//!   ├─> train_tree         entropy, min split 20
//!   ├─> write_pseudocode   to `out`
//!   └─> write_dot_file + render_png
//! ```

use crate::config::ProbeConfig;
use crate::dataset::{self, CategoryColumn, DatasetFetcher};
use crate::error::Result;
use crate::render;
use crate::tree;
use polars::prelude::DataFrame;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

const PREVIEW_ROWS: usize = 5;

/// What a finished run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub rows: usize,
    pub nodes: usize,
    pub leaves: usize,
    pub depth: usize,
    pub training_accuracy: f32,
    pub dot_path: PathBuf,
    pub png_path: PathBuf,
    pub duration_ms: u128,
}

/// Runs the whole probe, writing the report to `out`.
///
/// # Errors
///
/// Any stage failure ends the run: a missing dataset that cannot be
/// downloaded, labels outside their ordering, a failed fit, or a renderer
/// that is missing or fails.
pub fn run_probe(
    config: &ProbeConfig,
    fetcher: &dyn DatasetFetcher,
    out: &mut dyn Write,
) -> Result<RunSummary> {
    let start = Instant::now();

    writeln!(out, "\n-- get data:")?;
    let df = dataset::load_or_fetch(&config.data_path(), &config.dataset_url, fetcher, out)?;
    tracing::info!(rows = df.height(), columns = df.width(), "Dataset loaded");

    write_previews(out, "-- df.head():", "-- df.tail():", &df)?;
    let ratings = dataset::distinct_labels(&df, CategoryColumn::TARGET)?;
    writeln!(out, "* Rating types:\n{ratings:?}\n")?;

    let (encoded, targets) = dataset::encode_all(&df)?;
    write_previews(out, "* df.head() encoded", "* df.tail() encoded", &encoded)?;
    writeln!(out, "* targets\n{targets:?}\n")?;

    let trained = tree::train_tree(
        &encoded,
        &CategoryColumn::FEATURES,
        CategoryColumn::TARGET,
        config.min_samples_split,
    )?;

    writeln!(out, "\n-- get_code:")?;
    tree::write_pseudocode(
        &trained.structure,
        &trained.feature_names,
        &trained.class_names,
        &config.spacer,
        out,
    )?;
    out.flush()?;

    let dot_path = config.dot_path();
    let png_path = config.png_path();
    tree::write_dot_file(
        &trained.structure,
        &trained.feature_names,
        &trained.class_names,
        &dot_path,
    )?;
    render::render_png(&config.renderer, &dot_path, &png_path)?;

    let summary = RunSummary {
        rows: trained.samples,
        nodes: trained.structure.node_count(),
        leaves: trained.structure.leaf_count(),
        depth: trained.structure.depth(),
        training_accuracy: trained.accuracy,
        dot_path,
        png_path,
        duration_ms: start.elapsed().as_millis(),
    };
    tracing::info!(
        fit_ms = trained.duration.as_millis(),
        summary = %serde_json::to_string(&summary)?,
        "Probe finished"
    );
    Ok(summary)
}

fn write_previews(
    out: &mut dyn Write,
    head_title: &str,
    tail_title: &str,
    df: &DataFrame,
) -> Result<()> {
    writeln!(out, "\n{head_title}")?;
    writeln!(out, "{}\n", df.head(Some(PREVIEW_ROWS)))?;
    writeln!(out, "\n{tail_title}")?;
    writeln!(out, "{}\n", df.tail(Some(PREVIEW_ROWS)))?;
    Ok(())
}
