use super::categories::{CategoryColumn, normalize_uci_label};
use crate::error::{ProbeError, Result, ResultExt as _};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;

/// Reads a CSV with a header row, keeping every column as a string.
pub fn load_csv(path: &Path) -> Result<DataFrame> {
    // A zero inference length makes polars read all columns as String, so
    // door counts like "2" stay labels instead of becoming integers.
    LazyCsvReader::new(path)
        .with_infer_schema_length(Some(0))
        .with_has_header(true)
        .finish()?
        .collect()
        .with_context(|| format!("Failed to read CSV {}", path.display()))
}

/// Parses a downloaded body.
///
/// Accepts either a CSV already carrying the dataset header, or the raw UCI
/// `car.data` layout which has no header and uses different labels.
pub fn parse_dataset_bytes(bytes: Vec<u8>) -> Result<DataFrame> {
    let has_header = bytes
        .split(|b| *b == b'\n')
        .next()
        .is_some_and(|line| String::from_utf8_lossy(line).contains(CategoryColumn::TARGET.name()));

    let df = CsvReadOptions::default()
        .with_has_header(has_header)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .context("Failed to parse downloaded CSV")?;

    if has_header {
        return Ok(df);
    }
    normalize_raw(df)
}

fn normalize_raw(mut df: DataFrame) -> Result<DataFrame> {
    if df.width() != CategoryColumn::ALL.len() {
        return Err(ProbeError::DataProcessing(format!(
            "Expected {} columns in downloaded data, found {}",
            CategoryColumn::ALL.len(),
            df.width()
        )));
    }
    df.set_column_names(CategoryColumn::ALL.iter().map(|c| c.name()))?;

    for column in CategoryColumn::ALL {
        let normalized: StringChunked = df
            .column(column.name())?
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|value| value.map(|label| normalize_uci_label(column, label)))
            .collect();
        df.with_column(normalized.with_name(column.name().into()).into_series())?;
    }
    Ok(df)
}

pub fn save_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create CSV file {}", path.display()))?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(df)
        .context("Failed to write CSV file")?;
    Ok(())
}
