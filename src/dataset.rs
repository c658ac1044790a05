//! The car evaluation dataset: loading, label orderings and integer encoding.

pub mod categories;
pub mod encoding;
pub mod io;
pub mod loader;

pub use categories::CategoryColumn;
pub use encoding::{encode_all, encode_column, encode_named_column};
pub use loader::{DatasetFetcher, HttpFetcher, load_or_fetch};

use crate::error::Result;
use polars::prelude::*;

/// Distinct values of a string column in order of first appearance.
pub fn distinct_labels(df: &DataFrame, column: CategoryColumn) -> Result<Vec<String>> {
    let unique = df
        .column(column.name())?
        .as_materialized_series()
        .unique_stable()?;
    let labels = unique
        .str()?
        .into_iter()
        .flatten()
        .map(str::to_owned)
        .collect();
    Ok(labels)
}
