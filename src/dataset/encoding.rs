use super::categories::CategoryColumn;
use crate::error::{ProbeError, Result, ResultExt as _};
use polars::prelude::*;

/// Replaces `column`'s labels with their rank in the column's ordering.
///
/// Returns a new frame together with the ordering used. Null cells stay
/// null. A column that is already integer-typed is returned unchanged, so
/// encoding twice is a no-op.
///
/// # Errors
///
/// Fails when the column is missing, is neither string nor integer typed, or
/// holds a label outside its ordering.
pub fn encode_column(
    df: &DataFrame,
    column: CategoryColumn,
) -> Result<(DataFrame, &'static [&'static str])> {
    let ordering = column.ordering();
    let source = df
        .column(column.name())
        .with_context(|| format!("Column '{column}' not found"))?;

    if source.dtype().is_integer() {
        tracing::debug!("Column {column} is already encoded");
        return Ok((df.clone(), ordering));
    }

    let labels = source.as_materialized_series().str()?;
    let mut codes: Vec<Option<u32>> = Vec::with_capacity(labels.len());
    for label in labels {
        let code = match label {
            Some(label) => Some(column.rank(label).ok_or_else(|| {
                ProbeError::UnmappedValue {
                    column: column.name().to_owned(),
                    value: label.to_owned(),
                }
            })?),
            None => None,
        };
        codes.push(code);
    }

    let mut encoded = df.clone();
    encoded.with_column(Series::new(column.name().into(), codes))?;
    Ok((encoded, ordering))
}

/// Encodes every category column of the dataset.
///
/// Returns the encoded frame and the ordering of the target column.
pub fn encode_all(df: &DataFrame) -> Result<(DataFrame, &'static [&'static str])> {
    let mut encoded = df.clone();
    for column in CategoryColumn::FEATURES {
        encoded = encode_column(&encoded, column)?.0;
    }
    encode_column(&encoded, CategoryColumn::TARGET)
}

/// Same as [`encode_column`], resolving the column from its header name.
pub fn encode_named_column(
    df: &DataFrame,
    name: &str,
) -> Result<(DataFrame, &'static [&'static str])> {
    encode_column(df, CategoryColumn::from_name(name)?)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    fn frame(column: &str, values: Vec<Option<&str>>) -> DataFrame {
        DataFrame::new(vec![Column::from(Series::new(column.into(), values))]).unwrap()
    }

    fn codes(df: &DataFrame, column: &str) -> Vec<Option<u32>> {
        df.column(column)
            .unwrap()
            .as_materialized_series()
            .u32()
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn test_codes_match_ordering_positions() -> Result<()> {
        let df = frame(
            "TrunkSize",
            vec![Some("big"), Some("small"), Some("med"), Some("small")],
        );
        let (encoded, ordering) = encode_column(&df, CategoryColumn::TrunkSize)?;

        assert_eq!(ordering, &["small", "med", "big"]);
        let codes = codes(&encoded, "TrunkSize");
        assert_eq!(codes, vec![Some(2), Some(0), Some(1), Some(0)]);
        assert!(codes.iter().flatten().all(|c| (*c as usize) < ordering.len()));
        Ok(())
    }

    #[test]
    fn test_input_frame_is_not_mutated() -> Result<()> {
        let df = frame("Safety", vec![Some("high")]);
        let _ = encode_column(&df, CategoryColumn::Safety)?;
        assert_eq!(df.column("Safety")?.dtype(), &DataType::String);
        Ok(())
    }

    #[test]
    fn test_nulls_stay_null() -> Result<()> {
        let df = frame("Rating", vec![Some("acc"), None]);
        let (encoded, _) = encode_column(&df, CategoryColumn::Rating)?;
        assert_eq!(codes(&encoded, "Rating"), vec![Some(1), None]);
        Ok(())
    }

    #[test]
    fn test_encoding_twice_is_idempotent() -> Result<()> {
        let df = frame("NumDoors", vec![Some("2"), Some("more"), Some("3")]);
        let (once, _) = encode_column(&df, CategoryColumn::NumDoors)?;
        let (twice, _) = encode_column(&once, CategoryColumn::NumDoors)?;
        assert!(once.equals_missing(&twice));
        Ok(())
    }

    #[test]
    fn test_unmapped_value_is_an_error() {
        let df = frame("NumDoors", vec![Some("2"), Some("5more")]);
        let err = encode_column(&df, CategoryColumn::NumDoors).unwrap_err();
        assert!(matches!(
            err,
            ProbeError::UnmappedValue { ref column, ref value } if column == "NumDoors" && value == "5more"
        ));
    }

    #[test]
    fn test_unknown_column_name_is_an_error() {
        let df = frame("Rating", vec![Some("bad")]);
        let err = encode_named_column(&df, "Colour").unwrap_err();
        assert!(matches!(err, ProbeError::UnknownColumn(_)));
    }

    #[test]
    fn test_encode_all_returns_target_ordering() -> Result<()> {
        let df = super::super::io::load_csv(std::path::Path::new("testdata/cars_small.csv"))?;
        let (encoded, targets) = encode_all(&df)?;
        assert_eq!(targets, CategoryColumn::Rating.ordering());
        for column in CategoryColumn::ALL {
            assert_eq!(encoded.column(column.name())?.dtype(), &DataType::UInt32);
        }
        Ok(())
    }
}
