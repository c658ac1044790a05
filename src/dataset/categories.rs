use crate::error::{ProbeError, Result};
use serde::Serialize;
use std::fmt;

/// The categorical columns of the car evaluation dataset.
///
/// Each column carries a fixed ordering of its labels; a label's position in
/// that ordering is its integer code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum CategoryColumn {
    CarPrice,
    MaintCost,
    NumDoors,
    NumPersons,
    TrunkSize,
    Safety,
    Rating,
}

impl CategoryColumn {
    /// Feature columns, in the order they form the feature matrix.
    pub const FEATURES: [Self; 6] = [
        Self::CarPrice,
        Self::MaintCost,
        Self::NumDoors,
        Self::NumPersons,
        Self::TrunkSize,
        Self::Safety,
    ];

    /// The outcome column.
    pub const TARGET: Self = Self::Rating;

    /// Every column in file order.
    pub const ALL: [Self; 7] = [
        Self::CarPrice,
        Self::MaintCost,
        Self::NumDoors,
        Self::NumPersons,
        Self::TrunkSize,
        Self::Safety,
        Self::Rating,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::CarPrice => "CarPrice",
            Self::MaintCost => "MaintCost",
            Self::NumDoors => "NumDoors",
            Self::NumPersons => "NumPersons",
            Self::TrunkSize => "TrunkSize",
            Self::Safety => "Safety",
            Self::Rating => "Rating",
        }
    }

    pub fn ordering(self) -> &'static [&'static str] {
        match self {
            Self::CarPrice | Self::MaintCost => &["low", "med", "high", "vhigh"],
            Self::NumDoors => &["2", "3", "4", "more"],
            Self::NumPersons => &["2", "4", "more"],
            Self::TrunkSize => &["small", "med", "big"],
            Self::Safety => &["low", "med", "high"],
            Self::Rating => &["bad", "acc", "good", "excl"],
        }
    }

    /// Integer code of `label`, or `None` if it is not in the ordering.
    pub fn rank(self, label: &str) -> Option<u32> {
        self.ordering()
            .iter()
            .position(|candidate| *candidate == label)
            .and_then(|pos| u32::try_from(pos).ok())
    }

    /// Resolves a column by its header name. Unknown names are an error.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|column| column.name() == name)
            .ok_or_else(|| ProbeError::UnknownColumn(name.to_owned()))
    }

    pub fn feature_names() -> Vec<String> {
        Self::FEATURES.iter().map(|c| c.name().to_owned()).collect()
    }
}

impl fmt::Display for CategoryColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps labels used by the raw UCI file onto the labels used in `Cars.csv`.
pub fn normalize_uci_label(column: CategoryColumn, label: &str) -> &str {
    match (column, label) {
        (CategoryColumn::Rating, "unacc") => "bad",
        (CategoryColumn::Rating, "vgood") => "excl",
        (CategoryColumn::NumDoors, "5more") => "more",
        _ => label,
    }
}
