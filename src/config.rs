//! Fixed settings for a probe run.
//!
//! Nothing here is read from disk or the environment: the run always uses the
//! same file names, download URL and tree hyperparameters. The struct exists so
//! tests can point a run at a scratch directory or a different renderer.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Local cache of the dataset, read when present and written after a download.
pub const DATA_FILE: &str = "Cars.csv";

/// Fallback location of the car evaluation dataset (raw UCI `car.data`).
pub const DATASET_URL: &str =
    "https://archive.ics.uci.edu/ml/machine-learning-databases/car/car.data";

/// Graph description written by the visualizer.
pub const DOT_FILE: &str = "dt.dot";

/// Image produced by the renderer.
pub const PNG_FILE: &str = "dt.png";

/// Graphviz layout program used to render the tree.
pub const RENDERER_PROGRAM: &str = "dot";

/// Minimum number of samples a node needs before it may be split.
pub const MIN_SAMPLES_SPLIT: f32 = 20.0;

/// Indentation emitted per tree depth by the pseudocode printer.
pub const SPACER: &str = "    ";

/// Downloads larger than this are rejected.
pub const MAX_DOWNLOAD_BYTES: usize = 8 * 1024 * 1024;

#[derive(Debug, Clone, Serialize)]
pub struct ProbeConfig {
    /// Directory the data file and outputs are resolved against
    pub work_dir: PathBuf,
    pub data_file: String,
    pub dataset_url: String,
    pub dot_file: String,
    pub png_file: String,
    pub renderer: String,
    pub min_samples_split: f32,
    pub spacer: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            data_file: DATA_FILE.to_owned(),
            dataset_url: DATASET_URL.to_owned(),
            dot_file: DOT_FILE.to_owned(),
            png_file: PNG_FILE.to_owned(),
            renderer: RENDERER_PROGRAM.to_owned(),
            min_samples_split: MIN_SAMPLES_SPLIT,
            spacer: SPACER.to_owned(),
        }
    }
}

impl ProbeConfig {
    /// Default settings with every path resolved against `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            work_dir: dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn data_path(&self) -> PathBuf {
        self.work_dir.join(&self.data_file)
    }

    pub fn dot_path(&self) -> PathBuf {
        self.work_dir.join(&self.dot_file)
    }

    pub fn png_path(&self) -> PathBuf {
        self.work_dir.join(&self.png_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths_are_in_working_directory() {
        let config = ProbeConfig::default();
        assert_eq!(config.data_path(), Path::new(".").join("Cars.csv"));
        assert_eq!(config.dot_path(), Path::new(".").join("dt.dot"));
        assert_eq!(config.png_path(), Path::new(".").join("dt.png"));
    }

    #[test]
    fn test_in_dir_keeps_fixed_names() {
        let config = ProbeConfig::in_dir("/tmp/probe");
        assert_eq!(config.data_path(), Path::new("/tmp/probe/Cars.csv"));
        assert!((config.min_samples_split - 20.0).abs() < f32::EPSILON);
    }
}
