//! End-to-end tests for a probe run
//!
//! These run the complete flow on the fixture dataset inside a scratch
//! directory and verify the report and the files it leaves behind.

use dtprobe::config::ProbeConfig;
use dtprobe::dataset::DatasetFetcher;
use dtprobe::error::{ProbeError, Result};
use dtprobe::flow::run_probe;
use std::cell::Cell;
use std::path::Path;

struct ScriptedFetcher {
    calls: Cell<usize>,
    body: Option<Vec<u8>>,
}

impl ScriptedFetcher {
    fn failing() -> Self {
        Self {
            calls: Cell::new(0),
            body: None,
        }
    }

    fn serving(path: &str) -> Self {
        Self {
            calls: Cell::new(0),
            body: Some(std::fs::read(path).expect("fixture readable")),
        }
    }
}

impl DatasetFetcher for ScriptedFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.calls.set(self.calls.get() + 1);
        self.body
            .clone()
            .ok_or_else(|| ProbeError::Other(format!("could not resolve host for {url}")))
    }
}

fn scratch_config(dir: &Path) -> ProbeConfig {
    let mut config = ProbeConfig::in_dir(dir);
    // Stand-in for graphviz so the run does not depend on it being installed.
    config.renderer = "true".to_owned();
    config
}

#[cfg(unix)]
#[test]
fn test_full_run_on_local_dataset() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::copy("testdata/cars_small.csv", dir.path().join("Cars.csv")).expect("copy fixture");
    let config = scratch_config(dir.path());
    let fetcher = ScriptedFetcher::failing();
    let mut out = Vec::new();

    let summary = run_probe(&config, &fetcher, &mut out).expect("run succeeds");
    let report = String::from_utf8(out).expect("utf8 report");

    assert_eq!(fetcher.calls.get(), 0, "local dataset must not trigger a download");
    assert!(report.contains("-- Cars.csv found locally"));
    assert!(report.contains("* Rating types:"));
    assert!(report.contains("* targets\n[\"bad\", \"acc\", \"good\", \"excl\"]"));

    let code = report
        .split("-- get_code:\n")
        .nth(1)
        .expect("pseudocode section");
    assert!(code.starts_with("if ( "));
    let returns = code.lines().filter(|l| l.trim_start().starts_with("return ")).count();
    assert!(returns >= summary.leaves, "every leaf prints at least one return");
    assert_eq!(
        code.matches("if (").count(),
        summary.nodes - summary.leaves,
        "one if per internal node"
    );

    assert_eq!(summary.rows, 144);
    assert!(summary.training_accuracy > 0.7);
    let dot = std::fs::read_to_string(dir.path().join("dt.dot")).expect("dot written");
    assert_eq!(dot.matches("[label=").count(), summary.nodes);
}

#[test]
fn test_missing_dataset_and_failed_download() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = scratch_config(dir.path());
    let fetcher = ScriptedFetcher::failing();
    let mut out = Vec::new();

    let err = run_probe(&config, &fetcher, &mut out).expect_err("run must fail");

    assert_eq!(fetcher.calls.get(), 1);
    assert!(matches!(err, ProbeError::DataAcquisition(_)));
    assert!(err.to_string().starts_with("-- Unable to download Cars.csv"));
    assert!(!dir.path().join("dt.dot").exists());
}

#[cfg(unix)]
#[test]
fn test_download_then_cached() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = scratch_config(dir.path());
    let fetcher = ScriptedFetcher::serving("testdata/car_raw.data");

    let mut first = Vec::new();
    run_probe(&config, &fetcher, &mut first).expect("first run downloads");
    assert!(dir.path().join("Cars.csv").exists());
    assert!(String::from_utf8_lossy(&first).contains("-- writing to local Cars.csv file"));

    let mut second = Vec::new();
    run_probe(&config, &fetcher, &mut second).expect("second run uses the cache");
    assert_eq!(fetcher.calls.get(), 1);
    assert!(String::from_utf8_lossy(&second).contains("-- Cars.csv found locally"));
}

#[test]
fn test_missing_renderer_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::copy("testdata/cars_small.csv", dir.path().join("Cars.csv")).expect("copy fixture");
    let mut config = ProbeConfig::in_dir(dir.path());
    config.renderer = "dtprobe-no-such-renderer".to_owned();

    let err = run_probe(&config, &ScriptedFetcher::failing(), &mut Vec::new())
        .expect_err("render must fail");

    assert_eq!(
        err.to_string(),
        "Could not run dot, ie graphviz, to produce visualization"
    );
    assert!(dir.path().join("dt.dot").exists(), "dot file is written before rendering");
}
