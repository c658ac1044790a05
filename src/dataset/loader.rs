use super::io::{load_csv, parse_dataset_bytes, save_csv};
use crate::config::MAX_DOWNLOAD_BYTES;
use crate::error::{ProbeError, Result};
use crate::http_client;
use polars::prelude::DataFrame;
use std::io::Write;
use std::path::Path;

/// Source of the dataset when no local copy exists.
pub trait DatasetFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Fetches over HTTPS with the shared agent.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpFetcher;

impl DatasetFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        tracing::info!("Downloading dataset from {url}");
        let response = match http_client::agent().get(url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => {
                return Err(ProbeError::DataAcquisition(format!(
                    "Failed to download {url}: HTTP {code}"
                )));
            }
            Err(err) => {
                return Err(ProbeError::DataAcquisition(format!(
                    "Failed to download {url}: {err}"
                )));
            }
        };
        let bytes = http_client::read_response_bytes(response, MAX_DOWNLOAD_BYTES)?;
        tracing::debug!(bytes = bytes.len(), "Download complete");
        Ok(bytes)
    }
}

/// Loads the dataset from `path`, downloading it from `url` on a cache miss.
///
/// Progress lines are written to `out`. A download is only attempted when the
/// local file is absent; the downloaded table is then written to `path`.
///
/// # Errors
///
/// Returns [`ProbeError::DataAcquisition`] when the file is absent and the
/// download or its parsing fails.
pub fn load_or_fetch(
    path: &Path,
    url: &str,
    fetcher: &dyn DatasetFetcher,
    out: &mut dyn Write,
) -> Result<DataFrame> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    if path.exists() {
        writeln!(out, "-- {file_name} found locally")?;
        tracing::info!("Loading dataset from {}", path.display());
        return load_csv(path);
    }

    writeln!(out, "-- trying to download from {url}")?;
    let mut df = fetcher
        .fetch(url)
        .and_then(parse_dataset_bytes)
        .map_err(|err| {
            tracing::error!("Dataset download failed: {err}");
            ProbeError::DataAcquisition(format!("-- Unable to download {file_name}: {err}"))
        })?;

    writeln!(out, "-- writing to local {file_name} file")?;
    write_cache(&mut df, path)?;
    Ok(df)
}

fn write_cache(df: &mut DataFrame, path: &Path) -> Result<()> {
    let tmp = path.with_extension("csv.tmp");
    let written =
        save_csv(df, &tmp).and_then(|()| std::fs::rename(&tmp, path).map_err(ProbeError::from));
    if let Err(err) = written {
        if tmp.exists() {
            let _ = std::fs::remove_file(&tmp);
        }
        return Err(err);
    }
    tracing::info!(rows = df.height(), "Cached dataset at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use std::cell::Cell;

    struct CountingFetcher {
        calls: Cell<usize>,
        body: Option<&'static str>,
    }

    impl CountingFetcher {
        fn serving(body: &'static str) -> Self {
            Self {
                calls: Cell::new(0),
                body: Some(body),
            }
        }

        fn failing() -> Self {
            Self {
                calls: Cell::new(0),
                body: None,
            }
        }
    }

    impl DatasetFetcher for CountingFetcher {
        fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
            self.calls.set(self.calls.get() + 1);
            self.body
                .map(|b| b.as_bytes().to_vec())
                .ok_or_else(|| ProbeError::Other("connection refused".to_owned()))
        }
    }

    #[test]
    fn test_local_file_skips_network() -> Result<()> {
        let fetcher = CountingFetcher::failing();
        let mut out = Vec::new();
        let df = load_or_fetch(
            Path::new("testdata/cars_small.csv"),
            "https://example.invalid/car.data",
            &fetcher,
            &mut out,
        )?;
        assert_eq!(fetcher.calls.get(), 0);
        assert!(df.height() > 0);
        assert!(String::from_utf8_lossy(&out).contains("cars_small.csv found locally"));
        Ok(())
    }

    #[test]
    fn test_missing_file_and_failed_fetch_is_acquisition_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("Cars.csv");
        let fetcher = CountingFetcher::failing();
        let mut out = Vec::new();

        let err = load_or_fetch(&path, "https://example.invalid/car.data", &fetcher, &mut out)
            .unwrap_err();

        assert_eq!(fetcher.calls.get(), 1);
        assert!(matches!(err, ProbeError::DataAcquisition(_)));
        assert!(err.to_string().contains("Unable to download Cars.csv"));
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn test_download_is_cached_for_next_run() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("Cars.csv");
        let fetcher = CountingFetcher::serving(
            "vhigh,vhigh,2,2,small,low,unacc\nlow,low,4,more,big,high,vgood\n",
        );
        let mut out = Vec::new();

        let df = load_or_fetch(&path, "https://example.invalid/car.data", &fetcher, &mut out)?;
        assert_eq!(df.height(), 2);
        assert!(path.exists());
        assert!(String::from_utf8_lossy(&out).contains("writing to local Cars.csv file"));

        let again = load_or_fetch(&path, "https://example.invalid/car.data", &fetcher, &mut out)?;
        assert_eq!(fetcher.calls.get(), 1);
        assert_eq!(again.shape(), df.shape());
        assert_eq!(
            again
                .column("Rating")?
                .as_materialized_series()
                .str()?
                .get(1),
            Some("excl")
        );
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_cache_write_leaves_no_temp_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        // A non-empty directory in place of the cache file makes the rename fail.
        let path = dir.path().join("Cars.csv");
        std::fs::create_dir(&path)?;
        std::fs::write(path.join("keep"), b"x")?;
        let mut df = parse_dataset_bytes(b"vhigh,vhigh,2,2,small,low,unacc\n".to_vec())?;

        assert!(write_cache(&mut df, &path).is_err());
        assert!(!path.with_extension("csv.tmp").exists());
        assert!(path.is_dir());
        Ok(())
    }
}
