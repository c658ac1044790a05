//! # dtprobe entry point
//!
//! ```text
//! main()
//!   ├─> Parse CLI arguments (clap; only --help / --version)
//!   ├─> Initialize logging (stderr + rolling file)
//!   └─> run_probe() in the working directory
//!         ├─> Ok  -> exit 0
//!         └─> Err -> diagnostic on stderr, exit 1
//! ```

#![warn(clippy::all, rust_2018_idioms)]

mod cli;

use clap::Parser as _;
use dtprobe::config::ProbeConfig;
use dtprobe::dataset::HttpFetcher;
use std::process::ExitCode;

fn main() -> ExitCode {
    let _cli = cli::Cli::parse();

    if let Err(e) = dtprobe::logging::init() {
        eprintln!("Logging disabled: {e:#}");
    }

    let config = ProbeConfig::default();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match dtprobe::flow::run_probe(&config, &HttpFetcher, &mut out) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Probe failed: {e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
