//! # dtprobe - probe a decision tree learned from the car evaluation data
//!
//! The library trains an entropy-split decision tree on the six categorical
//! car attributes, then shows what it learned in two forms: nested `if`/`else`
//! pseudo-code and a Graphviz picture.
//!
//! ## Quick Start
//!
//! ```no_run
//! use dtprobe::config::ProbeConfig;
//! use dtprobe::dataset::HttpFetcher;
//!
//! # fn example() -> dtprobe::error::Result<()> {
//! let config = ProbeConfig::default();
//! let summary = dtprobe::flow::run_probe(&config, &HttpFetcher, &mut std::io::stdout())?;
//! println!("{} nodes, {} leaves", summary.nodes, summary.leaves);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`dataset`]: loading `Cars.csv` (or downloading it), label orderings and
//!   integer encoding
//! - [`tree`]: training with `linfa-trees`, the flat node table, pseudo-code
//!   and dot export
//! - [`render`]: running graphviz on the dot file
//! - [`flow`]: the end-to-end run
//! - [`error`]: error types and handling utilities
//! - [`logging`]: tracing subscriber setup
//!
//! ## Working with the pieces
//!
//! ```no_run
//! use dtprobe::dataset::{self, CategoryColumn};
//! use dtprobe::tree;
//!
//! # fn example() -> dtprobe::error::Result<()> {
//! let df = dataset::io::load_csv("Cars.csv".as_ref())?;
//! let (encoded, _targets) = dataset::encode_all(&df)?;
//! let trained = tree::train_tree(&encoded, &CategoryColumn::FEATURES, CategoryColumn::Rating, 20.0)?;
//! tree::write_pseudocode(
//!     &trained.structure,
//!     &trained.feature_names,
//!     &trained.class_names,
//!     "    ",
//!     &mut std::io::stdout(),
//! )?;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod flow;
pub(crate) mod http_client;
pub mod logging;
pub mod render;
pub mod tree;
