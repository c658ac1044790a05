//! Decision tree training and the two read-only views of a fitted tree:
//! pseudo-code and Graphviz.

pub mod graphviz;
pub mod pseudocode;
pub mod structure;
pub mod trainer;

pub use graphviz::{write_dot, write_dot_file};
pub use pseudocode::write_pseudocode;
pub use structure::{FlatNode, NO_SPLIT, TreeStructure};
pub use trainer::{TrainedTree, train_tree};
