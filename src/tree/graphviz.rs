//! Graphviz export of a flattened tree.
//!
//! The layout follows scikit-learn's `export_graphviz`: one box per node with
//! the split test, entropy, sample count, class counts and majority class,
//! and `True`/`False` head labels on the two edges leaving the root.

use super::structure::TreeStructure;
use crate::error::{Result, ResultExt as _};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Decimal places kept for thresholds and entropies.
const PRECISION: usize = 3;

pub fn write_dot(
    tree: &TreeStructure,
    feature_names: &[String],
    class_names: &[String],
    out: &mut dyn Write,
) -> io::Result<()> {
    writeln!(out, "digraph Tree {{")?;
    writeln!(out, "node [shape=box] ;")?;
    if tree.root().is_some() {
        write_node(tree, feature_names, class_names, 0, None, out)?;
    }
    writeln!(out, "}}")
}

fn write_node(
    tree: &TreeStructure,
    feature_names: &[String],
    class_names: &[String],
    id: usize,
    parent: Option<usize>,
    out: &mut dyn Write,
) -> io::Result<()> {
    let Some(node) = tree.node(id) else {
        return Ok(());
    };

    let mut lines = Vec::with_capacity(5);
    if !node.is_leaf() {
        let feature = node
            .feature
            .and_then(|idx| feature_names.get(idx).cloned())
            .unwrap_or_else(|| format!("X[{}]", node.feature.unwrap_or_default()));
        lines.push(format!("{feature} <= {}", round_repr(node.threshold)));
    }
    lines.push(format!("entropy = {}", round_repr(node.entropy())));
    lines.push(format!("samples = {}", node.samples()));
    let counts: Vec<String> = node.class_counts.iter().map(ToString::to_string).collect();
    lines.push(format!("value = [{}]", counts.join(", ")));
    if let Some(class) = node.majority_class() {
        let name = class_names
            .get(class)
            .cloned()
            .unwrap_or_else(|| class.to_string());
        lines.push(format!("class = {name}"));
    }
    writeln!(out, "{id} [label=\"{}\"] ;", escape(&lines.join("\n")))?;

    if let Some(parent) = parent {
        if parent == 0 {
            let is_left = tree.node(parent).and_then(|p| p.left) == Some(id);
            let (angle, head) = if is_left { (45, "True") } else { (-45, "False") };
            writeln!(
                out,
                "{parent} -> {id} [labeldistance=2.5, labelangle={angle}, headlabel=\"{head}\"] ;"
            )?;
        } else {
            writeln!(out, "{parent} -> {id} ;")?;
        }
    }

    for child in [node.left, node.right].into_iter().flatten() {
        write_node(tree, feature_names, class_names, child, Some(id), out)?;
    }
    Ok(())
}

/// Writes the dot description to `path`.
pub fn write_dot_file(
    tree: &TreeStructure,
    feature_names: &[String],
    class_names: &[String],
    path: &Path,
) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_dot(tree, feature_names, class_names, &mut writer)?;
    writer.flush()?;
    tracing::debug!("Wrote tree description to {}", path.display());
    Ok(())
}

/// Rounds to [`PRECISION`] places and prints the shortest form, keeping one
/// decimal (`0.5`, `1.206`, `0.0`).
fn round_repr(value: f64) -> String {
    let fixed = format!("{value:.prec$}", prec = PRECISION);
    let trimmed = fixed.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_owned()
    }
}

fn escape(label: &str) -> String {
    label.replace('"', "\\\"").replace('\n', "\\n")
}
