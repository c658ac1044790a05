use super::structure::TreeStructure;
use std::io::{self, Write};

/// Writes the tree as nested `if`/`else` pseudo-code.
///
/// Internal nodes become `if ( <feature> <= <threshold> ) { .. } else { .. }`
/// with the left subtree printed first. Leaves print one
/// `return <class> ( <n> examples )` line for every class that reaches them,
/// so impure leaves produce several lines.
pub fn write_pseudocode(
    tree: &TreeStructure,
    feature_names: &[String],
    target_names: &[String],
    spacer_base: &str,
    out: &mut dyn Write,
) -> io::Result<()> {
    if tree.root().is_none() {
        return Ok(());
    }
    let printer = Printer {
        tree,
        feature_names,
        target_names,
        spacer_base,
    };
    printer.recurse(0, 0, out)
}

struct Printer<'a> {
    tree: &'a TreeStructure,
    feature_names: &'a [String],
    target_names: &'a [String],
    spacer_base: &'a str,
}

impl Printer<'_> {
    fn recurse(&self, id: usize, depth: usize, out: &mut dyn Write) -> io::Result<()> {
        let Some(node) = self.tree.node(id) else {
            return Ok(());
        };
        let spacer = self.spacer_base.repeat(depth);

        if node.is_leaf() {
            for (class, count) in node.class_counts.iter().enumerate() {
                if *count == 0 {
                    continue;
                }
                writeln!(
                    out,
                    "{spacer}return {} ( {count} examples )",
                    self.target_name(class)
                )?;
            }
            return Ok(());
        }

        writeln!(
            out,
            "{spacer}if ( {} <= {:?} ) {{",
            self.feature_name(node.feature),
            node.threshold
        )?;
        if let Some(left) = node.left {
            self.recurse(left, depth + 1, out)?;
        }
        writeln!(out, "{spacer}}}\n{spacer}else {{")?;
        if let Some(right) = node.right {
            self.recurse(right, depth + 1, out)?;
        }
        writeln!(out, "{spacer}}}")
    }

    fn feature_name(&self, feature: Option<usize>) -> String {
        match feature {
            Some(idx) => self
                .feature_names
                .get(idx)
                .cloned()
                .unwrap_or_else(|| format!("X[{idx}]")),
            None => "?".to_owned(),
        }
    }

    fn target_name(&self, class: usize) -> String {
        self.target_names
            .get(class)
            .cloned()
            .unwrap_or_else(|| class.to_string())
    }
}
