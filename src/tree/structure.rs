use linfa_trees::{DecisionTree, TreeNode};
use ndarray::{Array1, Array2};
use serde::Serialize;

/// Threshold stored on leaves; a node is a leaf exactly when it carries it.
pub const NO_SPLIT: f64 = -2.0;

/// One node of the flattened tree.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlatNode {
    pub left: Option<usize>,
    pub right: Option<usize>,
    /// Feature tested by the split; `None` on leaves
    pub feature: Option<usize>,
    /// Samples with `feature <= threshold` go left; [`NO_SPLIT`] on leaves
    pub threshold: f64,
    /// Training samples per class that reach this node
    pub class_counts: Vec<usize>,
}

impl FlatNode {
    pub fn leaf(class_counts: Vec<usize>) -> Self {
        Self {
            left: None,
            right: None,
            feature: None,
            threshold: NO_SPLIT,
            class_counts,
        }
    }

    pub fn split(
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        class_counts: Vec<usize>,
    ) -> Self {
        Self {
            left: Some(left),
            right: Some(right),
            feature: Some(feature),
            threshold,
            class_counts,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.threshold == NO_SPLIT
    }

    pub fn samples(&self) -> usize {
        self.class_counts.iter().sum()
    }

    /// Shannon entropy (base 2) of the class distribution.
    pub fn entropy(&self) -> f64 {
        let total = self.samples();
        if total == 0 {
            return 0.0;
        }
        let total = total as f64;
        self.class_counts
            .iter()
            .filter(|count| **count > 0)
            .map(|count| {
                let p = *count as f64 / total;
                p * (1.0 / p).log2()
            })
            .sum()
    }

    /// Index of the most frequent class, first one on ties.
    pub fn majority_class(&self) -> Option<usize> {
        self.class_counts
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|(_, count)| **count)
            .map(|(class, _)| class)
    }
}

/// Read-only array view of a fitted tree, indexed in pre-order (root is 0).
#[derive(Clone, Debug, Default, Serialize)]
pub struct TreeStructure {
    nodes: Vec<FlatNode>,
    n_classes: usize,
}

impl TreeStructure {
    pub fn new(nodes: Vec<FlatNode>, n_classes: usize) -> Self {
        Self { nodes, n_classes }
    }

    /// Flattens a fitted linfa tree.
    ///
    /// linfa keeps no per-node class distribution, so the training rows are
    /// routed through the splits with the same rule linfa predicts with
    /// (`x < split` goes left) to recover the counts.
    pub fn from_fitted(
        model: &DecisionTree<f64, usize>,
        records: &Array2<f64>,
        targets: &Array1<usize>,
        n_classes: usize,
    ) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            n_classes,
        };
        let rows: Vec<usize> = (0..records.nrows()).collect();
        tree.flatten(model.root_node(), &rows, records, targets);
        tree
    }

    fn flatten(
        &mut self,
        node: &TreeNode<f64, usize>,
        rows: &[usize],
        records: &Array2<f64>,
        targets: &Array1<usize>,
    ) -> usize {
        let mut counts = vec![0; self.n_classes];
        for &row in rows {
            if let Some(count) = targets.get(row).and_then(|t| counts.get_mut(*t)) {
                *count += 1;
            }
        }

        let id = self.nodes.len();
        self.nodes.push(FlatNode::leaf(counts));
        if node.is_leaf() {
            return id;
        }

        let (feature, threshold, _) = node.split();
        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .iter()
            .partition(|&&row| records.get((row, feature)).is_some_and(|v| *v < threshold));

        let children = node.children();
        let left = children
            .first()
            .and_then(|child| child.as_deref())
            .map(|child| self.flatten(child, &left_rows, records, targets));
        let right = children
            .get(1)
            .and_then(|child| child.as_deref())
            .map(|child| self.flatten(child, &right_rows, records, targets));

        if let Some(flat) = self.nodes.get_mut(id) {
            flat.left = left;
            flat.right = right;
            flat.feature = Some(feature);
            flat.threshold = threshold;
        }
        id
    }

    pub fn nodes(&self) -> &[FlatNode] {
        &self.nodes
    }

    pub fn node(&self, id: usize) -> Option<&FlatNode> {
        self.nodes.get(id)
    }

    pub fn root(&self) -> Option<&FlatNode> {
        self.nodes.first()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        fn walk(tree: &TreeStructure, id: usize) -> usize {
            let Some(node) = tree.node(id) else {
                return 0;
            };
            let children = [node.left, node.right];
            children
                .iter()
                .flatten()
                .map(|child| 1 + walk(tree, *child))
                .max()
                .unwrap_or(0)
        }
        if self.nodes.is_empty() { 0 } else { walk(self, 0) }
    }
}
