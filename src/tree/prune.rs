use std::collections::HashSet;

use super::node::Tree;

/// Build a copy of `tree` with every child subtree whose label is in `discard`
/// removed. The input is not modified and shares nothing with the result.
///
/// Only children are checked: the node passed in is always kept. Copies carry
/// the label and (now stale) count but no verbose label, so callers must
/// re-run aggregation and label derivation on the result.
pub fn prune_tree<S: AsRef<str>>(tree: &Tree, discard: &[S]) -> Tree {
    let discard: HashSet<&str> = discard.iter().map(|s| s.as_ref()).collect();
    let pruned = prune_node(tree, &discard);

    tracing::debug!(
        "Pruned {:?}: {} -> {} nodes",
        discard,
        tree.len(),
        pruned.len()
    );

    pruned
}

fn prune_node(node: &Tree, discard: &HashSet<&str>) -> Tree {
    if node.is_leaf() {
        return Tree::leaf(&node.label, node.count);
    }

    let children = node
        .children
        .iter()
        .filter(|child| !discard.contains(child.label.as_str()))
        .map(|child| prune_node(child, discard))
        .collect();

    Tree::with_children(&node.label, node.count, children)
}
