use super::node::Tree;

/// Separator between path segments in a verbose label.
pub const LABEL_SEPARATOR: &str = ": ";

/// Where a node sits relative to the node the pass started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position<'a> {
    /// The node the pass was started on
    Root,
    /// Child of a node whose verbose label is empty (the conventional root)
    ChildOfRoot,
    /// Any other node, with its parent's verbose label
    Nested(&'a str),
}

fn verbose_label_for(label: &str, position: Position<'_>) -> String {
    match position {
        Position::Root | Position::ChildOfRoot => label.to_string(),
        Position::Nested(parent) => format!("{}{}{}", parent, LABEL_SEPARATOR, label),
    }
}

/// Assign a verbose label to every node of `tree`.
///
/// The root keeps its own label, which is "" for trees built from data. A
/// child of a node with an empty verbose label gets just its label; every
/// other node gets `"<parent verbose label>: <label>"`. Existing verbose
/// labels are overwritten.
pub fn compute_verbose_labels(tree: &mut Tree) {
    assign(tree, Position::Root);
}

fn assign(node: &mut Tree, position: Position<'_>) {
    let verbose = verbose_label_for(&node.label, position);

    let child_position = if verbose.is_empty() {
        Position::ChildOfRoot
    } else {
        Position::Nested(&verbose)
    };
    for child in node.children.iter_mut() {
        assign(child, child_position);
    }

    node.verbose_label = Some(verbose);
}
