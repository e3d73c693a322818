use super::node::Tree;

/// Compute the count of every internal node (bottom-up).
///
/// Unset counts start at 0. A leaf's count is returned unchanged. An internal
/// node adds the sum of its children's totals to whatever count it already
/// holds, so this pass must run once per structural state of the tree; use
/// [`recompute_internal_counts`] to re-derive totals on a tree that was
/// already aggregated.
///
/// Returns the total of `tree`.
pub fn compute_internal_counts(tree: &mut Tree) -> u64 {
    let mut total = tree.count.unwrap_or(0);

    for child in tree.children.iter_mut() {
        total += compute_internal_counts(child);
    }

    tree.count = Some(total);
    total
}

/// Clear the count of every internal node. Leaf counts are data and are kept.
pub fn reset_internal_counts(tree: &mut Tree) {
    if tree.is_leaf() {
        return;
    }
    tree.count = None;
    for child in tree.children.iter_mut() {
        reset_internal_counts(child);
    }
}

/// Reset then aggregate, giving the same totals no matter how many times it runs.
pub fn recompute_internal_counts(tree: &mut Tree) -> u64 {
    reset_internal_counts(tree);
    compute_internal_counts(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn google() -> Tree {
        Tree::with_children(
            "",
            None,
            vec![Tree::with_children(
                "Google",
                None,
                vec![Tree::leaf("female", Some(30)), Tree::leaf("male", Some(70))],
            )],
        )
    }

    #[test]
    fn sums_children_into_every_internal_node() {
        let mut t = google();
        assert_eq!(compute_internal_counts(&mut t), 100);
        assert_eq!(t.count, Some(100));
        assert_eq!(t.child("Google").unwrap().count, Some(100));
        assert_eq!(t.descendant(&["Google", "female"]).unwrap().count, Some(30));
    }

    #[test]
    fn missing_leaf_count_is_zero() {
        let mut t = Tree::with_children(
            "",
            None,
            vec![Tree::leaf("a", None), Tree::leaf("b", Some(4))],
        );
        assert_eq!(compute_internal_counts(&mut t), 4);
        assert_eq!(t.child("a").unwrap().count, Some(0));
    }

    #[test]
    fn lone_leaf_returns_its_count() {
        let mut t = Tree::leaf("solo", Some(9));
        assert_eq!(compute_internal_counts(&mut t), 9);
        let mut empty = Tree::leaf("", None);
        assert_eq!(compute_internal_counts(&mut empty), 0);
        assert_eq!(empty.count, Some(0));
    }

    #[test]
    fn second_pass_accumulates_into_existing_counts() {
        let mut t = google();
        compute_internal_counts(&mut t);
        compute_internal_counts(&mut t);
        // Google: 100 + 100, root: 100 + 200
        assert_eq!(t.child("Google").unwrap().count, Some(200));
        assert_eq!(t.count, Some(300));
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut t = google();
        compute_internal_counts(&mut t);
        assert_eq!(recompute_internal_counts(&mut t), 100);
        assert_eq!(recompute_internal_counts(&mut t), 100);
        assert_eq!(t.child("Google").unwrap().count, Some(100));
    }

    #[test]
    fn reset_keeps_leaf_counts() {
        let mut t = google();
        compute_internal_counts(&mut t);
        reset_internal_counts(&mut t);
        assert_eq!(t.count, None);
        assert_eq!(t.child("Google").unwrap().count, None);
        assert_eq!(t.descendant(&["Google", "male"]).unwrap().count, Some(70));
    }
}
