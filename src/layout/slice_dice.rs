use super::rectangle::{Rectangle, ValidationError};
use crate::tree::{compute_verbose_labels, recompute_internal_counts, Tree};

/// The box a treemap is laid out in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Bounds {
    /// Unit square at the origin.
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
        }
    }
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Which extent of a region is divided among a node's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitAxis {
    /// Children become side-by-side vertical strips
    Width,
    /// Children become stacked horizontal strips
    Height,
}

impl SplitAxis {
    pub fn flip(self) -> Self {
        match self {
            SplitAxis::Width => SplitAxis::Height,
            SplitAxis::Height => SplitAxis::Width,
        }
    }
}

/// Compute the slice-and-dice rectangles for `tree` inside `bounds`.
///
/// Counts and verbose labels are re-derived first, so a freshly pruned tree
/// can be passed directly. The root splits its width among its children,
/// their children split height, and so on. One rectangle is emitted per
/// leaf, in depth-first stored order.
pub fn compute_rectangles(
    tree: &mut Tree,
    bounds: Bounds,
) -> Result<Vec<Rectangle>, ValidationError> {
    // Reject bad bounds up front rather than on the first leaf
    Rectangle::new((bounds.x, bounds.y), (bounds.width, bounds.height), "", "")?;

    let total = recompute_internal_counts(tree);
    compute_verbose_labels(tree);

    let mut rects = Vec::with_capacity(tree.leaves().count());
    layout_node(
        tree,
        bounds.x,
        bounds.y,
        bounds.width,
        bounds.height,
        SplitAxis::Width,
        &mut rects,
    )?;

    tracing::debug!(
        "Layout computed: {} rectangles for total count {} in {:.2}x{:.2}",
        rects.len(),
        total,
        bounds.width,
        bounds.height
    );

    Ok(rects)
}

/// Share of `extent` given to a child, relative to its immediate parent.
fn child_extent(child_count: u64, parent_count: u64, extent: f64) -> f64 {
    if parent_count == 0 {
        0.0
    } else {
        (child_count as f64 / parent_count as f64) * extent
    }
}

fn layout_node(
    node: &Tree,
    mut x0: f64,
    mut y0: f64,
    width: f64,
    height: f64,
    split: SplitAxis,
    rects: &mut Vec<Rectangle>,
) -> Result<(), ValidationError> {
    if node.is_leaf() {
        rects.push(Rectangle::from_parts(
            &[x0, y0],
            &[width, height],
            Some(node.label.as_str()),
            node.verbose_label.as_deref(),
        )?);
        return Ok(());
    }

    let parent_count = node.count_or_zero();
    for child in &node.children {
        match split {
            SplitAxis::Width => {
                let w = child_extent(child.count_or_zero(), parent_count, width);
                layout_node(child, x0, y0, w, height, split.flip(), rects)?;
                x0 += w;
            }
            SplitAxis::Height => {
                let h = child_extent(child.count_or_zero(), parent_count, height);
                layout_node(child, x0, y0, width, h, split.flip(), rects)?;
                y0 += h;
            }
        }
    }

    Ok(())
}

/// Sum of the areas of `rects`.
pub fn total_area(rects: &[Rectangle]) -> f64 {
    rects.iter().map(Rectangle::area).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{compute_internal_counts, prune_tree};

    const EPS: f64 = 1e-9;

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

    fn assert_rect(r: &Rectangle, x: f64, y: f64, w: f64, h: f64, label: &str) {
        assert!(
            (r.x() - x).abs() < EPS
                && (r.y() - y).abs() < EPS
                && (r.width() - w).abs() < EPS
                && (r.height() - h).abs() < EPS,
            "got {r}, expected ({x}, {y}, {w}, {h})"
        );
        assert_eq!(r.verbose_label(), label);
    }

    #[test]
    fn two_levels_split_width_then_height() {
        let mut t = google();
        let rects = compute_rectangles(&mut t, Bounds::default()).unwrap();

        assert_eq!(rects.len(), 2);
        assert_rect(&rects[0], 0.0, 0.0, 1.0, 0.3, "Google: female");
        assert_rect(&rects[1], 0.0, 0.3, 1.0, 0.7, "Google: male");
        assert_eq!(rects[0].label(), "female");
    }

    #[test]
    fn root_children_are_side_by_side() {
        let mut t = Tree::with_children(
            "",
            None,
            vec![
                Tree::leaf("a", Some(1)),
                Tree::leaf("b", Some(3)),
            ],
        );
        let rects = compute_rectangles(&mut t, Bounds::new(0.0, 0.0, 8.0, 2.0)).unwrap();
        assert_rect(&rects[0], 0.0, 0.0, 2.0, 2.0, "a");
        assert_rect(&rects[1], 2.0, 0.0, 6.0, 2.0, "b");
    }

    #[test]
    fn offset_bounds_shift_every_rectangle() {
        let mut t = google();
        let rects = compute_rectangles(&mut t, Bounds::new(10.0, 5.0, 2.0, 4.0)).unwrap();
        assert_rect(&rects[0], 10.0, 5.0, 2.0, 1.2, "Google: female");
        assert_rect(&rects[1], 10.0, 6.2, 2.0, 2.8, "Google: male");
    }

    #[test]
    fn already_aggregated_tree_is_not_double_counted() {
        let mut t = google();
        compute_internal_counts(&mut t);
        compute_verbose_labels(&mut t);
        let rects = compute_rectangles(&mut t, Bounds::default()).unwrap();
        assert_rect(&rects[0], 0.0, 0.0, 1.0, 0.3, "Google: female");
        assert_eq!(t.count, Some(100));
    }

    #[test]
    fn pruned_tree_fills_the_whole_box() {
        let mut t = google();
        compute_internal_counts(&mut t);
        compute_verbose_labels(&mut t);

        let mut pruned = prune_tree(&t, &["male"]);
        let rects = compute_rectangles(&mut pruned, Bounds::default()).unwrap();

        assert_eq!(pruned.child("Google").unwrap().count, Some(30));
        assert_eq!(pruned.count, Some(30));
        assert_eq!(rects.len(), 1);
        assert_rect(&rects[0], 0.0, 0.0, 1.0, 1.0, "Google: female");
    }

    #[test]
    fn zero_counts_give_zero_extent_rectangles() {
        let mut t = Tree::with_children(
            "",
            None,
            vec![
                Tree::leaf("none", Some(0)),
                Tree::with_children(
                    "empty",
                    None,
                    vec![Tree::leaf("x", None), Tree::leaf("y", Some(0))],
                ),
                Tree::leaf("all", Some(5)),
            ],
        );
        let rects = compute_rectangles(&mut t, Bounds::default()).unwrap();

        assert_eq!(rects.len(), 4);
        assert_rect(&rects[0], 0.0, 0.0, 0.0, 1.0, "none");
        // Children of a zero-count node get nothing along the split axis
        assert_rect(&rects[1], 0.0, 0.0, 0.0, 0.0, "empty: x");
        assert_rect(&rects[2], 0.0, 0.0, 0.0, 0.0, "empty: y");
        assert_rect(&rects[3], 0.0, 0.0, 1.0, 1.0, "all");
    }

    #[test]
    fn all_zero_tree_does_not_divide_by_zero() {
        let mut t = Tree::with_children(
            "",
            None,
            vec![Tree::leaf("a", Some(0)), Tree::leaf("b", None)],
        );
        let rects = compute_rectangles(&mut t, Bounds::default()).unwrap();
        assert_eq!(rects.len(), 2);
        assert!(rects.iter().all(|r| r.width() == 0.0 && r.height() == 1.0));
    }

    #[test]
    fn lone_root_covers_the_bounds() {
        let mut t = Tree::leaf("", Some(7));
        let rects = compute_rectangles(&mut t, Bounds::default()).unwrap();
        assert_eq!(rects.len(), 1);
        assert_rect(&rects[0], 0.0, 0.0, 1.0, 1.0, "");
    }

    #[test]
    fn three_levels_alternate_axes() {
        let mut t = Tree::with_children(
            "",
            None,
            vec![
                Tree::with_children(
                    "A",
                    None,
                    vec![
                        Tree::with_children(
                            "a1",
                            None,
                            vec![Tree::leaf("x", Some(1)), Tree::leaf("y", Some(1))],
                        ),
                        Tree::leaf("a2", Some(2)),
                    ],
                ),
                Tree::leaf("B", Some(4)),
            ],
        );
        let rects = compute_rectangles(&mut t, Bounds::default()).unwrap();

        assert_eq!(rects.len(), 4);
        // A takes the left half, a1 the top half of that, x and y split its width
        assert_rect(&rects[0], 0.0, 0.0, 0.25, 0.5, "A: a1: x");
        assert_rect(&rects[1], 0.25, 0.0, 0.25, 0.5, "A: a1: y");
        assert_rect(&rects[2], 0.0, 0.5, 0.5, 0.5, "A: a2");
        assert_rect(&rects[3], 0.5, 0.0, 0.5, 1.0, "B");
        assert!((total_area(&rects) - 1.0).abs() < EPS);
    }

    #[test]
    fn invalid_bounds_are_rejected() {
        let mut t = google();
        let err = compute_rectangles(&mut t, Bounds::new(0.0, 0.0, -1.0, 1.0)).unwrap_err();
        assert!(matches!(err, ValidationError::Negative { param: "size", .. }));
    }

    #[test]
    fn split_axis_flips() {
        assert_eq!(SplitAxis::Width.flip(), SplitAxis::Height);
        assert_eq!(SplitAxis::Width.flip().flip(), SplitAxis::Width);
    }
}
