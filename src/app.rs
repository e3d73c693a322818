use anyhow::Result;

use crate::data::CountTable;
use crate::layout::{compute_rectangles, Bounds, Rectangle};
use crate::tree::{self, Tree};

/// What to build from a count table.
#[derive(Debug, Clone, Default)]
pub struct TreemapRequest {
    /// Grouping categories, outermost first. `None` uses every category.
    pub categories: Option<Vec<String>>,
    /// Labels whose subtrees are dropped before layout.
    pub prune: Option<Vec<String>>,
    pub bounds: Bounds,
}

/// A laid-out treemap and the tree it was computed from.
#[derive(Debug, Clone)]
pub struct Treemap {
    pub tree: Tree,
    pub rects: Vec<Rectangle>,
    pub bounds: Bounds,
}

/// Group, aggregate, label, optionally prune, then lay out.
pub fn build_treemap(table: &CountTable, request: &TreemapRequest) -> Result<Treemap> {
    let mut tree = tree::data_to_tree(table, request.categories.as_deref())?;

    tree::compute_internal_counts(&mut tree);
    tree::compute_verbose_labels(&mut tree);

    if let Some(discard) = &request.prune {
        tree = tree::prune_tree(&tree, discard.as_slice());
        tracing::info!(
            "Pruned [{}]: {} nodes remain",
            discard.join(", "),
            tree.len()
        );
    }

    // Re-derives counts and labels, which pruning left stale
    let rects = compute_rectangles(&mut tree, request.bounds)?;

    tracing::info!(
        "Laid out {} rectangles for total count {}",
        rects.len(),
        tree.count_or_zero()
    );

    Ok(Treemap {
        tree,
        rects,
        bounds: request.bounds,
    })
}
