use compact_str::CompactString;

/// A node in a category hierarchy.
///
/// The root conventionally has the empty label. Leaves carry the counts read
/// from the data; internal counts and every `verbose_label` are derived by the
/// passes in [`super::aggregate`] and [`super::labels`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    /// Category value at this level (empty for the root)
    pub label: CompactString,
    /// Leaf: count from the data. Internal: sum of children once aggregated.
    pub count: Option<u64>,
    /// Ordered children. Order decides rectangle emission order.
    pub children: Vec<Tree>,
    /// Colon-separated path from the root, e.g. "Google: female: white"
    pub verbose_label: Option<String>,
}

impl Tree {
    /// Create a node without children.
    pub fn leaf(label: &str, count: Option<u64>) -> Self {
        Self::with_children(label, count, Vec::new())
    }

    /// Create a node with the given children.
    pub fn with_children(label: &str, count: Option<u64>, children: Vec<Tree>) -> Self {
        Tree {
            label: CompactString::new(label),
            count,
            children,
            verbose_label: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Count, treating an unset count as 0.
    pub fn count_or_zero(&self) -> u64 {
        self.count.unwrap_or(0)
    }

    /// Total number of nodes in this subtree (including self).
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(Tree::len).sum::<usize>()
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Find a direct child by label.
    pub fn child(&self, label: &str) -> Option<&Tree> {
        self.children.iter().find(|c| c.label.as_str() == label)
    }

    /// Follow a path of labels down from this node.
    pub fn descendant(&self, path: &[&str]) -> Option<&Tree> {
        path.iter().try_fold(self, |node, label| node.child(label))
    }

    /// Preorder iterator over this subtree.
    pub fn iter(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }

    /// Leaves of this subtree, left to right.
    pub fn leaves(&self) -> impl Iterator<Item = &Tree> {
        self.iter().filter(|n| n.is_leaf())
    }
}

/// Depth-first, children-in-stored-order iterator.
pub struct Preorder<'a> {
    stack: Vec<&'a Tree>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Tree;

    fn next(&mut self) -> Option<&'a Tree> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
