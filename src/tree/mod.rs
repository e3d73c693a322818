pub mod aggregate;
pub mod labels;
pub mod node;
pub mod prune;

use std::collections::BTreeMap;

use anyhow::{anyhow, Result};

pub use self::aggregate::{compute_internal_counts, recompute_internal_counts, reset_internal_counts};
pub use self::labels::compute_verbose_labels;
pub use self::node::Tree;
pub use self::prune::prune_tree;

use crate::data::types::CountRecord;
use crate::data::CountTable;

/// Build a category tree from a count table.
///
/// Records are grouped by `categories` in the given order (default: every
/// category column in table order). The root has the empty label, the tree
/// is one level deep per category, siblings are sorted by value, and each
/// leaf carries the summed count of its group. Internal counts are left unset.
pub fn data_to_tree(table: &CountTable, categories: Option<&[String]>) -> Result<Tree> {
    let keys: Vec<usize> = match categories {
        Some(names) => names
            .iter()
            .map(|name| {
                table.category_index(name).ok_or_else(|| {
                    anyhow!(
                        "unknown category '{}' (available: {})",
                        name,
                        table.category_list()
                    )
                })
            })
            .collect::<Result<_>>()?,
        None => (0..table.category_names().len()).collect(),
    };

    // Every internal count is bounded by the table total, so aggregation
    // cannot overflow once this succeeds
    table.total()?;

    let records: Vec<&CountRecord> = table.records().iter().collect();

    let tree = if keys.is_empty() {
        Tree::leaf("", Some(sum_counts(&records)?))
    } else {
        Tree::with_children("", None, group(&records, &keys)?)
    };

    tracing::info!(
        "Tree built: {} nodes, depth {}, {} leaves",
        tree.len(),
        tree.depth(),
        tree.leaves().count()
    );

    Ok(tree)
}

fn group(records: &[&CountRecord], keys: &[usize]) -> Result<Vec<Tree>> {
    let (&key, rest) = match keys.split_first() {
        Some(split) => split,
        None => return Ok(Vec::new()),
    };

    let mut groups: BTreeMap<&str, Vec<&CountRecord>> = BTreeMap::new();
    for &record in records {
        groups
            .entry(record.values[key].as_str())
            .or_default()
            .push(record);
    }

    groups
        .into_iter()
        .map(|(value, members)| -> Result<Tree> {
            Ok(if rest.is_empty() {
                Tree::leaf(value, Some(sum_counts(&members)?))
            } else {
                Tree::with_children(value, None, group(&members, rest)?)
            })
        })
        .collect()
}

fn sum_counts(records: &[&CountRecord]) -> Result<u64> {
    records
        .iter()
        .filter_map(|r| r.count)
        .try_fold(0u64, |acc, n| acc.checked_add(n))
        .ok_or_else(|| anyhow!("count total overflows u64"))
}
