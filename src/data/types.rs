use compact_str::CompactString;

/// One row of a count table, before tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRecord {
    /// Category values, in the table's category column order
    pub values: Vec<CompactString>,
    /// Number of people/items in this combination. `None` when the cell was
    /// empty or marked as not available.
    pub count: Option<u64>,
}

impl CountRecord {
    pub fn new<I, S>(values: I, count: Option<u64>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            values: values.into_iter().map(|v| CompactString::new(v.as_ref())).collect(),
            count,
        }
    }
}
