pub mod types;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use compact_str::CompactString;

use self::types::CountRecord;

/// Name of the column holding the per-row count. Every other column is a category.
pub const COUNT_COLUMN: &str = "count";

/// A table of category values with a count per row.
#[derive(Debug, Clone, Default)]
pub struct CountTable {
    categories: Vec<CompactString>,
    records: Vec<CountRecord>,
}

impl CountTable {
    /// Create an empty table with the given category columns.
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            categories: categories
                .into_iter()
                .map(|c| CompactString::new(c.as_ref()))
                .collect(),
            records: Vec::new(),
        }
    }

    /// Append a record. Fails if it does not have one value per category.
    pub fn push(&mut self, record: CountRecord) -> Result<()> {
        if record.values.len() != self.categories.len() {
            bail!(
                "record has {} category values, table has {} categories",
                record.values.len(),
                self.categories.len()
            );
        }
        self.records.push(record);
        Ok(())
    }

    pub fn category_names(&self) -> &[CompactString] {
        &self.categories
    }

    /// Comma-separated category names, for messages.
    pub fn category_list(&self) -> String {
        self.categories
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn category_index(&self, name: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.as_str() == name)
    }

    pub fn records(&self) -> &[CountRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of all counts (missing counts contribute 0).
    /// Sum of every known count. Fails if the sum does not fit in a `u64`.
    pub fn total(&self) -> Result<u64> {
        self.records
            .iter()
            .filter_map(|r| r.count)
            .try_fold(0u64, |acc, n| acc.checked_add(n))
            .context("total count overflows u64")
    }

    /// Total count per distinct value of one category, sorted by value.
    pub fn column_totals(&self, name: &str) -> Result<Vec<(CompactString, u64)>> {
        let idx = self.category_index(name).ok_or_else(|| {
            anyhow!(
                "unknown category '{}' (available: {})",
                name,
                self.category_list()
            )
        })?;

        let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
        for record in &self.records {
            let value = record.values[idx].as_str();
            let total = totals.entry(value).or_default();
            *total = total
                .checked_add(record.count.unwrap_or(0))
                .with_context(|| format!("total count for '{}' overflows u64", value))?;
        }

        Ok(totals
            .into_iter()
            .map(|(value, total)| (CompactString::new(value), total))
            .collect())
    }
}

/// Load a CSV count table from disk.
pub fn load_count_data(path: &Path) -> Result<CountTable> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let table =
        read_count_data(file).with_context(|| format!("Failed to read {}", path.display()))?;

    tracing::info!(
        "Loaded {} records with categories [{}] from {}",
        table.len(),
        table.category_list(),
        path.display()
    );

    Ok(table)
}

/// Parse a CSV count table. The header row must name a `count` column.
pub fn read_count_data<R: Read>(reader: R) -> Result<CountTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().context("Missing header row")?.clone();
    let count_idx = headers
        .iter()
        .position(|h| h == COUNT_COLUMN)
        .ok_or_else(|| anyhow!("no '{}' column in header", COUNT_COLUMN))?;

    let mut table = CountTable::new(
        headers
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != count_idx)
            .map(|(_, h)| h),
    );

    for (i, row) in rdr.records().enumerate() {
        let row = row.with_context(|| format!("Malformed record {}", i + 1))?;
        let line = row.position().map(|p| p.line()).unwrap_or(i as u64 + 2);

        let count = parse_count(row.get(count_idx).unwrap_or(""))
            .with_context(|| format!("Invalid count on line {}", line))?;
        let values = row
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != count_idx)
            .map(|(_, v)| v);

        table.push(CountRecord::new(values, count))?;
    }

    let missing = table.records.iter().filter(|r| r.count.is_none()).count();
    if missing > 0 {
        tracing::debug!("{} records have no count and contribute 0", missing);
    }

    Ok(table)
}

/// 2^64, the first float that no longer fits in a `u64`.
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

fn parse_count(raw: &str) -> Result<Option<u64>> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("na") || raw.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    if let Ok(n) = raw.parse::<u64>() {
        return Ok(Some(n));
    }

    // Integral floats ("12.0") show up in exported spreadsheets
    match raw.parse::<f64>() {
        Ok(v) if v >= U64_LIMIT => bail!("count '{}' is too large", raw),
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 => Ok(Some(v as u64)),
        _ => bail!("'{}' is not a non-negative integer count", raw),
    }
}
