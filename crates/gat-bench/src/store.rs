//! In-memory result sets.

use crate::record::{BenchmarkRecord, ContingencyType};

/// Ordered records for one (suite, method) pair.
///
/// Row order is the file's row order. The set is built once and never
/// mutated; merging produces a new set.
#[derive(Debug, Clone, Default)]
pub struct SuiteResultSet {
    label: String,
    records: Vec<BenchmarkRecord>,
}

impl SuiteResultSet {
    pub fn new(label: impl Into<String>, records: Vec<BenchmarkRecord>) -> Self {
        Self {
            label: label.into(),
            records,
        }
    }

    /// Tag every record with a contingency class (sweep files carry it in
    /// the file name rather than a column).
    pub fn with_contingency(mut self, kind: ContingencyType) -> Self {
        for record in &mut self.records {
            record.contingency = Some(kind);
        }
        self
    }

    /// Concatenate several sets in order under a new label.
    pub fn merged<I>(label: impl Into<String>, parts: I) -> Self
    where
        I: IntoIterator<Item = SuiteResultSet>,
    {
        let records = parts.into_iter().flat_map(|p| p.records).collect();
        Self::new(label, records)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn records(&self) -> &[BenchmarkRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &BenchmarkRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first `n` records in file order.
    pub fn head(&self, n: usize) -> &[BenchmarkRecord] {
        &self.records[..n.min(self.records.len())]
    }
}

impl<'a> IntoIterator for &'a SuiteResultSet {
    type Item = &'a BenchmarkRecord;
    type IntoIter = std::slice::Iter<'a, BenchmarkRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(name: &str, converged: bool) -> BenchmarkRecord {
        BenchmarkRecord {
            case_name: name.to_string(),
            converged,
            ..Default::default()
        }
    }

    #[test]
    fn test_merged_preserves_part_order_and_contingency() {
        let base = SuiteResultSet::new("n", vec![make_record("a", true)])
            .with_contingency(ContingencyType::Base);
        let n1 = SuiteResultSet::new("n1", vec![make_record("b", false)])
            .with_contingency(ContingencyType::N1);
        let merged = SuiteResultSet::merged("case30", [base, n1]);

        assert_eq!(merged.label(), "case30");
        assert_eq!(merged.len(), 2);
        assert!(!merged.records()[1].converged);
        let tags: Vec<_> = merged.iter().map(|r| r.contingency).collect();
        assert_eq!(tags, [Some(ContingencyType::Base), Some(ContingencyType::N1)]);
        assert_eq!(merged.records()[1].case_name, "b");
    }

    #[test]
    fn test_head_clamps_to_len() {
        let set = SuiteResultSet::new("x", vec![make_record("a", true)]);
        assert_eq!(set.head(5).len(), 1);
        assert!(SuiteResultSet::default().head(5).is_empty());
    }
}
