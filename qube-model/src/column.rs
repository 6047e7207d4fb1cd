use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use arrow::datatypes::DataType;

/// Reference to a table column.
///
/// Identity is `(table, index, name)`; the Arrow data type rides along for
/// schema construction but does not participate in equality, so two refs to
/// the same catalog column always compare equal.
///
/// The `index` is the column's zero-based position within its table, which is
/// also its physical offset inside a materialized lookup-table row.
#[derive(Clone, Debug)]
pub struct ColumnRef {
    pub table: String,
    pub name: String,
    pub index: usize,
    pub data_type: DataType,
}

impl ColumnRef {
    pub fn new(
        table: impl Into<String>,
        name: impl Into<String>,
        index: usize,
        data_type: DataType,
    ) -> Self {
        Self {
            table: table.into(),
            name: name.into(),
            index,
            data_type,
        }
    }

    /// Shorthand for a UTF-8 column, the common case for dimensions.
    pub fn utf8(table: impl Into<String>, name: impl Into<String>, index: usize) -> Self {
        Self::new(table, name, index, DataType::Utf8)
    }
}

impl PartialEq for ColumnRef {
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table && self.index == other.index && self.name == other.name
    }
}

impl Eq for ColumnRef {}

impl Hash for ColumnRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.table.hash(state);
        self.index.hash(state);
        self.name.hash(state);
    }
}

impl PartialOrd for ColumnRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ColumnRef {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.table, self.index, &self.name).cmp(&(&other.table, other.index, &other.name))
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_ignores_data_type() {
        let a = ColumnRef::new("SALES", "PART_DT", 0, DataType::Utf8);
        let b = ColumnRef::new("SALES", "PART_DT", 0, DataType::Int64);
        assert_eq!(a, b);
    }

    #[test]
    fn ordering_is_by_table_then_index() {
        let a = ColumnRef::utf8("A", "Z", 0);
        let b = ColumnRef::utf8("A", "A", 1);
        let c = ColumnRef::utf8("B", "A", 0);
        assert!(a < b);
        assert!(b < c);
    }
}
