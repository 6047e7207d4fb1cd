use qube_result::{Error, Result};
use rustc_hash::FxHashMap;

/// A fully materialized dimension table keyed by an ordered tuple of
/// string-encoded key column values.
///
/// Misses return `None` rather than raising; a missing foreign-key row
/// degrades to nulls in the derived output columns.
#[derive(Clone, Debug)]
pub struct LookupTable {
    key_width: usize,
    rows: FxHashMap<Vec<String>, Vec<String>>,
}

impl LookupTable {
    pub fn new(key_width: usize) -> Self {
        Self {
            key_width,
            rows: FxHashMap::default(),
        }
    }

    pub fn key_width(&self) -> usize {
        self.key_width
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn insert(&mut self, key: Vec<String>, row: Vec<String>) -> Result<()> {
        if key.len() != self.key_width {
            return Err(Error::InvalidArgumentError(format!(
                "lookup key has {} parts, table expects {}",
                key.len(),
                self.key_width
            )));
        }
        self.rows.insert(key, row);
        Ok(())
    }

    /// Fetch the row for a composite key; `None` for absent keys.
    pub fn row(&self, key: &[String]) -> Option<&[String]> {
        self.rows.get(key).map(|r| r.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_key_hit_and_miss() {
        let mut table = LookupTable::new(1);
        table
            .insert(
                vec!["US".to_string()],
                vec!["United States".to_string(), "NA".to_string()],
            )
            .unwrap();

        let hit = table.row(&["US".to_string()]).unwrap();
        assert_eq!(hit[0], "United States");
        assert!(table.row(&["ZZ".to_string()]).is_none());
    }

    #[test]
    fn key_width_is_enforced() {
        let mut table = LookupTable::new(2);
        let err = table
            .insert(vec!["US".to_string()], vec!["row".to_string()])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgumentError(_)));
    }
}
