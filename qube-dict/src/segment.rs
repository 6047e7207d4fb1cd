use std::sync::Arc;

use qube_model::ColumnRef;
use qube_result::{Error, Result};
use rustc_hash::FxHashMap;

use crate::dictionary::Dictionary;
use crate::lookup::LookupTable;

/// Per-segment services a conversion plan needs at construction time:
/// column dictionaries for advanced measures and lookup tables for derived
/// columns. Queried only while the plan is built, never per record.
pub trait SegmentContext: Send + Sync {
    fn dictionary(&self, col: &ColumnRef) -> Result<Arc<dyn Dictionary>>;

    fn lookup_table(&self, table: &str) -> Result<Arc<LookupTable>>;
}

/// In-memory segment context for tests and single-process use.
#[derive(Default)]
pub struct MemSegmentContext {
    dictionaries: FxHashMap<ColumnRef, Arc<dyn Dictionary>>,
    lookups: FxHashMap<String, Arc<LookupTable>>,
}

impl MemSegmentContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dictionary(mut self, col: ColumnRef, dict: Arc<dyn Dictionary>) -> Self {
        self.dictionaries.insert(col, dict);
        self
    }

    pub fn with_lookup_table(mut self, table: impl Into<String>, lookup: LookupTable) -> Self {
        self.lookups.insert(table.into(), Arc::new(lookup));
        self
    }
}

impl SegmentContext for MemSegmentContext {
    fn dictionary(&self, col: &ColumnRef) -> Result<Arc<dyn Dictionary>> {
        self.dictionaries.get(col).cloned().ok_or_else(|| {
            Error::InvalidArgumentError(format!("no dictionary loaded for column {col}"))
        })
    }

    fn lookup_table(&self, table: &str) -> Result<Arc<LookupTable>> {
        self.lookups.get(table).cloned().ok_or_else(|| {
            Error::InvalidArgumentError(format!("no lookup table loaded for '{table}'"))
        })
    }
}
