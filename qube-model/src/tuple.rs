use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use rustc_hash::FxHashMap;

use crate::column::ColumnRef;
use crate::value::CellValue;

/// The caller's output schema: a fixed mapping from column references and
/// named fields to slot positions in the produced tuple.
///
/// Every slot is registered under its field name; slots backed by a catalog
/// column are additionally reachable through the column reference. A column
/// the caller did not request simply has no slot here, and the conversion
/// plan records that as "skip the write".
#[derive(Clone, Debug, Default)]
pub struct TupleInfo {
    field_names: Vec<String>,
    data_types: Vec<DataType>,
    column_slots: FxHashMap<ColumnRef, usize>,
    field_slots: FxHashMap<String, usize>,
}

impl TupleInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an output slot backed by a catalog column. Returns the slot.
    pub fn add_column(&mut self, col: &ColumnRef) -> usize {
        let slot = self.field_names.len();
        self.field_names.push(col.name.clone());
        self.data_types.push(col.data_type.clone());
        self.column_slots.insert(col.clone(), slot);
        self.field_slots.insert(col.name.clone(), slot);
        slot
    }

    /// Register a named output field with no backing column, e.g. the
    /// rewritten storage field of a pre-aggregated measure. Returns the slot.
    pub fn add_field(&mut self, name: impl Into<String>, data_type: DataType) -> usize {
        let name = name.into();
        let slot = self.field_names.len();
        self.field_names.push(name.clone());
        self.data_types.push(data_type);
        self.field_slots.insert(name, slot);
        slot
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.field_names.len()
    }

    #[inline]
    pub fn has_column(&self, col: &ColumnRef) -> bool {
        self.column_slots.contains_key(col)
    }

    #[inline]
    pub fn column_index(&self, col: &ColumnRef) -> Option<usize> {
        self.column_slots.get(col).copied()
    }

    #[inline]
    pub fn has_field(&self, name: &str) -> bool {
        self.field_slots.contains_key(name)
    }

    #[inline]
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.field_slots.get(name).copied()
    }

    pub fn field_name(&self, slot: usize) -> &str {
        &self.field_names[slot]
    }

    pub fn data_type(&self, slot: usize) -> &DataType {
        &self.data_types[slot]
    }

    /// Arrow schema matching this tuple layout, for batch materialization.
    pub fn arrow_schema(&self) -> SchemaRef {
        let fields: Vec<Field> = self
            .field_names
            .iter()
            .zip(&self.data_types)
            .map(|(name, dt)| Field::new(name, dt.clone(), true))
            .collect();
        Arc::new(Schema::new(fields))
    }
}

/// A mutable output row with independent dimension-cell and field-cell
/// addressing over one backing slot array.
///
/// Exclusively owned and mutated by the tuple assembler during one conversion
/// call, then handed to the caller.
#[derive(Clone, Debug)]
pub struct Tuple {
    info: Arc<TupleInfo>,
    values: Vec<CellValue>,
}

impl Tuple {
    pub fn new(info: Arc<TupleInfo>) -> Self {
        let values = vec![CellValue::Null; info.size()];
        Self { info, values }
    }

    pub fn info(&self) -> &Arc<TupleInfo> {
        &self.info
    }

    /// Write a dimension cell in canonical string form; `None` clears it.
    #[inline]
    pub fn set_dimension_value(&mut self, slot: usize, value: Option<String>) {
        self.values[slot] = match value {
            Some(v) => CellValue::Text(v),
            None => CellValue::Null,
        };
    }

    /// Write a measure field cell.
    #[inline]
    pub fn set_field_value(&mut self, slot: usize, value: CellValue) {
        self.values[slot] = value;
    }

    #[inline]
    pub fn value(&self, slot: usize) -> &CellValue {
        &self.values[slot]
    }

    pub fn values(&self) -> &[CellValue] {
        &self.values
    }

    /// Clear every cell back to null.
    pub fn reset(&mut self) {
        for v in &mut self.values {
            *v = CellValue::Null;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_slots_are_reachable_by_name_and_ref() {
        let col = ColumnRef::utf8("SALES", "PART_DT", 0);
        let mut info = TupleInfo::new();
        let slot = info.add_column(&col);
        let field = info.add_field("GMV_SUM", DataType::Float64);

        assert_eq!(info.size(), 2);
        assert_eq!(info.column_index(&col), Some(slot));
        assert_eq!(info.field_index("PART_DT"), Some(slot));
        assert_eq!(info.field_index("GMV_SUM"), Some(field));
        assert!(!info.has_column(&ColumnRef::utf8("SALES", "OTHER", 3)));
    }

    #[test]
    fn tuple_cells_start_null_and_reset() {
        let mut info = TupleInfo::new();
        info.add_field("A", DataType::Utf8);
        let mut tuple = Tuple::new(Arc::new(info));
        assert!(tuple.value(0).is_null());

        tuple.set_dimension_value(0, Some("x".to_string()));
        assert_eq!(tuple.value(0), &CellValue::from("x"));

        tuple.reset();
        assert!(tuple.value(0).is_null());
    }
}
