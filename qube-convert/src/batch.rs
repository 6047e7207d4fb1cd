use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use qube_model::{CellValue, Tuple, TupleInfo};
use qube_result::{Error, Result};

use crate::measure::AdvancedFiller;

/// Collects finished tuples and materializes them into one Arrow
/// `RecordBatch` matching the output schema.
///
/// The expansion driver for advanced fillers lives here too: the scan loop
/// hands [`push_translated`](TupleBatchBuilder::push_translated) the tuple and
/// whatever `translate_record` returned, and every final row lands in the
/// batch.
pub struct TupleBatchBuilder {
    info: Arc<TupleInfo>,
    columns: Vec<Vec<CellValue>>,
    n_rows: usize,
}

impl TupleBatchBuilder {
    pub fn new(info: Arc<TupleInfo>) -> Self {
        let columns = vec![Vec::new(); info.size()];
        Self {
            info,
            columns,
            n_rows: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.n_rows
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Append one finished tuple as a row.
    pub fn push_row(&mut self, tuple: &Tuple) {
        debug_assert_eq!(tuple.info().size(), self.columns.len());
        for (column, value) in self.columns.iter_mut().zip(tuple.values()) {
            column.push(value.clone());
        }
        self.n_rows += 1;
    }

    /// Append the result of one `translate_record` call.
    ///
    /// With no pending fillers the tuple is already complete and lands as one
    /// row. Otherwise each filler expands the tuple into its final rows, one
    /// row per fill, in filler registration order.
    pub fn push_translated(
        &mut self,
        tuple: &mut Tuple,
        pending: &mut [Box<dyn AdvancedFiller>],
    ) {
        if pending.is_empty() {
            self.push_row(tuple);
            return;
        }
        for filler in pending.iter() {
            for row in 0..filler.row_count() {
                filler.fill_row(tuple, row);
                self.push_row(tuple);
            }
        }
    }

    /// Build the `RecordBatch`; consumes the builder.
    pub fn finish(self) -> Result<RecordBatch> {
        let Self { info, columns, .. } = self;
        let schema = info.arrow_schema();
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(columns.len());
        for (slot, values) in columns.into_iter().enumerate() {
            arrays.push(build_array(
                info.data_type(slot),
                info.field_name(slot),
                values,
            )?);
        }
        RecordBatch::try_new(schema, arrays).map_err(Error::from)
    }
}

fn build_array(data_type: &DataType, name: &str, values: Vec<CellValue>) -> Result<ArrayRef> {
    match data_type {
        DataType::Utf8 => {
            let strings: StringArray =
                values.iter().map(CellValue::to_canonical_string).collect();
            Ok(Arc::new(strings))
        }
        DataType::Int64 => {
            let ints: Vec<Option<i64>> = values
                .iter()
                .map(|v| int_cell(name, v))
                .collect::<Result<_>>()?;
            Ok(Arc::new(Int64Array::from(ints)))
        }
        DataType::Float64 => {
            let floats: Vec<Option<f64>> = values
                .iter()
                .map(|v| float_cell(name, v))
                .collect::<Result<_>>()?;
            Ok(Arc::new(Float64Array::from(floats)))
        }
        other => Err(Error::InvalidArgumentError(format!(
            "unsupported output data type {other} for field '{name}'"
        ))),
    }
}

fn int_cell(name: &str, value: &CellValue) -> Result<Option<i64>> {
    match value {
        CellValue::Null => Ok(None),
        CellValue::Integer(v) => Ok(Some(*v)),
        CellValue::Float(v) => Ok(Some(*v as i64)),
        CellValue::Text(s) => s.parse::<i64>().map(Some).map_err(|_| {
            Error::InvalidArgumentError(format!("field '{name}' expects an integer, got '{s}'"))
        }),
    }
}

fn float_cell(name: &str, value: &CellValue) -> Result<Option<f64>> {
    match value {
        CellValue::Null => Ok(None),
        CellValue::Integer(v) => Ok(Some(*v as f64)),
        CellValue::Float(v) => Ok(Some(*v)),
        CellValue::Text(s) => s.parse::<f64>().map(Some).map_err(|_| {
            Error::InvalidArgumentError(format!("field '{name}' expects a number, got '{s}'"))
        }),
    }
}
