use std::sync::Arc;

use qube_dict::Dictionary;
use qube_model::{CellValue, ColumnRef, MeasureDesc, Tuple, TupleInfo};
use qube_result::{Error, Result};
use rustc_hash::FxHashMap;

/// Dictionaries an advanced measure filler needs, keyed by column.
pub type DictionaryMap = FxHashMap<ColumnRef, Arc<dyn Dictionary>>;

/// Stateful per-plan filler for measures that cannot be materialized with a
/// single scalar write.
///
/// Built once per plan, then [`reload`](AdvancedFiller::reload)ed with a
/// fresh source value for every record. The caller drives
/// [`fill_row`](AdvancedFiller::fill_row) over `0..row_count()` to expand one
/// stored aggregate into its final output rows, and must finish doing so
/// before the next record overwrites the reload state.
pub trait AdvancedFiller: Send {
    fn reload(&mut self, value: &CellValue);

    fn row_count(&self) -> usize;

    fn fill_row(&self, tuple: &mut Tuple, row: usize);
}

/// Capability of one aggregate function family.
///
/// The converter consults this to decide between a one-shot scalar fill and
/// the advanced reload/expand protocol. Scalar fill semantics are
/// measure-type-specific; the tuple assembler only delegates.
pub trait MeasureType: Send + Sync {
    /// Whether this measure needs the advanced filler protocol instead of a
    /// one-shot scalar write.
    fn needs_advanced_fill(&self) -> bool {
        false
    }

    /// One-shot scalar write of a stored value into an output field cell.
    fn fill_scalar(&self, tuple: &mut Tuple, slot: usize, value: &CellValue);

    /// Columns whose dictionaries the advanced filler needs. Only these are
    /// loaded; unrelated dictionaries stay untouched.
    fn dictionary_columns(&self, desc: &MeasureDesc) -> Vec<ColumnRef> {
        let _ = desc;
        Vec::new()
    }

    /// Build the advanced filler, bound to the output schema and to the
    /// dictionaries from [`dictionary_columns`](MeasureType::dictionary_columns).
    fn build_advanced_filler(
        &self,
        desc: &MeasureDesc,
        info: &TupleInfo,
        dictionaries: &DictionaryMap,
    ) -> Result<Box<dyn AdvancedFiller>> {
        let _ = (info, dictionaries);
        Err(Error::Internal(format!(
            "measure '{}' does not support advanced filling",
            desc.name
        )))
    }
}

/// Output slot of a measure: by rewrite field name when the measure reads a
/// pre-aggregated storage field, by its parameter column otherwise.
pub(crate) fn measure_output_slot(desc: &MeasureDesc, info: &TupleInfo) -> Option<usize> {
    match &desc.rewrite_field {
        Some(field) => info.field_index(field),
        None => desc
            .parameters
            .first()
            .and_then(|col| info.column_index(col)),
    }
}

/// Scalar measures: SUM, COUNT, MIN, MAX and friends.
///
/// Fill decodes textual storage values to their numeric shape where possible
/// and writes the result in one shot.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicMeasure;

impl MeasureType for BasicMeasure {
    fn fill_scalar(&self, tuple: &mut Tuple, slot: usize, value: &CellValue) {
        let decoded = match value {
            CellValue::Text(s) => {
                if let Ok(v) = s.parse::<i64>() {
                    CellValue::Integer(v)
                } else if let Ok(v) = s.parse::<f64>() {
                    CellValue::Float(v)
                } else {
                    CellValue::Text(s.clone())
                }
            }
            other => other.clone(),
        };
        tuple.set_field_value(slot, decoded);
    }
}

/// Top-N measure: one stored aggregate expands into up to N output rows.
///
/// The stored value keeps the ranked literal column dictionary-encoded as
/// `id:count` pairs separated by `;`. Expansion decodes each literal through
/// the column dictionary and writes one (literal, count) pair per output row.
#[derive(Clone, Copy, Debug, Default)]
pub struct TopNMeasure;

impl MeasureType for TopNMeasure {
    fn needs_advanced_fill(&self) -> bool {
        true
    }

    fn fill_scalar(&self, _tuple: &mut Tuple, _slot: usize, _value: &CellValue) {
        // advanced-only; the dispatcher never tags this type for simple fill
    }

    fn dictionary_columns(&self, desc: &MeasureDesc) -> Vec<ColumnRef> {
        desc.parameters.iter().skip(1).cloned().collect()
    }

    fn build_advanced_filler(
        &self,
        desc: &MeasureDesc,
        info: &TupleInfo,
        dictionaries: &DictionaryMap,
    ) -> Result<Box<dyn AdvancedFiller>> {
        let literal = desc.parameters.get(1).ok_or_else(|| {
            Error::InvalidArgumentError(format!(
                "TOP_N measure '{}' needs a literal column parameter",
                desc.name
            ))
        })?;
        let dictionary = dictionaries.get(literal).cloned().ok_or_else(|| {
            Error::Internal(format!(
                "dictionary for literal column {literal} was not loaded"
            ))
        })?;
        Ok(Box::new(TopNFiller {
            literal_slot: info.column_index(literal),
            measure_slot: measure_output_slot(desc, info),
            dictionary,
            entries: Vec::new(),
        }))
    }
}

struct TopNFiller {
    literal_slot: Option<usize>,
    measure_slot: Option<usize>,
    dictionary: Arc<dyn Dictionary>,
    entries: Vec<(i64, f64)>,
}

impl AdvancedFiller for TopNFiller {
    fn reload(&mut self, value: &CellValue) {
        self.entries.clear();
        let CellValue::Text(encoded) = value else {
            return;
        };
        for pair in encoded.split(';').filter(|p| !p.is_empty()) {
            let Some((id, count)) = pair.split_once(':') else {
                continue;
            };
            if let (Ok(id), Ok(count)) = (id.parse::<i64>(), count.parse::<f64>()) {
                self.entries.push((id, count));
            }
        }
    }

    fn row_count(&self) -> usize {
        self.entries.len()
    }

    fn fill_row(&self, tuple: &mut Tuple, row: usize) {
        let (id, count) = self.entries[row];
        if let Some(slot) = self.literal_slot {
            tuple.set_dimension_value(slot, self.dictionary.decode(id));
        }
        if let Some(slot) = self.measure_slot {
            tuple.set_field_value(slot, CellValue::Float(count));
        }
    }
}

/// Resolves a measure descriptor's aggregate expression to its measure-type
/// capability. Unknown expressions fail plan construction.
pub struct MeasureTypeRegistry {
    types: FxHashMap<String, Arc<dyn MeasureType>>,
}

impl Default for MeasureTypeRegistry {
    fn default() -> Self {
        let mut registry = Self {
            types: FxHashMap::default(),
        };
        let basic: Arc<dyn MeasureType> = Arc::new(BasicMeasure);
        for expr in ["SUM", "COUNT", "MIN", "MAX"] {
            registry.types.insert(expr.to_string(), Arc::clone(&basic));
        }
        registry.types.insert("TOP_N".to_string(), Arc::new(TopNMeasure));
        registry
    }
}

impl MeasureTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, expression: impl Into<String>, mtype: Arc<dyn MeasureType>) {
        self.types.insert(expression.into(), mtype);
    }

    pub fn resolve(&self, desc: &MeasureDesc) -> Result<Arc<dyn MeasureType>> {
        self.types.get(&desc.expression).cloned().ok_or_else(|| {
            Error::InvalidArgumentError(format!(
                "unknown aggregate expression '{}' for measure '{}'",
                desc.expression, desc.name
            ))
        })
    }
}
