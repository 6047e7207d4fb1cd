use std::sync::Arc;

use qube_dict::{Dictionary, SegmentContext};
use qube_model::{CellValue, ColumnRef, Cuboid, DeriveInfo, GridRecord, MeasureDesc, Tuple, TupleInfo};
use qube_result::{Error, Result};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::derived::{build_derived_filler, DerivedFiller};
use crate::measure::{
    measure_output_slot, AdvancedFiller, DictionaryMap, MeasureType, MeasureTypeRegistry,
};

/// Reusable translation plan converting grid records into output tuples.
///
/// Built once per query against one cuboid, one selection, and one output
/// schema; then applied to many records via
/// [`translate_record`](TupleConverter::translate_record), reusing all
/// precomputed state. Construction reconciles three coordinate spaces: the
/// physical column order of the grid record, the logical selection order, and
/// the caller's output schema.
///
/// A plan instance serves one conversion caller at a time (`&mut self` on the
/// hot path); parallel workers each build their own plan, which is cheap next
/// to the scan itself since dictionaries and lookup tables are shared
/// read-only underneath.
pub struct TupleConverter {
    tuple_info: Arc<TupleInfo>,
    n_selected_dims: usize,
    /// Physical slot in the grid record, per selected position.
    grid_idx: Vec<usize>,
    /// Output-schema slot, `None` when the caller did not request the value.
    output_slot: Vec<Option<usize>>,
    /// Simple measure tag; `None` for dimensions and advanced measures. Kept
    /// at the aligned length so one position indexes all three arrays.
    simple_measures: Vec<Option<Arc<dyn MeasureType>>>,
    derived_fillers: Vec<DerivedFiller>,
    adv_fillers: Vec<Box<dyn AdvancedFiller>>,
    /// Position among the plan's grid values holding each advanced measure's
    /// raw source value.
    adv_value_idx: Vec<usize>,
    scratch: Vec<CellValue>,
}

impl std::fmt::Debug for TupleConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TupleConverter")
            .field("n_selected_dims", &self.n_selected_dims)
            .field("grid_idx", &self.grid_idx)
            .field("output_slot", &self.output_slot)
            .field("adv_value_idx", &self.adv_value_idx)
            .finish_non_exhaustive()
    }
}

impl TupleConverter {
    /// Build the translation plan.
    ///
    /// The selection slices are order-insensitive: the plan normalizes them
    /// to a deterministic iteration order (dimensions by column identity,
    /// measures by name), which becomes the array index order.
    ///
    /// Fails when a selected column or measure is not part of the cuboid,
    /// when an aggregate expression is unknown, or when a needed lookup
    /// table or dictionary is not loaded. Absence from the *output schema*
    /// is never an error; those writes are skipped.
    pub fn new(
        cuboid: &Cuboid,
        selected_dimensions: &[ColumnRef],
        selected_measures: &[MeasureDesc],
        derive_infos: &[DeriveInfo],
        tuple_info: Arc<TupleInfo>,
        segment: &dyn SegmentContext,
        registry: &MeasureTypeRegistry,
    ) -> Result<Self> {
        let mut dims: Vec<&ColumnRef> = selected_dimensions.iter().collect();
        dims.sort();
        let mut measures: Vec<&MeasureDesc> = selected_measures.iter().collect();
        measures.sort_by(|a, b| a.name.cmp(&b.name));

        let n_selected_dims = dims.len();
        let width = dims.len() + measures.len();
        let mut grid_idx = Vec::with_capacity(width);
        let mut output_slot = Vec::with_capacity(width);
        let mut simple_measures: Vec<Option<Arc<dyn MeasureType>>> = vec![None; width];
        let mut adv_fillers: Vec<Box<dyn AdvancedFiller>> = Vec::new();
        let mut adv_value_idx: Vec<usize> = Vec::new();

        for &dim in &dims {
            let gi = cuboid.grid_index_of_column(dim).ok_or_else(|| {
                Error::InvalidArgumentError(format!(
                    "selected dimension {dim} is not part of the cuboid"
                ))
            })?;
            grid_idx.push(gi);
            output_slot.push(tuple_info.column_index(dim));
        }

        for (k, &measure) in measures.iter().enumerate() {
            let pos = n_selected_dims + k;
            let gi = cuboid.grid_index_of_measure(&measure.name).ok_or_else(|| {
                Error::InvalidArgumentError(format!(
                    "selected measure '{}' is not part of the cuboid",
                    measure.name
                ))
            })?;
            grid_idx.push(gi);
            output_slot.push(measure_output_slot(measure, &tuple_info));

            let mtype = registry.resolve(measure)?;
            if mtype.needs_advanced_fill() {
                let dictionaries =
                    load_dictionaries(&mtype.dictionary_columns(measure), segment)?;
                adv_fillers.push(mtype.build_advanced_filler(measure, &tuple_info, &dictionaries)?);
                adv_value_idx.push(pos);
            } else {
                simple_measures[pos] = Some(mtype);
            }
        }

        let mut derived_fillers = Vec::new();
        for info in derive_infos {
            let filler = build_derived_filler(
                info,
                |col| {
                    let gi = cuboid.grid_index_of_column(col)?;
                    grid_idx.iter().position(|&g| g == gi)
                },
                &tuple_info,
                segment,
            )?;
            if let Some(filler) = filler {
                derived_fillers.push(filler);
            }
        }

        debug!(
            dims = n_selected_dims,
            measures = measures.len(),
            derived = derived_fillers.len(),
            advanced = adv_fillers.len(),
            "built translation plan"
        );

        Ok(Self {
            tuple_info,
            n_selected_dims,
            grid_idx,
            output_slot,
            simple_measures,
            derived_fillers,
            adv_fillers,
            adv_value_idx,
            scratch: vec![CellValue::Null; width],
        })
    }

    /// Convert one grid record into the output tuple.
    ///
    /// Returns the plan's advanced fillers, each reloaded with its source
    /// value from this record — an empty slice when the tuple is already
    /// complete. The caller drives the returned fillers to expand the tuple
    /// into one or more final rows, and must finish before the next call
    /// overwrites their reload state.
    pub fn translate_record(
        &mut self,
        record: &GridRecord,
        tuple: &mut Tuple,
    ) -> &mut [Box<dyn AdvancedFiller>] {
        record.copy_cells(&self.grid_idx, &mut self.scratch);

        // dimensions
        for i in 0..self.n_selected_dims {
            if let Some(slot) = self.output_slot[i] {
                tuple.set_dimension_value(slot, self.scratch[i].to_canonical_string());
            }
        }

        // simple measures
        for i in self.n_selected_dims..self.grid_idx.len() {
            if let Some(slot) = self.output_slot[i] {
                if let Some(mtype) = &self.simple_measures[i] {
                    mtype.fill_scalar(tuple, slot, &self.scratch[i]);
                }
            }
        }

        // derived columns
        for filler in &mut self.derived_fillers {
            filler.fill(&self.scratch, tuple);
        }

        // advanced measure filling completes at the caller side because of
        // possible row splits; reload overwrites the previous record's state
        for (filler, &idx) in self.adv_fillers.iter_mut().zip(&self.adv_value_idx) {
            filler.reload(&self.scratch[idx]);
        }
        &mut self.adv_fillers
    }

    pub fn tuple_info(&self) -> &Arc<TupleInfo> {
        &self.tuple_info
    }

    /// Fresh tuple matching this plan's output schema.
    pub fn new_tuple(&self) -> Tuple {
        Tuple::new(Arc::clone(&self.tuple_info))
    }

    pub fn n_selected_dims(&self) -> usize {
        self.n_selected_dims
    }

    /// Width of the plan's index arrays: selected dimensions + measures.
    pub fn plan_width(&self) -> usize {
        self.grid_idx.len()
    }

    /// Physical grid slots consumed by this plan, dimensions first.
    pub fn grid_indexes(&self) -> &[usize] {
        &self.grid_idx
    }

    pub fn has_advanced_fillers(&self) -> bool {
        !self.adv_fillers.is_empty()
    }

    pub fn derived_filler_count(&self) -> usize {
        self.derived_fillers.len()
    }
}

// load only the dictionaries the measure type declares it needs
fn load_dictionaries(
    columns: &[ColumnRef],
    segment: &dyn SegmentContext,
) -> Result<DictionaryMap> {
    let mut map: FxHashMap<ColumnRef, Arc<dyn Dictionary>> = FxHashMap::default();
    for col in columns {
        map.insert(col.clone(), segment.dictionary(col)?);
    }
    Ok(map)
}
