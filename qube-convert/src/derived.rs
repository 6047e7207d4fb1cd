use std::sync::Arc;

use qube_dict::{LookupTable, SegmentContext};
use qube_model::{CellValue, ColumnRef, DeriveInfo, DeriveKind, Tuple, TupleInfo};
use qube_result::Result;

/// Filler for one host-group → derived-columns relationship, bound to index
/// arrays precomputed at plan-construction time.
///
/// Two resolution strategies, dispatched statically:
///
/// - `Lookup` joins the host values against a dimension lookup table and
///   copies each requested derived value out of the matched row; a miss
///   degrades to nulls.
/// - `Identity` is the zero-cost shortcut for FK = PK after decoding: the
///   host value is copied verbatim into the single derived slot.
pub(crate) enum DerivedFiller {
    Lookup {
        host_value_idx: Vec<usize>,
        derived_slots: Vec<Option<usize>>,
        derived_offsets: Vec<usize>,
        table: Arc<LookupTable>,
        key: Vec<String>,
    },
    Identity {
        host_value_idx: usize,
        derived_slot: usize,
    },
}

impl DerivedFiller {
    pub(crate) fn fill(&mut self, grid_values: &[CellValue], tuple: &mut Tuple) {
        match self {
            DerivedFiller::Lookup {
                host_value_idx,
                derived_slots,
                derived_offsets,
                table,
                key,
            } => {
                for (part, &idx) in key.iter_mut().zip(host_value_idx.iter()) {
                    *part = grid_values[idx].to_canonical_string().unwrap_or_default();
                }
                match table.row(key) {
                    Some(row) => {
                        for (i, slot) in derived_slots.iter().enumerate() {
                            if let Some(slot) = *slot {
                                let value = row.get(derived_offsets[i]).cloned();
                                tuple.set_dimension_value(slot, value);
                            }
                        }
                    }
                    None => {
                        // missing foreign-key rows degrade to nulls
                        for slot in derived_slots.iter().flatten() {
                            tuple.set_dimension_value(*slot, None);
                        }
                    }
                }
            }
            DerivedFiller::Identity {
                host_value_idx,
                derived_slot,
            } => {
                tuple.set_dimension_value(
                    *derived_slot,
                    grid_values[*host_value_idx].to_canonical_string(),
                );
            }
        }
    }
}

/// Build the filler for one derive declaration, or `None` when the group is
/// not applicable to this plan.
///
/// A group is dropped when any host column is missing from the plan's
/// selected grid values (cannot derive without its inputs) or when no derived
/// column has a valid output slot (nothing to write).
pub(crate) fn build_derived_filler(
    info: &DeriveInfo,
    locate: impl Fn(&ColumnRef) -> Option<usize>,
    tuple_info: &TupleInfo,
    segment: &dyn SegmentContext,
) -> Result<Option<DerivedFiller>> {
    let mut host_value_idx = Vec::with_capacity(info.host_columns.len());
    for host in &info.host_columns {
        match locate(host) {
            Some(idx) => host_value_idx.push(idx),
            None => return Ok(None),
        }
    }

    let derived_slots: Vec<Option<usize>> = info
        .derived_columns
        .iter()
        .map(|col| tuple_info.column_index(col))
        .collect();
    if derived_slots.iter().all(Option::is_none) {
        return Ok(None);
    }

    match info.kind {
        DeriveKind::Lookup => {
            let table = segment.lookup_table(&info.join_table)?;
            // a derived column's offset inside the lookup row is its
            // zero-based position within its table
            let derived_offsets = info.derived_columns.iter().map(|col| col.index).collect();
            let key = vec![String::new(); host_value_idx.len()];
            Ok(Some(DerivedFiller::Lookup {
                host_value_idx,
                derived_slots,
                derived_offsets,
                table,
                key,
            }))
        }
        DeriveKind::PkFk => {
            // composite keys are pre-split upstream into single-column
            // relationships, so only the first derived column is considered
            match derived_slots[0] {
                Some(derived_slot) => Ok(Some(DerivedFiller::Identity {
                    host_value_idx: host_value_idx[0],
                    derived_slot,
                })),
                None => Ok(None),
            }
        }
    }
}
