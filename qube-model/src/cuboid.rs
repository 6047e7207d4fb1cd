use rustc_hash::FxHashMap;

use crate::column::ColumnRef;

/// One pre-aggregated cuboid: an ordered list of dimension columns followed by
/// the cube's measures, materialized together in one physical record layout.
///
/// The physical layout places dimensions first, then measures, so the grid
/// slot of measure `k` is `dimensions.len() + k`. Immutable after creation;
/// owned by the query plan for its lifetime.
#[derive(Clone, Debug)]
pub struct Cuboid {
    dimensions: Vec<ColumnRef>,
    measures: Vec<String>,
    dim_slots: FxHashMap<ColumnRef, usize>,
    measure_slots: FxHashMap<String, usize>,
}

impl Cuboid {
    pub fn new(dimensions: Vec<ColumnRef>, measures: Vec<String>) -> Self {
        let dim_slots = dimensions
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        let n_dims = dimensions.len();
        let measure_slots = measures
            .iter()
            .enumerate()
            .map(|(i, m)| (m.clone(), n_dims + i))
            .collect();
        Self {
            dimensions,
            measures,
            dim_slots,
            measure_slots,
        }
    }

    pub fn dimensions(&self) -> &[ColumnRef] {
        &self.dimensions
    }

    pub fn measures(&self) -> &[String] {
        &self.measures
    }

    /// Total width of one grid record for this cuboid.
    pub fn grid_width(&self) -> usize {
        self.dimensions.len() + self.measures.len()
    }

    /// Physical slot of a dimension column, `None` if the column is not part
    /// of this cuboid.
    pub fn grid_index_of_column(&self, col: &ColumnRef) -> Option<usize> {
        self.dim_slots.get(col).copied()
    }

    /// Physical slot of a measure, identified by measure name.
    pub fn grid_index_of_measure(&self, name: &str) -> Option<usize> {
        self.measure_slots.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_follow_dimensions() {
        let cuboid = Cuboid::new(
            vec![
                ColumnRef::utf8("SALES", "PART_DT", 0),
                ColumnRef::utf8("SALES", "LEAF_CATEG_ID", 1),
            ],
            vec!["GMV_SUM".to_string(), "TRANS_CNT".to_string()],
        );
        assert_eq!(cuboid.grid_width(), 4);
        assert_eq!(
            cuboid.grid_index_of_column(&ColumnRef::utf8("SALES", "LEAF_CATEG_ID", 1)),
            Some(1)
        );
        assert_eq!(cuboid.grid_index_of_measure("GMV_SUM"), Some(2));
        assert_eq!(cuboid.grid_index_of_measure("TRANS_CNT"), Some(3));
        assert_eq!(cuboid.grid_index_of_measure("MISSING"), None);
    }
}
