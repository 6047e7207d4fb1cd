use crate::column::ColumnRef;

/// A requested aggregate function and how its result is stored.
///
/// The `name` identifies the measure inside the cuboid layout. The
/// `expression` names the aggregate (SUM, COUNT, MIN, MAX, TOP_N, ...) and is
/// what the converter resolves to a measure-type capability.
///
/// A measure with a `rewrite_field` reads a pre-aggregated storage field and
/// resolves its output position by that field name; a pass-through measure
/// (no rewrite) reads a raw dimension as a metric and resolves its output
/// position by its first parameter column, like a dimension would.
#[derive(Clone, Debug)]
pub struct MeasureDesc {
    pub name: String,
    pub expression: String,
    pub parameters: Vec<ColumnRef>,
    pub rewrite_field: Option<String>,
}

impl MeasureDesc {
    pub fn new(
        name: impl Into<String>,
        expression: impl Into<String>,
        parameters: Vec<ColumnRef>,
    ) -> Self {
        Self {
            name: name.into(),
            expression: expression.into(),
            parameters,
            rewrite_field: None,
        }
    }

    pub fn with_rewrite_field(mut self, field: impl Into<String>) -> Self {
        self.rewrite_field = Some(field.into());
        self
    }

    #[inline]
    pub fn needs_rewrite(&self) -> bool {
        self.rewrite_field.is_some()
    }
}
