use std::fmt;

/// One decoded scalar value from a grid record or inside an output tuple.
///
/// Grid records arrive already dictionary-decoded, so the converter only ever
/// sees plain scalars. Dimension cells are written in canonical string form;
/// measure cells keep their numeric shape.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Canonical string form used for dimension cells and lookup keys.
    ///
    /// `Null` has no canonical form and maps to `None`, which downstream
    /// writers render as an absent dimension value.
    pub fn to_canonical_string(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Integer(v) => Some(v.to_string()),
            CellValue::Float(v) => Some(v.to_string()),
            CellValue::Text(v) => Some(v.clone()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "NULL"),
            CellValue::Integer(v) => write!(f, "{v}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Integer(value as i64)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_string_form() {
        assert_eq!(CellValue::Null.to_canonical_string(), None);
        assert_eq!(
            CellValue::Integer(42).to_canonical_string().as_deref(),
            Some("42")
        );
        assert_eq!(
            CellValue::from("US").to_canonical_string().as_deref(),
            Some("US")
        );
    }
}
