use std::str::FromStr;

use qube_result::Error;

use crate::column::ColumnRef;

/// How a derived column is reconstructed from its host columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeriveKind {
    /// Join the host values against a dimension lookup table.
    Lookup,
    /// Foreign key equals primary key after decoding; the host value is the
    /// derived value.
    PkFk,
}

impl FromStr for DeriveKind {
    type Err = Error;

    /// Parse a derive kind from its catalog string form.
    ///
    /// An unrecognized kind is a fatal configuration error at
    /// plan-construction time, never a runtime condition.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOOKUP" | "lookup" => Ok(DeriveKind::Lookup),
            "PK_FK" | "pk_fk" => Ok(DeriveKind::PkFk),
            other => Err(Error::InvalidArgumentError(format!(
                "unrecognized derive kind '{other}'"
            ))),
        }
    }
}

/// Declaration that a set of host columns functionally determines one or more
/// derived columns that are not physically stored in the cuboid.
#[derive(Clone, Debug)]
pub struct DeriveInfo {
    pub kind: DeriveKind,
    /// Dimension table the derived columns live on; for [`DeriveKind::Lookup`]
    /// this names the lookup table to join against.
    pub join_table: String,
    pub host_columns: Vec<ColumnRef>,
    pub derived_columns: Vec<ColumnRef>,
}

impl DeriveInfo {
    pub fn new(
        kind: DeriveKind,
        join_table: impl Into<String>,
        host_columns: Vec<ColumnRef>,
        derived_columns: Vec<ColumnRef>,
    ) -> Self {
        Self {
            kind,
            join_table: join_table.into(),
            host_columns,
            derived_columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_kinds() {
        assert_eq!("LOOKUP".parse::<DeriveKind>().unwrap(), DeriveKind::Lookup);
        assert_eq!("pk_fk".parse::<DeriveKind>().unwrap(), DeriveKind::PkFk);
    }

    #[test]
    fn unknown_kind_is_fatal() {
        let err = "HIERARCHY".parse::<DeriveKind>().unwrap_err();
        assert!(matches!(err, Error::InvalidArgumentError(_)));
    }
}
