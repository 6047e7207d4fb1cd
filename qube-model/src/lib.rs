//! Metadata and data model shared across the qube crates.
//!
//! These types sit at the bottom of the stack so they can be reused without
//! depending on the conversion or storage crates:
//!
//! - [`ColumnRef`]: identity of a table column, carrying its Arrow data type.
//! - [`CellValue`] / [`GridRecord`]: decoded scalar values and the read-only
//!   physical record layout they arrive in.
//! - [`Cuboid`]: the ordered dimension/measure layout of one materialized
//!   cuboid, with O(1) column-to-physical-slot mapping.
//! - [`DeriveInfo`]: declaration that host columns determine derived columns.
//! - [`MeasureDesc`]: a requested aggregate and how it is stored.
//! - [`TupleInfo`] / [`Tuple`]: the caller's output schema and the mutable
//!   output row written by the converter.

pub mod column;
pub mod cuboid;
pub mod derive;
pub mod measure;
pub mod record;
pub mod tuple;
pub mod value;

pub use column::ColumnRef;
pub use cuboid::Cuboid;
pub use derive::{DeriveInfo, DeriveKind};
pub use measure::MeasureDesc;
pub use record::GridRecord;
pub use tuple::{Tuple, TupleInfo};
pub use value::CellValue;
