//! Dictionary and lookup-table services consumed by the conversion layer.
//!
//! The converter treats both as black boxes: a [`Dictionary`] decodes an
//! encoded id back to its string value, a [`LookupTable`] resolves a composite
//! key of host-column values to one dimension-table row. Both are expected to
//! be fully materialized in memory before query execution begins, so lookups
//! are fast local accesses rather than I/O.
//!
//! [`SegmentContext`] is how a plan obtains them for the segment it scans;
//! [`MemSegmentContext`] backs tests and single-process deployments.

pub mod dictionary;
pub mod lookup;
pub mod segment;

pub use dictionary::{Dictionary, MemDictionary};
pub use lookup::LookupTable;
pub use segment::{MemSegmentContext, SegmentContext};
