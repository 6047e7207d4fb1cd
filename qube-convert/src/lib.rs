//! Record-to-tuple conversion engine: the result-materialization core.
//!
//! Given a cuboid, the query's selected dimensions and measures, and the
//! caller's output schema, [`TupleConverter`] builds a reusable translation
//! plan once, then applies it per matching grid record with minimal overhead.
//! The plan precomputes, for every selected position, the record's physical
//! slot, the output-schema slot, and a simple measure tag; derived dimensions
//! are reconstructed by per-group fillers (lookup join or identity shortcut);
//! measures that need dictionary context or row splitting go through the
//! advanced filler reload/expand protocol.
//!
//! Construction runs once per query plan; `translate_record` is the
//! performance-critical per-record path and allocates nothing.

pub mod batch;
pub mod converter;
pub mod derived;
pub mod measure;

pub use batch::TupleBatchBuilder;
pub use converter::TupleConverter;
pub use measure::{
    AdvancedFiller, BasicMeasure, DictionaryMap, MeasureType, MeasureTypeRegistry, TopNMeasure,
};
