//! qube: result materialization for a multidimensional cube engine.
//!
//! This crate is the primary entrypoint for the qube toolkit. It re-exports
//! the record-to-tuple conversion engine and its supporting services from the
//! underlying `qube-*` crates, providing a unified API surface.
//!
//! # Quick Start
//!
//! Build a translation plan once, then convert records against it:
//!
//! ```rust
//! use std::sync::Arc;
//! use qube::{
//!     CellValue, ColumnRef, Cuboid, GridRecord, MeasureTypeRegistry, MemSegmentContext,
//!     TupleConverter, TupleInfo,
//! };
//!
//! let country = ColumnRef::utf8("SALES", "COUNTRY_CODE", 0);
//! let cuboid = Cuboid::new(vec![country.clone()], vec![]);
//!
//! let mut info = TupleInfo::new();
//! info.add_column(&country);
//! let info = Arc::new(info);
//!
//! let mut converter = TupleConverter::new(
//!     &cuboid,
//!     &[country],
//!     &[],
//!     &[],
//!     Arc::clone(&info),
//!     &MemSegmentContext::new(),
//!     &MeasureTypeRegistry::default(),
//! )
//! .unwrap();
//!
//! let mut tuple = converter.new_tuple();
//! let record = GridRecord::new(vec![CellValue::from("US")]);
//! let pending = converter.translate_record(&record, &mut tuple);
//! assert!(pending.is_empty());
//! assert_eq!(tuple.value(0), &CellValue::from("US"));
//! ```
//!
//! # Architecture
//!
//! qube is organized as a layered workspace:
//!
//! - **Conversion** (`qube-convert`): translation plans, measure types,
//!   derived-column fillers, Arrow batch materialization.
//! - **Model** (`qube-model`): cuboids, grid records, output schemas, tuples.
//! - **Dictionaries** (`qube-dict`): dictionary decode and lookup tables.
//! - **Storage admin** (`qube-storage`): clustered-store table lifecycle and
//!   the process-scoped connection pool.
//! - **Jobs** (`qube-job`): post-build cleanup of obsolete resources.

pub use qube_convert::{
    AdvancedFiller, BasicMeasure, MeasureType, MeasureTypeRegistry, TopNMeasure,
    TupleBatchBuilder, TupleConverter,
};
pub use qube_dict::{Dictionary, LookupTable, MemDictionary, MemSegmentContext, SegmentContext};
pub use qube_model::{
    CellValue, ColumnRef, Cuboid, DeriveInfo, DeriveKind, GridRecord, MeasureDesc, Tuple,
    TupleInfo,
};
pub use qube_result::{Error, Result};

pub mod storage {
    //! Administrative storage interface: store clients and the URL-keyed
    //! connection pool.

    pub use qube_storage::{
        create_table_if_needed, drop_table_if_exists, MemStoreClient, RetryOptions, StoreClient,
        StorePool, TableDescriptor, TABLE_OWNER_TAG, TABLE_UUID_TAG,
    };
}

pub mod job {
    //! Cleanup step for obsolete build artifacts.

    pub use qube_job::{CleanupContext, CleanupStep, StepOutcome, StepState};
}
