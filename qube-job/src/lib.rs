//! Job-orchestration cleanup for the cube build pipeline.
//!
//! After a cube build or merge completes, the intermediate artifacts of the
//! superseded segments become garbage: old cube tables in the clustered
//! store, the staging table the build read from, and working directories on
//! the filesystem. [`CleanupStep`] deletes them sequentially, appending one
//! human-readable transcript line per resource, and reports a
//! [`StepOutcome`] the job scheduler records verbatim.

pub mod cleanup;

pub use cleanup::{CleanupContext, CleanupStep, StepOutcome, StepState};
