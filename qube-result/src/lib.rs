//! Error types and result definitions for the qube cube engine.
//!
//! This crate provides the unified error type ([`Error`]) and result alias
//! ([`Result<T>`]) used throughout the qube crates. Fallible operations return
//! `Result<T>` and propagate with the `?` operator; callers that care about a
//! particular failure mode can match on the variant.
//!
//! # Error Categories
//!
//! - **I/O errors** ([`Error::Io`]): filesystem operations during cleanup jobs
//! - **Data format errors** ([`Error::Arrow`]): Arrow batch materialization
//! - **User/config errors** ([`Error::InvalidArgumentError`]): bad selections,
//!   unknown derive kinds or aggregate expressions
//! - **Lookup failures** ([`Error::NotFound`]): missing tables or resources
//! - **Storage-layer failures** ([`Error::Storage`]): clustered-store
//!   connection and table-admin failures, wrapping the underlying cause
//! - **Internal errors** ([`Error::Internal`]): violated invariants

pub mod error;
pub mod result;

pub use error::Error;
pub use result::Result;
