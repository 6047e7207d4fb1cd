//! Administrative interface to the clustered key-value store that holds
//! materialized cube tables.
//!
//! This layer is a thin wrapper over table lifecycle management: checking
//! existence, creating a table with its column families, and dropping it.
//! [`StoreClient`] abstracts the store's client connection; [`StorePool`] is
//! the process-scoped connection cache keyed by storage URL, with the
//! fixed-pause reconnect loop the cube jobs rely on. The pool is explicit
//! state owned by the process entry point and torn down with
//! [`StorePool::shutdown`], not an implicit global, so the core stays
//! testable in isolation.
//!
//! Query execution never goes through this crate; scans talk to the store
//! through their own read path.

pub mod admin;
pub mod client;
pub mod mem_client;
pub mod pool;

pub use admin::{create_table_if_needed, drop_table_if_exists};
pub use client::{RetryOptions, StoreClient, TableDescriptor, TABLE_OWNER_TAG, TABLE_UUID_TAG};
pub use mem_client::MemStoreClient;
pub use pool::StorePool;
