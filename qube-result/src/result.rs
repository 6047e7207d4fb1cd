use crate::error::Error;

/// Result alias used across the qube crates.
pub type Result<T> = std::result::Result<T, Error>;
