use thiserror::Error;

/// Errors raised by region grid operations and configuration loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegionError {
    /// A chunk already exists in the target slot. Indicates a caller bug
    /// (re-entrant or out-of-order creation), never an expected condition.
    #[error("chunk already exists at ({x}, {y}, {z}) (slot {index})")]
    DuplicateChunk { x: i32, y: i32, z: i32, index: usize },

    #[error("invalid grid config: {0}")]
    InvalidConfig(String),
}
