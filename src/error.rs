//! Error types for the editing core.

use thiserror::Error;

/// Failures that can occur while creating or growing a gap buffer.
///
/// Boundary conditions (start/end of text, first/last line) are never
/// reported here; the editing operations treat them as no-ops.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// A buffer was requested with zero bytes of storage.
    #[error("gap buffer capacity must be greater than zero")]
    ZeroCapacity,

    /// Doubling the storage would overflow `usize`.
    #[error("gap buffer capacity {capacity} cannot be doubled")]
    CapacityOverflow { capacity: usize },

    /// The allocator could not provide the requested storage.
    #[error("failed to allocate {requested} bytes for gap buffer")]
    Allocation { requested: usize },
}

/// Result alias for buffer operations.
pub type Result<T> = std::result::Result<T, BufferError>;
