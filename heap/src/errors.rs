use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeapError {
    /// Doubling the slot count would overflow `usize`
    #[error("heap capacity of {capacity} slots cannot be doubled")]
    CapacityOverflow { capacity: usize },

    /// The allocator refused to provide the requested storage
    #[error(transparent)]
    AllocationFailed(#[from] TryReserveError),
}

pub type HeapResult<T> = std::result::Result<T, HeapError>;
