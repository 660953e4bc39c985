use thiserror::Error;

/// Errors surfaced by pool and region operations.
///
/// Every mutating operation that can return an error leaves its region in the
/// prior valid state; callers must treat a failed mutation as "region
/// unchanged" and never assume partial progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegionError {
    /// The platform allocator could not satisfy a pool allocation or growth
    /// request.
    #[error("rectangle pool allocation failed")]
    OutOfMemory,

    /// A fixed-capacity pool has no free slot left.
    #[error("rectangle pool exhausted (capacity {capacity})")]
    PoolExhausted { capacity: usize },

    /// A region was used with a pool it is not bound to.
    #[error("region is not bound to this pool")]
    InvalidRegion,
}

pub type Result<T> = std::result::Result<T, RegionError>;
