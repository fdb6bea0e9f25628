use super::{BorderMode, SliceSpec};

/// The type of error for array operations.
///
/// Every variant describes a caller contract violation. Nothing is mutated
/// when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("dimensions {dims:?} have no resolved size")]
    UnresolvedExtent { dims: Vec<usize> },

    #[error("storage order {order:?} is not a permutation of 0..{}", .order.len())]
    InvalidOrder { order: Vec<usize> },

    #[error("dimension {dim} is fixed at size {fixed}, cannot resize it to {requested}")]
    FixedExtent { dim: usize, fixed: usize, requested: usize },

    #[error("nested literal has depth {got}, expected {expected}")]
    LiteralDepth { expected: usize, got: usize },

    #[error("nested literal has {got} entries in dimension {dim}, expected {expected}")]
    LiteralShape { dim: usize, expected: usize, got: usize },

    #[error("coordinate {coord:?} is out of bounds for sizes {sizes:?}")]
    OutOfBounds { coord: Vec<isize>, sizes: Vec<usize> },

    #[error("slice {spec:?} does not fit dimension {dim} of size {size}")]
    InvalidSlice { dim: usize, spec: SliceSpec, size: usize },

    #[error("border mode {mode:?} is not supported")]
    UnsupportedBorderMode { mode: BorderMode },
}

/// Convenience alias used throughout this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
