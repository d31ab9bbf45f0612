//! Error types for ndtensors-dense.

use thiserror::Error;

/// Errors that can occur in storage operations.
///
/// Only conditions a caller can trigger through data are reported here.
/// Broken internal contracts (mismatched buffer sizes in an accumulate,
/// misuse of a [`RangeIter`](crate::range::RangeIter)) panic instead.
#[derive(Debug, Error)]
pub enum TensorError {
    /// Shape mismatch between data length and expected size.
    #[error("shape mismatch: expected {expected} elements, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Index out of bounds.
    #[error("index out of bounds: index {index} is out of range for dimension {dim_size}")]
    IndexOutOfBounds { index: usize, dim_size: usize },

    /// Wrong number of indices provided.
    #[error("wrong number of indices: expected {expected}, got {actual}")]
    WrongNumberOfIndices { expected: usize, actual: usize },

    /// Invalid permutation.
    #[error("invalid permutation {perm:?} for tensor with {ndim} dimensions")]
    InvalidPermutation { perm: Vec<usize>, ndim: usize },

    /// A requested result index belongs to neither operand.
    #[error("index {index} not found in either operand")]
    IndexNotFound { index: String },

    /// The same index appears twice in one index set.
    #[error("duplicate index {index} in index set")]
    DuplicateIndex { index: String },

    /// A serialized storage tag is not known.
    #[error("unknown storage type tag {tag}")]
    UnknownStorageType { tag: u8 },

    /// Writing formatted output failed.
    #[error("formatting error")]
    Format(#[from] std::fmt::Error),

    /// Reading or writing serialized storage failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
