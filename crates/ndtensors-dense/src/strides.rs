//! Stride and permutation utilities.
//!
//! Uses column-major (Fortran) order: axis 0 is the fastest-varying axis.

use smallvec::SmallVec;

use crate::error::TensorError;

/// Per-axis array, stored inline for common ranks.
pub type AxisVec = SmallVec<[usize; 8]>;

/// Compute column-major strides from shape.
///
/// For shape [d0, d1, d2, ...], returns strides [1, d0, d0*d1, ...].
///
/// # Examples
///
/// ```
/// use ndtensors_dense::strides::compute_strides;
///
/// assert_eq!(compute_strides(&[3, 4, 5]).as_slice(), &[1, 3, 12]);
/// assert!(compute_strides(&[]).is_empty());
/// ```
pub fn compute_strides(shape: &[usize]) -> AxisVec {
    let mut strides = AxisVec::with_capacity(shape.len());
    let mut stride = 1;
    for &dim in shape {
        strides.push(stride);
        stride *= dim;
    }
    strides
}

/// Number of elements spanned by `shape` (1 for rank 0).
#[inline]
pub fn area(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Convert cartesian indices to a linear offset.
#[inline]
pub fn cartesian_to_linear(indices: &[usize], strides: &[usize]) -> usize {
    indices
        .iter()
        .zip(strides.iter())
        .map(|(&idx, &stride)| idx * stride)
        .sum()
}

/// Convert a column-major linear offset back to cartesian indices.
pub fn linear_to_cartesian(mut linear: usize, shape: &[usize]) -> AxisVec {
    let mut indices = AxisVec::with_capacity(shape.len());
    for &dim in shape {
        indices.push(linear % dim);
        linear /= dim;
    }
    indices
}

/// Check that `perm` is a permutation of `0..ndim`.
pub fn validate_permutation(perm: &[usize], ndim: usize) -> Result<(), TensorError> {
    let invalid = || TensorError::InvalidPermutation {
        perm: perm.to_vec(),
        ndim,
    };
    if perm.len() != ndim {
        return Err(invalid());
    }
    let mut seen: SmallVec<[bool; 8]> = SmallVec::from_elem(false, ndim);
    for &p in perm {
        if p >= ndim || seen[p] {
            return Err(invalid());
        }
        seen[p] = true;
    }
    Ok(())
}

/// Whether `perm` maps every axis to itself.
#[inline]
pub fn is_trivial(perm: &[usize]) -> bool {
    perm.iter().enumerate().all(|(i, &p)| i == p)
}
