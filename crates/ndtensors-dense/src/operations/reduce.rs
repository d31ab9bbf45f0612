//! Reductions over a whole buffer.

use crate::blas::nrm2;
use crate::scalar::{Scalar, c64};
use crate::storage::Dense;

/// Euclidean norm of the stored values, ignoring any external scale factor.
pub(crate) fn norm<T: Scalar>(d: &Dense<T>) -> f64 {
    nrm2(d.as_slice())
}

/// Sum of all elements, widened to complex. An empty buffer sums to zero.
pub(crate) fn sum_els<T: Scalar>(d: &Dense<T>) -> c64 {
    d.iter().copied().sum::<T>().to_c64()
}
