//! Level-1 vector kernels over contiguous slices.

use crate::scalar::Scalar;

/// `x *= alpha`
#[inline]
pub fn scal<T: Scalar>(alpha: T, x: &mut [T]) {
    for v in x.iter_mut() {
        *v *= alpha;
    }
}

/// `y += alpha * x`
///
/// # Panics
///
/// Panics if `x` and `y` differ in length.
pub fn axpy<T: Scalar>(alpha: T, x: &[T], y: &mut [T]) {
    assert_eq!(x.len(), y.len(), "axpy requires slices of equal length");
    for (yi, &xi) in y.iter_mut().zip(x) {
        *yi += alpha * xi;
    }
}

/// Euclidean norm `sqrt(sum |x_i|^2)`.
///
/// Accumulates with a running scale so that intermediate squares neither
/// overflow nor underflow.
///
/// ```
/// use ndtensors_dense::blas::nrm2;
///
/// assert_eq!(nrm2(&[3.0, 4.0]), 5.0);
/// assert_eq!(nrm2::<f64>(&[]), 0.0);
/// ```
pub fn nrm2<T: Scalar>(x: &[T]) -> f64 {
    let mut scale = 0.0_f64;
    let mut ssq = 1.0_f64;
    let mut accumulate = |c: f64| {
        if c != 0.0 {
            let absc = c.abs();
            if scale < absc {
                ssq = 1.0 + ssq * (scale / absc) * (scale / absc);
                scale = absc;
            } else {
                ssq += (absc / scale) * (absc / scale);
            }
        }
    };
    for &v in x {
        accumulate(v.real_part());
        if T::IS_COMPLEX {
            accumulate(v.imag_part());
        }
    }
    scale * ssq.sqrt()
}
