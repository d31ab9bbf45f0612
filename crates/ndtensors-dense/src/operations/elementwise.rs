//! Whole-buffer element-wise operations.

use crate::blas::scal;
use crate::scalar::{Scalar, c64};
use crate::storage::{Dense, ManageStore};

/// Overwrite every element with `value`.
pub(crate) fn fill<T: Scalar>(value: T, d: &mut Dense<T>) {
    d.as_mut_slice().fill(value);
}

/// Complex fill of real storage: a fresh complex buffer of the same length.
pub(crate) fn fill_cplx_promote(z: c64, m: &mut ManageStore<'_>) {
    let len = m.current().len();
    m.make_new_cplx(Dense::filled(len, z));
}

/// Scale every element by `value`.
pub(crate) fn mult<T: Scalar>(value: T, d: &mut Dense<T>) {
    scal(value, d.as_mut_slice());
}

/// Complex scaling of real storage: copy as complex, then scale.
pub(crate) fn mult_cplx_promote(z: c64, m: &mut ManageStore<'_>) {
    let promoted = m.current().to_cplx().into_owned();
    let nd = m.make_new_cplx(promoted);
    mult(z, nd);
}

pub(crate) fn conj(d: &mut Dense<c64>) {
    for z in d.as_mut_slice() {
        *z = z.conjugate();
    }
}

/// Replace the slot with the real parts of its data.
pub(crate) fn take_real(m: &mut ManageStore<'_>) {
    let re = m.current().to_cplx().real_parts();
    m.make_new_real(re);
}

/// Replace the slot with the imaginary parts of its data.
pub(crate) fn take_imag(m: &mut ManageStore<'_>) {
    let im = m.current().to_cplx().imag_parts();
    m.make_new_real(im);
}
