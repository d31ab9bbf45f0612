//! Single-element access.

use crate::error::TensorError;
use crate::index::IndexSet;
use crate::scalar::{Scalar, c64};
use crate::storage::{Dense, ManageStore};
use crate::task::{GetElt, SetElt};

/// Offset of a multi-index, checked against both the index set and the buffer.
fn element_offset(is: &IndexSet, inds: &[usize], len: usize) -> Result<usize, TensorError> {
    let off = is.checked_offset(inds)?;
    if off >= len {
        return Err(TensorError::ShapeMismatch {
            expected: is.area(),
            actual: len,
        });
    }
    Ok(off)
}

pub(crate) fn get_elt<T: Scalar>(g: &GetElt<'_>, d: &Dense<T>) -> Result<c64, TensorError> {
    let off = element_offset(g.is, g.inds, d.len())?;
    Ok(d[off].to_c64())
}

/// Write `value` in place; the element type already matches the buffer.
pub(crate) fn set_elt<T: Scalar>(
    is: &IndexSet,
    inds: &[usize],
    value: T,
    d: &mut Dense<T>,
) -> Result<(), TensorError> {
    let off = element_offset(is, inds, d.len())?;
    d[off] = value;
    Ok(())
}

/// Complex element into real storage: copy the buffer as complex, then write.
pub(crate) fn set_cplx_promote(
    s: &SetElt<'_, c64>,
    m: &mut ManageStore<'_>,
) -> Result<(), TensorError> {
    let off = element_offset(s.is, s.inds, m.current().len())?;
    let promoted = m.current().to_cplx().into_owned();
    let nd = m.make_new_cplx(promoted);
    nd[off] = s.elt;
    Ok(())
}
