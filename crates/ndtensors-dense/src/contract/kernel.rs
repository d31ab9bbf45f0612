//! Generic strided contraction loop.
//!
//! Handles every labeled product: ordinary contraction, outer products and
//! non-commutative products where a shared label survives into the output.
//! The loop walks one odometer over all distinct labels; labels absent from
//! the output are summed.

use crate::contract::labels::Labels;
use crate::range::{DimRange, RangeIter};
use crate::scalar::Scalar;
use crate::strides::{AxisVec, cartesian_to_linear};
use crate::view::{TensorRef, TensorRefMut};

/// Accumulate `C[lc] += A[la] * B[lb]` over every label assignment.
///
/// `c` is expected to hold zeros on entry. Every label of `lc` must occur
/// in `la` or `lb`.
pub fn contract_into<T: Scalar>(
    a: &TensorRef<'_, T>,
    la: &[i32],
    b: &TensorRef<'_, T>,
    lb: &[i32],
    c: &mut TensorRefMut<'_, T>,
    lc: &[i32],
) {
    // Output labels first, so the odometer writes C in its own order.
    let mut labels: Labels = lc.iter().copied().collect();
    for &l in la.iter().chain(lb) {
        if !labels.contains(&l) {
            labels.push(l);
        }
    }

    let n = labels.len();
    let mut extents = AxisVec::from_elem(0, n);
    let mut sa = AxisVec::from_elem(0, n);
    let mut sb = AxisVec::from_elem(0, n);
    let mut sc = AxisVec::from_elem(0, n);
    for (k, l) in labels.iter().enumerate() {
        if let Some(i) = la.iter().position(|x| x == l) {
            extents[k] = a.range().extents()[i];
            sa[k] = a.range().strides()[i];
        }
        if let Some(j) = lb.iter().position(|x| x == l) {
            extents[k] = b.range().extents()[j];
            sb[k] = b.range().strides()[j];
        }
        if let Some(o) = lc.iter().position(|x| x == l) {
            sc[k] = c.range().strides()[o];
        }
    }

    let walk = DimRange::new(&extents, &sc);
    let (adata, bdata) = (a.data(), b.data());
    let cdata = c.data_mut();
    for (ind, off) in RangeIter::new(&walk) {
        let ao = cartesian_to_linear(&ind, &sa);
        let bo = cartesian_to_linear(&ind, &sb);
        cdata[off] += adata[ao] * bdata[bo];
    }
}
