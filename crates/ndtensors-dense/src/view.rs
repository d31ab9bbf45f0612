//! Strided views over storage buffers.
//!
//! A view pairs a flat slice with a [`DimRange`] that maps multi-indices to
//! offsets. Views never own data; permuting a view only reorders its
//! extents and strides.

use crate::index::IndexSet;
use crate::range::{DimRange, Range, RangeIter};
use crate::strides::cartesian_to_linear;

/// Read-only strided view.
#[derive(Debug, Clone)]
pub struct TensorRef<'a, T> {
    data: &'a [T],
    range: DimRange,
}

/// Mutable strided view.
#[derive(Debug)]
pub struct TensorRefMut<'a, T> {
    data: &'a mut [T],
    range: DimRange,
}

/// View `data` with the shape and strides of `is`.
pub fn make_ten_ref<'a, T: Copy>(data: &'a [T], is: &IndexSet) -> TensorRef<'a, T> {
    TensorRef::new(data, DimRange::from_range(is))
}

/// Mutable view of `data` with the shape and strides of `is`.
pub fn make_ten_ref_mut<'a, T>(data: &'a mut [T], is: &IndexSet) -> TensorRefMut<'a, T> {
    TensorRefMut::new(data, DimRange::from_range(is))
}

impl<'a, T: Copy> TensorRef<'a, T> {
    pub fn new(data: &'a [T], range: DimRange) -> Self {
        debug_assert!(
            range.area() == 0 || max_offset(&range) < data.len(),
            "view range exceeds buffer of length {}",
            data.len()
        );
        Self { data, range }
    }

    pub fn range(&self) -> &DimRange {
        &self.range
    }

    pub fn data(&self) -> &'a [T] {
        self.data
    }

    /// Element at a multi-index.
    pub fn get(&self, inds: &[usize]) -> T {
        self.data[cartesian_to_linear(inds, self.range.strides())]
    }

    /// Reorder axes so that axis `i` becomes axis `perm[i]`.
    pub fn permute(self, perm: &[usize]) -> Self {
        Self {
            data: self.data,
            range: self.range.permute(perm),
        }
    }

    /// New view whose axis `i` is axis `order[i]` of this view.
    pub fn select(self, order: &[usize]) -> Self {
        Self {
            data: self.data,
            range: self.range.select(order),
        }
    }

    /// Copy the viewed elements into a dense column-major vector.
    pub fn to_vec(&self) -> Vec<T> {
        RangeIter::new(&self.range)
            .map(|(_, off)| self.data[off])
            .collect()
    }
}

impl<'a, T> TensorRefMut<'a, T> {
    pub fn new(data: &'a mut [T], range: DimRange) -> Self {
        debug_assert!(
            range.area() == 0 || max_offset(&range) < data.len(),
            "view range exceeds buffer of length {}",
            data.len()
        );
        Self { data, range }
    }

    pub fn range(&self) -> &DimRange {
        &self.range
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        self.data
    }
}

/// Largest offset reachable by a non-empty range.
fn max_offset(range: &DimRange) -> usize {
    range
        .extents()
        .iter()
        .zip(range.strides())
        .map(|(&e, &s)| (e - 1) * s)
        .sum()
}

/// Apply `f(src_elem, &mut dest_elem)` over matching multi-indices.
///
/// Both views must have identical extents. The walk follows `dest`'s axis
/// order; source offsets are computed from the same multi-index.
pub fn transform<S, D, F>(src: &TensorRef<'_, S>, dest: &mut TensorRefMut<'_, D>, mut f: F)
where
    S: Copy,
    F: FnMut(S, &mut D),
{
    debug_assert_eq!(
        src.range.extents(),
        dest.range.extents(),
        "transform requires views with identical extents"
    );
    let src_strides = src.range.strides();
    for (ind, off) in RangeIter::new(&dest.range) {
        let soff = cartesian_to_linear(&ind, src_strides);
        f(src.data[soff], &mut dest.data[off]);
    }
}
