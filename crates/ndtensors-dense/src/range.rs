//! Multidimensional range iteration.
//!
//! A [`Range`] describes an N-dimensional strided index space (rank,
//! extents, strides). [`RangeIter`] walks every multi-index of a range in
//! column-major order like an odometer: axis 0 turns fastest and carries
//! into axis 1 on overflow, and so on. The linear offset is maintained
//! incrementally, so each step costs O(1) amortized and O(rank) at worst.
//!
//! ```text
//! extents (2, 3), strides (1, 2):
//!   (0,0) -> 0   (1,0) -> 1   (0,1) -> 2   (1,1) -> 3   (0,2) -> 4   (1,2) -> 5   end
//! ```

use std::fmt;

use smallvec::{SmallVec, smallvec};

use crate::strides::{AxisVec, compute_strides};

/// Offset value marking an exhausted iterator.
pub const END_OFFSET: usize = usize::MAX;

/// Multi-index storage, inline up to rank 11.
pub type IndexVec = SmallVec<[usize; 11]>;

/// An N-dimensional strided index space.
pub trait Range {
    fn rank(&self) -> usize;

    fn extent(&self, i: usize) -> usize;

    fn stride(&self, i: usize) -> usize;

    /// Number of multi-indices in the range (1 for rank 0).
    fn area(&self) -> usize {
        (0..self.rank()).map(|i| self.extent(i)).product()
    }
}

/// A range with explicit extents and strides.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DimRange {
    extents: AxisVec,
    strides: AxisVec,
}

impl DimRange {
    /// # Panics
    ///
    /// Panics if `extents` and `strides` differ in length.
    pub fn new(extents: &[usize], strides: &[usize]) -> Self {
        assert_eq!(
            extents.len(),
            strides.len(),
            "extents and strides must have the same length"
        );
        Self {
            extents: extents.into(),
            strides: strides.into(),
        }
    }

    /// Dense column-major range over `extents`.
    pub fn column_major(extents: &[usize]) -> Self {
        Self {
            extents: extents.into(),
            strides: compute_strides(extents),
        }
    }

    /// Copy the extents and strides of any range.
    pub fn from_range<R: Range + ?Sized>(range: &R) -> Self {
        let rank = range.rank();
        Self {
            extents: (0..rank).map(|i| range.extent(i)).collect(),
            strides: (0..rank).map(|i| range.stride(i)).collect(),
        }
    }

    pub fn extents(&self) -> &[usize] {
        &self.extents
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Reorder axes so that axis `i` lands at position `perm[i]`.
    ///
    /// `perm` must be a valid permutation of `0..rank`.
    pub fn permute(&self, perm: &[usize]) -> Self {
        debug_assert_eq!(perm.len(), self.extents.len());
        let mut extents = AxisVec::from_elem(0, perm.len());
        let mut strides = AxisVec::from_elem(0, perm.len());
        for (i, &p) in perm.iter().enumerate() {
            extents[p] = self.extents[i];
            strides[p] = self.strides[i];
        }
        Self { extents, strides }
    }

    /// New range whose axis `i` is axis `order[i]` of this range.
    pub fn select(&self, order: &[usize]) -> Self {
        Self {
            extents: order.iter().map(|&o| self.extents[o]).collect(),
            strides: order.iter().map(|&o| self.strides[o]).collect(),
        }
    }
}

impl Range for DimRange {
    #[inline]
    fn rank(&self) -> usize {
        self.extents.len()
    }

    #[inline]
    fn extent(&self, i: usize) -> usize {
        self.extents[i]
    }

    #[inline]
    fn stride(&self, i: usize) -> usize {
        self.strides[i]
    }
}

/// Odometer iterator over a borrowed [`Range`].
///
/// The iterator cannot outlive its range. Iterators compare by offset only,
/// and may only be compared when built from the same range object.
///
/// # Example
///
/// ```
/// use ndtensors_dense::range::{DimRange, RangeIter};
///
/// let range = DimRange::column_major(&[2, 3]);
/// let offsets: Vec<usize> = RangeIter::new(&range).map(|(_, off)| off).collect();
/// assert_eq!(offsets, vec![0, 1, 2, 3, 4, 5]);
/// ```
#[derive(Clone)]
pub struct RangeIter<'r, R: Range + ?Sized> {
    range: &'r R,
    off: usize,
    ind: IndexVec,
}

impl<'r, R: Range + ?Sized> RangeIter<'r, R> {
    /// Start at the all-zero multi-index.
    ///
    /// A range with a zero extent has no multi-indices and starts exhausted.
    pub fn new(range: &'r R) -> Self {
        let rank = range.rank();
        let empty = (0..rank).any(|i| range.extent(i) == 0);
        Self {
            range,
            off: if empty { END_OFFSET } else { 0 },
            ind: smallvec![0; rank],
        }
    }

    /// The terminal iterator of `range`, for use as a comparison target.
    pub fn end(range: &'r R) -> Self {
        Self {
            range,
            off: END_OFFSET,
            ind: IndexVec::new(),
        }
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.off
    }

    /// Current multi-index.
    #[inline]
    pub fn index(&self) -> &[usize] {
        &self.ind
    }

    /// Current position along axis `n`.
    #[inline]
    pub fn get(&self, n: usize) -> usize {
        self.ind[n]
    }

    /// Rank of the underlying range.
    #[inline]
    pub fn size(&self) -> usize {
        self.ind.len()
    }

    pub fn range(&self) -> &'r R {
        self.range
    }

    #[inline]
    pub fn not_done(&self) -> bool {
        self.off != END_OFFSET
    }

    /// Step to the next multi-index.
    ///
    /// Advancing a rank-0 or exhausted iterator is a usage error, checked in
    /// debug builds only.
    pub fn advance(&mut self) {
        debug_assert!(
            self.range.rank() != 0,
            "can't advance RangeIter made from rank 0 range"
        );
        debug_assert!(self.not_done(), "can't advance an exhausted RangeIter");
        self.increment();
    }

    fn increment(&mut self) {
        let range = self.range;
        let r = range.rank();
        self.ind[0] += 1;
        self.off += range.stride(0);
        if self.ind[0] == range.extent(0) {
            for n in 1..r {
                self.ind[n - 1] = 0;
                self.off -= range.extent(n - 1) * range.stride(n - 1);
                self.ind[n] += 1;
                self.off += range.stride(n);
                if self.ind[n] < range.extent(n) {
                    return;
                }
            }
            self.off = END_OFFSET;
        }
    }
}

impl<R: Range + ?Sized> PartialEq for RangeIter<'_, R> {
    fn eq(&self, other: &Self) -> bool {
        debug_assert!(
            std::ptr::addr_eq(self.range, other.range),
            "can't compare RangeIter created from different range objects"
        );
        self.off == other.off
    }
}

impl<R: Range + ?Sized> Iterator for RangeIter<'_, R> {
    type Item = (IndexVec, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.not_done() {
            return None;
        }
        let item = (self.ind.clone(), self.off);
        if self.ind.is_empty() {
            // Rank 0 has a single state.
            self.off = END_OFFSET;
        } else {
            self.increment();
        }
        Some(item)
    }
}

impl<R: Range + ?Sized> fmt::Display for RangeIter<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>3} (", self.off)?;
        for (j, n) in self.ind.iter().enumerate() {
            if j > 0 {
                write!(f, ",")?;
            }
            write!(f, "{n}")?;
        }
        write!(f, ")")
    }
}

impl<R: Range + ?Sized> fmt::Debug for RangeIter<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeIter")
            .field("offset", &self.off)
            .field("index", &self.ind)
            .finish()
    }
}
