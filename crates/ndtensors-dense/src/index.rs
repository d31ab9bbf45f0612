//! Indices and index sets.
//!
//! An [`Index`] is a tensor axis with an extent and a stable identity. Two
//! operands share an axis exactly when they hold indices with the same
//! [`IndexId`]; tags and extents play no part in matching.
//!
//! An [`IndexSet`] is the ordered axis collection of one tensor. It caches
//! column-major strides so that multi-index to offset mapping is a dot
//! product.

use std::fmt;
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

use crate::error::TensorError;
use crate::range::Range;
use crate::strides::{AxisVec, area, compute_strides};

/// Stable identity of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexId(pub u64);

impl IndexId {
    /// Draw a fresh random identity.
    pub fn generate() -> Self {
        IndexId(rand::random())
    }
}

/// A tensor axis: identity, extent and an optional human-readable tag.
///
/// Equality and hashing compare the identity only.
#[derive(Debug, Clone)]
pub struct Index {
    id: IndexId,
    dim: usize,
    tag: Option<String>,
}

impl Index {
    /// Create an index with a fresh identity.
    ///
    /// # Example
    ///
    /// ```
    /// use ndtensors_dense::Index;
    ///
    /// let i = Index::new(3);
    /// let j = Index::new(3);
    /// assert_eq!(i.dim(), 3);
    /// assert_ne!(i, j);
    /// assert_eq!(i, i.clone());
    /// ```
    pub fn new(dim: usize) -> Self {
        Self::with_id(IndexId::generate(), dim)
    }

    /// Create an index with a fresh identity and a tag.
    pub fn with_tag(dim: usize, tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Self::new(dim)
        }
    }

    /// Create an index with an explicit identity.
    pub fn with_id(id: IndexId, dim: usize) -> Self {
        Self { id, dim, tag: None }
    }

    #[inline]
    pub fn id(&self) -> IndexId {
        self.id
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}

impl PartialEq for Index {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Index {}

impl Hash for Index {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "(dim={}|id={}|\"{}\")", self.dim, self.id.0 % 1000, tag),
            None => write!(f, "(dim={}|id={})", self.dim, self.id.0 % 1000),
        }
    }
}

/// Ordered collection of distinct indices with column-major strides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexSet {
    inds: SmallVec<[Index; 8]>,
    strides: AxisVec,
}

impl IndexSet {
    /// Build an index set, rejecting repeated identities.
    ///
    /// # Example
    ///
    /// ```
    /// use ndtensors_dense::{Index, IndexSet};
    ///
    /// let i = Index::new(2);
    /// let j = Index::new(3);
    /// let is = IndexSet::new([i.clone(), j]).unwrap();
    /// assert_eq!(is.rank(), 2);
    /// assert_eq!(is.area(), 6);
    /// assert_eq!(is.offset(&[1, 2]), 5);
    ///
    /// assert!(IndexSet::new([i.clone(), i]).is_err());
    /// ```
    pub fn new(inds: impl IntoIterator<Item = Index>) -> Result<Self, TensorError> {
        let inds: SmallVec<[Index; 8]> = inds.into_iter().collect();
        for (n, i) in inds.iter().enumerate() {
            if inds[..n].contains(i) {
                return Err(TensorError::DuplicateIndex {
                    index: i.to_string(),
                });
            }
        }
        Ok(Self::from_distinct(inds))
    }

    /// The rank-0 index set of a scalar.
    pub fn scalar() -> Self {
        Self::default()
    }

    /// Caller guarantees the identities are distinct.
    pub(crate) fn from_distinct(inds: SmallVec<[Index; 8]>) -> Self {
        let dims: AxisVec = inds.iter().map(Index::dim).collect();
        let strides = compute_strides(&dims);
        Self { inds, strides }
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.inds.len()
    }

    #[inline]
    pub fn extent(&self, i: usize) -> usize {
        self.inds[i].dim()
    }

    #[inline]
    pub fn stride(&self, i: usize) -> usize {
        self.strides[i]
    }

    pub fn dims(&self) -> AxisVec {
        self.inds.iter().map(Index::dim).collect()
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Total number of elements (1 for rank 0).
    pub fn area(&self) -> usize {
        area(&self.dims())
    }

    /// Linear offset of a multi-index. Bounds are only checked in debug builds.
    #[inline]
    pub fn offset(&self, inds: &[usize]) -> usize {
        debug_assert_eq!(inds.len(), self.rank(), "wrong number of indices");
        debug_assert!(
            inds.iter().zip(self.inds.iter()).all(|(&n, i)| n < i.dim()),
            "index {inds:?} out of bounds"
        );
        inds.iter()
            .zip(self.strides.iter())
            .map(|(&n, &s)| n * s)
            .sum()
    }

    /// Linear offset of a multi-index, validating rank and bounds.
    pub fn checked_offset(&self, inds: &[usize]) -> Result<usize, TensorError> {
        if inds.len() != self.rank() {
            return Err(TensorError::WrongNumberOfIndices {
                expected: self.rank(),
                actual: inds.len(),
            });
        }
        for (&n, i) in inds.iter().zip(self.inds.iter()) {
            if n >= i.dim() {
                return Err(TensorError::IndexOutOfBounds {
                    index: n,
                    dim_size: i.dim(),
                });
            }
        }
        Ok(self.offset(inds))
    }

    /// Position of `index` in this set, matched by identity.
    pub fn find_index(&self, index: &Index) -> Option<usize> {
        self.inds.iter().position(|i| i == index)
    }

    pub fn contains(&self, index: &Index) -> bool {
        self.find_index(index).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Index> {
        self.inds.iter()
    }
}

impl std::ops::Index<usize> for IndexSet {
    type Output = Index;

    fn index(&self, i: usize) -> &Index {
        &self.inds[i]
    }
}

impl<'a> IntoIterator for &'a IndexSet {
    type Item = &'a Index;
    type IntoIter = std::slice::Iter<'a, Index>;

    fn into_iter(self) -> Self::IntoIter {
        self.inds.iter()
    }
}

impl Range for IndexSet {
    fn rank(&self) -> usize {
        IndexSet::rank(self)
    }

    fn extent(&self, i: usize) -> usize {
        IndexSet::extent(self, i)
    }

    fn stride(&self, i: usize) -> usize {
        IndexSet::stride(self, i)
    }
}

impl fmt::Display for IndexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, i) in self.inds.iter().enumerate() {
            if n > 0 {
                write!(f, " ")?;
            }
            write!(f, "{i}")?;
        }
        Ok(())
    }
}
