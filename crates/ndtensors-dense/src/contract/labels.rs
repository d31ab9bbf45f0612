//! Index matching between contraction operands.
//!
//! Each axis of each operand receives an integer label. Axes whose index
//! appears in both operands share a negative label (`-1, -2, ...` in the
//! order they occur in the left operand); every other axis gets a distinct
//! positive label (`1, 2, ...`, left operand first).

use smallvec::{SmallVec, smallvec};

use crate::error::TensorError;
use crate::index::{Index, IndexSet};

/// One label per axis.
pub type Labels = SmallVec<[i32; 8]>;

/// Label the axes of two operands.
///
/// ```
/// use ndtensors_dense::{Index, IndexSet};
/// use ndtensors_dense::contract::compute_labels;
///
/// let (i, j, k) = (Index::new(2), Index::new(3), Index::new(4));
/// let lis = IndexSet::new([i, j.clone()]).unwrap();
/// let ris = IndexSet::new([j, k]).unwrap();
/// let (lind, rind) = compute_labels(&lis, &ris);
/// assert_eq!(lind.as_slice(), &[1, -1]);
/// assert_eq!(rind.as_slice(), &[-1, 2]);
/// ```
pub fn compute_labels(lis: &IndexSet, ris: &IndexSet) -> (Labels, Labels) {
    let mut lind: Labels = smallvec![0; lis.rank()];
    let mut rind: Labels = smallvec![0; ris.rank()];

    let mut ncont = 0;
    for (i, index) in lis.iter().enumerate() {
        if let Some(j) = ris.find_index(index) {
            ncont += 1;
            lind[i] = -ncont;
            rind[j] = -ncont;
        }
    }

    let mut nfree = 0;
    for l in lind.iter_mut().chain(rind.iter_mut()) {
        if *l == 0 {
            nfree += 1;
            *l = nfree;
        }
    }
    (lind, rind)
}

/// Shared axes must have equal extents in both operands.
pub fn check_shared_dims(
    lis: &IndexSet,
    lind: &[i32],
    ris: &IndexSet,
    rind: &[i32],
) -> Result<(), TensorError> {
    for (i, &l) in lind.iter().enumerate() {
        if l >= 0 {
            continue;
        }
        if let Some(j) = rind.iter().position(|&r| r == l) {
            if lis.extent(i) != ris.extent(j) {
                return Err(TensorError::ShapeMismatch {
                    expected: lis.extent(i),
                    actual: ris.extent(j),
                });
            }
        }
    }
    Ok(())
}

/// Result of a contraction: the free axes of `lis` followed by the free
/// axes of `ris`, with their labels.
pub fn contract_is(
    lis: &IndexSet,
    lind: &[i32],
    ris: &IndexSet,
    rind: &[i32],
) -> (IndexSet, Labels) {
    let mut inds: SmallVec<[Index; 8]> = SmallVec::new();
    let mut nind = Labels::new();
    for (index, &l) in lis.iter().zip(lind).chain(ris.iter().zip(rind)) {
        if l > 0 {
            inds.push(index.clone());
            nind.push(l);
        }
    }
    (IndexSet::from_distinct(inds), nind)
}

/// Result of a non-commutative product: every axis of `lis`, then the free
/// axes of `ris`. Shared axes keep their negative label.
pub fn ncprod_is(
    lis: &IndexSet,
    lind: &[i32],
    ris: &IndexSet,
    rind: &[i32],
) -> (IndexSet, Labels) {
    let mut inds: SmallVec<[Index; 8]> = lis.iter().cloned().collect();
    let mut nind: Labels = lind.iter().copied().collect();
    for (index, &l) in ris.iter().zip(rind) {
        if l > 0 {
            inds.push(index.clone());
            nind.push(l);
        }
    }
    (IndexSet::from_distinct(inds), nind)
}

/// Labels of a caller-supplied result index set.
///
/// Each result axis takes the label of the same index in `lis`, or failing
/// that in `ris`, and must have that operand axis's extent.
pub fn result_labels(
    nis: &IndexSet,
    lis: &IndexSet,
    lind: &[i32],
    ris: &IndexSet,
    rind: &[i32],
) -> Result<Labels, TensorError> {
    nis.iter()
        .enumerate()
        .map(|(n, index)| {
            let (label, extent) = if let Some(j) = lis.find_index(index) {
                (lind[j], lis.extent(j))
            } else if let Some(j) = ris.find_index(index) {
                (rind[j], ris.extent(j))
            } else {
                return Err(TensorError::IndexNotFound {
                    index: index.to_string(),
                });
            };
            if nis.extent(n) != extent {
                return Err(TensorError::ShapeMismatch {
                    expected: extent,
                    actual: nis.extent(n),
                });
            }
            Ok(label)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(inds: &[&Index]) -> IndexSet {
        IndexSet::new(inds.iter().map(|&i| i.clone())).unwrap()
    }

    #[test]
    fn test_labels_no_shared() {
        let (i, j) = (Index::new(2), Index::new(3));
        let (lind, rind) = compute_labels(&set(&[&i]), &set(&[&j]));
        assert_eq!(lind.as_slice(), &[1]);
        assert_eq!(rind.as_slice(), &[2]);
    }

    #[test]
    fn test_labels_shared_in_left_order() {
        let (i, j, k, l) = (Index::new(2), Index::new(3), Index::new(4), Index::new(5));
        let lis = set(&[&i, &j, &k]);
        let ris = set(&[&k, &l, &j]);
        let (lind, rind) = compute_labels(&lis, &ris);
        assert_eq!(lind.as_slice(), &[1, -1, -2]);
        assert_eq!(rind.as_slice(), &[-2, 2, -1]);
    }

    #[test]
    fn test_contract_is() {
        let (i, j, k) = (Index::new(2), Index::new(3), Index::new(4));
        let lis = set(&[&j, &i]);
        let ris = set(&[&k, &j]);
        let (lind, rind) = compute_labels(&lis, &ris);
        let (nis, nind) = contract_is(&lis, &lind, &ris, &rind);
        assert_eq!(nis, set(&[&i, &k]));
        assert_eq!(nind.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_ncprod_is_keeps_shared() {
        let (i, j, k) = (Index::new(2), Index::new(3), Index::new(4));
        let lis = set(&[&i, &j]);
        let ris = set(&[&j, &k]);
        let (lind, rind) = compute_labels(&lis, &ris);
        let (nis, nind) = ncprod_is(&lis, &lind, &ris, &rind);
        assert_eq!(nis, set(&[&i, &j, &k]));
        assert_eq!(nind.as_slice(), &[1, -1, 2]);
    }

    #[test]
    fn test_result_labels() {
        let (i, j, k) = (Index::new(2), Index::new(3), Index::new(4));
        let lis = set(&[&i, &j]);
        let ris = set(&[&j, &k]);
        let (lind, rind) = compute_labels(&lis, &ris);

        let nind = result_labels(&set(&[&k, &i]), &lis, &lind, &ris, &rind).unwrap();
        assert_eq!(nind.as_slice(), &[2, 1]);

        let missing = Index::new(7);
        let err = result_labels(&set(&[&i, &missing]), &lis, &lind, &ris, &rind).unwrap_err();
        assert!(matches!(err, TensorError::IndexNotFound { .. }));
    }

    #[test]
    fn test_result_extent_must_match_operand() {
        let (i, k) = (Index::new(2), Index::new(4));
        let lis = set(&[&i]);
        let ris = set(&[&k]);
        let (lind, rind) = compute_labels(&lis, &ris);
        let k_narrow = Index::with_id(k.id(), 2);
        let err = result_labels(&set(&[&i, &k_narrow]), &lis, &lind, &ris, &rind).unwrap_err();
        assert!(matches!(
            err,
            TensorError::ShapeMismatch {
                expected: 4,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_shared_dim_mismatch() {
        let j = Index::new(3);
        let j_wide = Index::with_id(j.id(), 4);
        let lis = set(&[&j]);
        let ris = set(&[&j_wide]);
        let (lind, rind) = compute_labels(&lis, &ris);
        assert!(check_shared_dims(&lis, &lind, &ris, &rind).is_err());
    }
}
