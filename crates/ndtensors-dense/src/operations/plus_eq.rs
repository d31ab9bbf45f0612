//! Permuted accumulation `dest += fac * permute(src, perm)`.

use crate::blas::axpy;
use crate::error::TensorError;
use crate::scalar::{Scalar, c64};
use crate::storage::{Dense, ManageStore};
use crate::strides::{is_trivial, validate_permutation};
use crate::task::PlusEq;
use crate::view::{make_ten_ref, make_ten_ref_mut, transform};

/// Accumulate `src` into `dest`.
///
/// With the identity permutation this is a flat `axpy`; otherwise the
/// source view is permuted to the destination axis order and walked with a
/// strided transform.
///
/// # Panics
///
/// In debug builds, panics if the buffers differ in length.
pub(crate) fn plus_eq<T: Scalar>(
    p: &PlusEq<'_>,
    dest: &mut [T],
    src: &[T],
) -> Result<(), TensorError> {
    debug_assert_eq!(
        dest.len(),
        src.len(),
        "mismatched sizes in permuted accumulate"
    );
    let f = T::from_real(p.fac);
    if is_trivial(p.perm) {
        axpy(f, src, dest);
        return Ok(());
    }
    validate_permutation(p.perm, p.is2.rank())?;
    let r2 = make_ten_ref(src, p.is2).permute(p.perm);
    let mut r1 = make_ten_ref_mut(dest, p.is1);
    transform(&r2, &mut r1, |s, d| *d += f * s);
    Ok(())
}

/// Complex source into real destination: promote the destination first.
pub(crate) fn plus_eq_promote(
    p: &PlusEq<'_>,
    m: &mut ManageStore<'_>,
    src: &Dense<c64>,
) -> Result<(), TensorError> {
    if !is_trivial(p.perm) {
        validate_permutation(p.perm, p.is2.rank())?;
    }
    let promoted = m.current().to_cplx().into_owned();
    let nd = m.make_new_cplx(promoted);
    plus_eq(p, nd.as_mut_slice(), src.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{Index, IndexSet};
    use crate::storage::Storage;

    #[test]
    fn test_trivial_perm_is_axpy() {
        let is = IndexSet::new([Index::new(2), Index::new(2)]).unwrap();
        let p = PlusEq::new(&is, &is, &[0, 1], 2.0);
        let mut dest = [1.0, 1.0, 1.0, 1.0];
        plus_eq(&p, &mut dest, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(dest, [3.0, 5.0, 7.0, 9.0]);
    }

    #[test]
    fn test_transpose_accumulate() {
        let (i, j) = (Index::new(2), Index::new(3));
        let is1 = IndexSet::new([i.clone(), j.clone()]).unwrap();
        let is2 = IndexSet::new([j, i]).unwrap();
        // src[j,i] column-major over (3,2)
        let src = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut dest = [0.0; 6];
        let p = PlusEq::new(&is1, &is2, &[1, 0], 1.0);
        plus_eq(&p, &mut dest, &src).unwrap();
        // dest[i,j] = src[j,i]
        assert_eq!(dest, [1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_invalid_perm() {
        let is = IndexSet::new([Index::new(2), Index::new(2)]).unwrap();
        let p = PlusEq::new(&is, &is, &[1, 1], 1.0);
        let mut dest = [0.0; 4];
        assert!(matches!(
            plus_eq(&p, &mut dest, &[0.0; 4]),
            Err(TensorError::InvalidPermutation { .. })
        ));
    }

    #[test]
    fn test_promote_destination() {
        let is = IndexSet::new([Index::new(2)]).unwrap();
        let p = PlusEq::new(&is, &is, &[0], 1.0);
        let mut slot = Storage::from_real_vec(vec![1.0, 2.0]);
        let src = Dense::from_vec(vec![c64::new(0.0, 1.0), c64::new(1.0, 1.0)]);
        plus_eq_promote(&p, &mut ManageStore::new(&mut slot), &src).unwrap();
        assert_eq!(
            slot,
            Storage::from_cplx_vec(vec![c64::new(1.0, 1.0), c64::new(3.0, 1.0)])
        );
    }
}
