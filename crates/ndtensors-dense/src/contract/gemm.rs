//! GEMM-based tensor contraction using faer.
//!
//! Operands are reordered into matrices, multiplied with faer's `matmul`,
//! and the product is scattered into the output view in its own axis order.

use std::borrow::Cow;

use faer::linalg::matmul::matmul;
use faer::{Accum, MatMut, MatRef, Par};
use smallvec::SmallVec;

use crate::contract::properties::ContractionProperties;
use crate::range::DimRange;
use crate::scalar::Scalar;
use crate::view::{TensorRef, TensorRefMut, transform};

/// Contract `A[la] * B[lb]` into `c` via a single matrix product.
///
/// Only valid when every shared label is summed and `lc` is a permutation
/// of the free labels.
pub fn contract_gemm<T: Scalar>(
    a: &TensorRef<'_, T>,
    la: &[i32],
    b: &TensorRef<'_, T>,
    lb: &[i32],
    c: &mut TensorRefMut<'_, T>,
    lc: &[i32],
) {
    let props = ContractionProperties::compute(la, a.range().extents(), lb, b.range().extents());

    if props.is_full_contraction() {
        return contract_full(a, b, c, &props);
    }

    let m = props.dleft;
    let k = props.dmid;
    let n = props.dright;
    if m == 0 || n == 0 {
        return;
    }

    let a_work = matrix_data(a, props.permute_a, &props.perm_a);
    let b_work = matrix_data(b, props.permute_b, &props.perm_b);

    let mut prod = vec![T::zero(); m * n];
    {
        let a_mat = MatRef::from_column_major_slice(&a_work[..], m, k);
        let b_mat = MatRef::from_column_major_slice(&b_work[..], k, n);
        let c_mat = MatMut::from_column_major_slice_mut(&mut prod, m, n);
        matmul(c_mat, Accum::Replace, a_mat, b_mat, T::one(), Par::Seq);
    }

    // The product's axes are A's free axes then B's; reorder to `lc`.
    let prod_extents: SmallVec<[usize; 8]> = props
        .free_a
        .iter()
        .map(|&i| a.range().extents()[i])
        .chain(props.free_b.iter().map(|&j| b.range().extents()[j]))
        .collect();
    let order: SmallVec<[usize; 8]> = lc
        .iter()
        .filter_map(|l| props.output_labels.iter().position(|x| x == l))
        .collect();
    debug_assert_eq!(order.len(), lc.len(), "output labels must all be free");

    let prod_view = TensorRef::new(&prod, DimRange::column_major(&prod_extents)).select(&order);
    transform(&prod_view, c, |s, d| *d = s);
}

/// Scalar result: a dot product over the reordered operands.
fn contract_full<T: Scalar>(
    a: &TensorRef<'_, T>,
    b: &TensorRef<'_, T>,
    c: &mut TensorRefMut<'_, T>,
    props: &ContractionProperties,
) {
    let a_work = matrix_data(a, props.permute_a, &props.perm_a);
    let b_work = matrix_data(b, props.permute_b, &props.perm_b);
    let sum: T = a_work
        .iter()
        .zip(b_work.iter())
        .map(|(&av, &bv)| av * bv)
        .sum();
    c.data_mut()[0] = sum;
}

/// Operand data laid out in `order`, borrowed when no reordering is needed.
fn matrix_data<'a, T: Scalar>(
    t: &TensorRef<'a, T>,
    permute: bool,
    order: &[usize],
) -> Cow<'a, [T]> {
    if permute {
        Cow::Owned(t.clone().select(order).to_vec())
    } else {
        Cow::Borrowed(t.data())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::kernel::contract_into;
    use crate::scalar::c64;
    use crate::storage::Dense;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn compare_with_loop(
        ea: &[usize],
        la: &[i32],
        eb: &[usize],
        lb: &[i32],
        ec: &[usize],
        lc: &[i32],
    ) {
        let mut rng = StdRng::seed_from_u64(17);
        let a: Dense<f64> = Dense::randn_with_rng(ea.iter().product(), &mut rng);
        let b: Dense<f64> = Dense::randn_with_rng(eb.iter().product(), &mut rng);
        let len: usize = ec.iter().product();
        let ta = TensorRef::new(a.as_slice(), DimRange::column_major(ea));
        let tb = TensorRef::new(b.as_slice(), DimRange::column_major(eb));

        let mut c_gemm = vec![0.0; len];
        let mut c_loop = vec![0.0; len];
        contract_gemm(
            &ta,
            la,
            &tb,
            lb,
            &mut TensorRefMut::new(&mut c_gemm, DimRange::column_major(ec)),
            lc,
        );
        contract_into(
            &ta,
            la,
            &tb,
            lb,
            &mut TensorRefMut::new(&mut c_loop, DimRange::column_major(ec)),
            lc,
        );
        for (g, l) in c_gemm.iter().zip(&c_loop) {
            assert_relative_eq!(*g, *l, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_gemm_matrix_multiply() {
        compare_with_loop(&[2, 3], &[1, -1], &[3, 4], &[-1, 2], &[2, 4], &[1, 2]);
    }

    #[test]
    fn test_gemm_transposed_output() {
        compare_with_loop(&[2, 3], &[1, -1], &[3, 4], &[-1, 2], &[4, 2], &[2, 1]);
    }

    #[test]
    fn test_gemm_permuted_operands() {
        // C[i,l] = A[i,j,k] * B[k,j,l]
        compare_with_loop(
            &[2, 3, 4],
            &[1, -1, -2],
            &[4, 3, 5],
            &[-2, -1, 2],
            &[2, 5],
            &[1, 2],
        );
        // C[l,m,i] = A[j,i,k] * B[m,k,l,j]
        compare_with_loop(
            &[3, 2, 4],
            &[-1, 1, -2],
            &[2, 4, 3, 3],
            &[3, -2, 2, -1],
            &[3, 2, 2],
            &[2, 3, 1],
        );
    }

    #[test]
    fn test_gemm_outer_product() {
        compare_with_loop(&[2], &[1], &[3], &[2], &[2, 3], &[1, 2]);
    }

    #[test]
    fn test_gemm_inner_product() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        let mut c = [0.0];
        contract_gemm(
            &TensorRef::new(&a, DimRange::column_major(&[3])),
            &[-1],
            &TensorRef::new(&b, DimRange::column_major(&[3])),
            &[-1],
            &mut TensorRefMut::new(&mut c, DimRange::column_major(&[])),
            &[],
        );
        assert_relative_eq!(c[0], 32.0);
    }

    #[test]
    fn test_gemm_complex() {
        let a = [
            c64::new(1.0, 0.0),
            c64::new(2.0, 0.0),
            c64::new(3.0, 0.0),
            c64::new(4.0, 0.0),
        ];
        let b = [
            c64::new(1.0, 0.0),
            c64::new(0.0, 1.0),
            c64::new(0.0, -1.0),
            c64::new(1.0, 0.0),
        ];
        let range = DimRange::column_major(&[2, 2]);
        let mut c_gemm = [c64::new(0.0, 0.0); 4];
        let mut c_loop = [c64::new(0.0, 0.0); 4];
        let ta = TensorRef::new(&a, range.clone());
        let tb = TensorRef::new(&b, range.clone());
        contract_gemm(
            &ta,
            &[1, -1],
            &tb,
            &[-1, 2],
            &mut TensorRefMut::new(&mut c_gemm, range.clone()),
            &[1, 2],
        );
        contract_into(
            &ta,
            &[1, -1],
            &tb,
            &[-1, 2],
            &mut TensorRefMut::new(&mut c_loop, range),
            &[1, 2],
        );
        for (g, l) in c_gemm.iter().zip(&c_loop) {
            assert_relative_eq!(g.re, l.re, epsilon = 1e-10);
            assert_relative_eq!(g.im, l.im, epsilon = 1e-10);
        }
    }
}
