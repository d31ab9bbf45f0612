//! Label-driven tensor contraction.
//!
//! The planner labels the axes of both operands by index identity (see
//! [`compute_labels`]), settles the result index set and its labels, binds
//! strided views over the buffers and runs a kernel into a fresh output
//! buffer:
//!
//! - `gemm`: reorder to matrices and multiply with faer (pure contractions)
//! - `kernel`: a generic strided loop (everything else, including
//!   non-commutative products)
//!
//! A result with more than one element is normalized by its norm, and the
//! norm is reported as the task's scale factor. The output replaces the
//! first operand's storage.
//!
//! # Example
//!
//! ```
//! use ndtensors_dense::{Index, IndexSet, Storage, do_pair_task};
//! use ndtensors_dense::task::{Contract, PairTask};
//!
//! // C[i,k] = A[i,j] * B[j,k]
//! let (i, j, k) = (Index::new(2), Index::new(3), Index::new(4));
//! let lis = IndexSet::new([i.clone(), j.clone()]).unwrap();
//! let ris = IndexSet::new([j, k.clone()]).unwrap();
//!
//! let mut a = Storage::from_real_vec(vec![1.0; 6]);
//! let b = Storage::from_real_vec(vec![1.0; 12]);
//!
//! let mut task = PairTask::Contract(Contract::new(&lis, &ris));
//! do_pair_task(&mut task, &mut a, &b).unwrap();
//!
//! let PairTask::Contract(c) = task else { unreachable!() };
//! assert_eq!(c.result.unwrap(), IndexSet::new([i, k]).unwrap());
//! assert_eq!(a.len(), 8);
//! // Every element is 3; stored values are normalized.
//! let scalefac = c.scalefac.unwrap();
//! assert!((scalefac - 3.0 * 8f64.sqrt()).abs() < 1e-12);
//! ```

pub mod gemm;
pub mod kernel;
pub mod labels;
mod properties;

pub use labels::{Labels, compute_labels, contract_is, ncprod_is, result_labels};
pub use properties::ContractionProperties;

use crate::blas::{nrm2, scal};
use crate::error::TensorError;
use crate::index::IndexSet;
use crate::scalar::Scalar;
use crate::storage::{Dense, ManageStore, Storage};
use crate::task::{Contract, NCProd};
use crate::view::{make_ten_ref, make_ten_ref_mut};

/// Normalize `data` by its norm and return the norm.
///
/// A zero buffer is left untouched and reports a factor of 1.
pub fn compute_scalefac<T: Scalar>(data: &mut [T]) -> f64 {
    let norm = nrm2(data);
    if norm == 0.0 {
        return 1.0;
    }
    scal(T::from_real(1.0 / norm), data);
    norm
}

/// Contraction handler: every storage-kind combination of the two operands.
pub(crate) fn contract_task(
    c: &mut Contract<'_>,
    m: &mut ManageStore<'_>,
    other: &Storage,
) -> Result<(), TensorError> {
    let (lind, rind) = compute_labels(c.lis, c.ris);
    labels::check_shared_dims(c.lis, &lind, c.ris, &rind)?;
    let (nis, nind) = match &c.result {
        Some(nis) => {
            let nind = result_labels(nis, c.lis, &lind, c.ris, &rind)?;
            (nis.clone(), nind)
        }
        None => contract_is(c.lis, &lind, c.ris, &rind),
    };

    // A pure contraction keeps exactly the free labels.
    let nfree = lind.iter().chain(&rind).filter(|&&l| l > 0).count();
    let use_gemm = nind.iter().all(|&l| l > 0) && nind.len() == nfree;

    let plan = Plan {
        lis: c.lis,
        lind: &lind,
        ris: c.ris,
        rind: &rind,
        nis: &nis,
        nind: &nind,
        use_gemm,
    };
    let scalefac = plan.install(m, other)?;
    c.result = Some(nis);
    if scalefac.is_some() {
        c.scalefac = scalefac;
    }
    Ok(())
}

/// Non-commutative product handler.
pub(crate) fn ncprod_task(
    p: &mut NCProd<'_>,
    m: &mut ManageStore<'_>,
    other: &Storage,
) -> Result<(), TensorError> {
    let (lind, rind) = compute_labels(p.lis, p.ris);
    labels::check_shared_dims(p.lis, &lind, p.ris, &rind)?;
    let (nis, nind) = ncprod_is(p.lis, &lind, p.ris, &rind);

    let plan = Plan {
        lis: p.lis,
        lind: &lind,
        ris: p.ris,
        rind: &rind,
        nis: &nis,
        nind: &nind,
        use_gemm: false,
    };
    let scalefac = plan.install(m, other)?;
    p.result = Some(nis);
    if scalefac.is_some() {
        p.scalefac = scalefac;
    }
    Ok(())
}

/// A fully labeled product, ready to run.
struct Plan<'a> {
    lis: &'a IndexSet,
    lind: &'a [i32],
    ris: &'a IndexSet,
    rind: &'a [i32],
    nis: &'a IndexSet,
    nind: &'a [i32],
    use_gemm: bool,
}

impl Plan<'_> {
    /// Compute the product of the slot's storage with `other` and install
    /// it in the slot. Mixed operands are computed in complex.
    fn install(&self, m: &mut ManageStore<'_>, other: &Storage) -> Result<Option<f64>, TensorError> {
        let (out, scalefac) = match (m.current(), other) {
            (Storage::DenseReal(a), Storage::DenseReal(b)) => self.compute(a, b)?,
            (Storage::DenseReal(a), Storage::DenseCplx(b)) => self.compute(&a.to_cplx(), b)?,
            (Storage::DenseCplx(a), Storage::DenseReal(b)) => self.compute(a, &b.to_cplx())?,
            (Storage::DenseCplx(a), Storage::DenseCplx(b)) => self.compute(a, b)?,
        };
        m.make_new_data(out);
        Ok(scalefac)
    }

    fn compute<T: Scalar>(
        &self,
        a: &Dense<T>,
        b: &Dense<T>,
    ) -> Result<(Storage, Option<f64>), TensorError>
    where
        Dense<T>: Into<Storage>,
    {
        check_len(self.lis, a)?;
        check_len(self.ris, b)?;
        let t1 = make_ten_ref(a.as_slice(), self.lis);
        let t2 = make_ten_ref(b.as_slice(), self.ris);

        let rsize = self.nis.area();
        let mut nd = Dense::<T>::zeros(rsize);
        {
            let mut tr = make_ten_ref_mut(nd.as_mut_slice(), self.nis);
            if self.use_gemm {
                gemm::contract_gemm(&t1, self.lind, &t2, self.rind, &mut tr, self.nind);
            } else {
                kernel::contract_into(&t1, self.lind, &t2, self.rind, &mut tr, self.nind);
            }
        }

        let scalefac = (rsize > 1).then(|| compute_scalefac(nd.as_mut_slice()));
        Ok((nd.into(), scalefac))
    }
}

fn check_len<T: Scalar>(is: &IndexSet, d: &Dense<T>) -> Result<(), TensorError> {
    if d.len() != is.area() {
        return Err(TensorError::ShapeMismatch {
            expected: is.area(),
            actual: d.len(),
        });
    }
    Ok(())
}
