//! Double dispatch of tasks over storage kinds.
//!
//! Both entry points are exhaustive matches over (task × storage kind), so
//! every combination has exactly one handler and a missing one is a compile
//! error. Handlers that must change the storage representation receive a
//! [`ManageStore`] bound to the slot.

use crate::contract::{contract_task, ncprod_task};
use crate::error::TensorError;
use crate::io;
use crate::operations::{element, elementwise, plus_eq, reduce};
use crate::print::print_dense;
use crate::scalar::c64;
use crate::storage::{ManageStore, Storage, StorageType};
use crate::task::{PairTask, Task, TaskOutput};

/// Run a single-operand task against one storage slot.
///
/// # Example
///
/// ```
/// use ndtensors_dense::{Index, IndexSet, Storage, do_task};
/// use ndtensors_dense::task::{Fill, GetElt, Task};
///
/// let is = IndexSet::new([Index::new(2), Index::new(2)]).unwrap();
/// let mut store = Storage::real_zeros(is.area());
///
/// do_task(&mut Task::FillReal(Fill { value: 1.5 }), &mut store).unwrap();
/// let v = do_task(&mut Task::GetElt(GetElt::new(&is, &[1, 1])), &mut store).unwrap();
/// assert_eq!(v.real(), None);
/// assert_eq!(v.cplx().unwrap().re, 1.5);
/// ```
pub fn do_task(task: &mut Task<'_>, store: &mut Storage) -> Result<TaskOutput, TensorError> {
    use Storage::{DenseCplx, DenseReal};

    let out = match task {
        Task::GetElt(g) => match store {
            DenseReal(d) => TaskOutput::Cplx(element::get_elt(g, d)?),
            DenseCplx(d) => TaskOutput::Cplx(element::get_elt(g, d)?),
        },
        Task::SetReal(s) => {
            match store {
                DenseReal(d) => element::set_elt(s.is, s.inds, s.elt, d)?,
                DenseCplx(d) => element::set_elt(s.is, s.inds, c64::new(s.elt, 0.0), d)?,
            }
            TaskOutput::None
        }
        Task::SetCplx(s) => {
            match store {
                DenseReal(_) => element::set_cplx_promote(s, &mut ManageStore::new(store))?,
                DenseCplx(d) => element::set_elt(s.is, s.inds, s.elt, d)?,
            }
            TaskOutput::None
        }
        Task::FillReal(f) => {
            match store {
                DenseReal(d) => elementwise::fill(f.value, d),
                DenseCplx(d) => elementwise::fill(c64::new(f.value, 0.0), d),
            }
            TaskOutput::None
        }
        Task::FillCplx(f) => {
            match store {
                DenseReal(_) => elementwise::fill_cplx_promote(f.value, &mut ManageStore::new(store)),
                DenseCplx(d) => elementwise::fill(f.value, d),
            }
            TaskOutput::None
        }
        Task::MultReal(mr) => {
            match store {
                DenseReal(d) => elementwise::mult(mr.value, d),
                DenseCplx(d) => elementwise::mult(c64::new(mr.value, 0.0), d),
            }
            TaskOutput::None
        }
        Task::MultCplx(mc) => {
            match store {
                DenseReal(_) => elementwise::mult_cplx_promote(mc.value, &mut ManageStore::new(store)),
                DenseCplx(d) => elementwise::mult(mc.value, d),
            }
            TaskOutput::None
        }
        Task::NormNoScale => match store {
            DenseReal(d) => TaskOutput::Real(reduce::norm(d)),
            DenseCplx(d) => TaskOutput::Real(reduce::norm(d)),
        },
        Task::Conj => {
            match store {
                // Nothing to conjugate.
                DenseReal(_) => {}
                DenseCplx(d) => elementwise::conj(d),
            }
            TaskOutput::None
        }
        Task::TakeReal => {
            match store {
                // Already real.
                DenseReal(_) => {}
                DenseCplx(_) => elementwise::take_real(&mut ManageStore::new(store)),
            }
            TaskOutput::None
        }
        Task::TakeImag => {
            match store {
                DenseReal(d) => elementwise::fill(0.0, d),
                DenseCplx(_) => elementwise::take_imag(&mut ManageStore::new(store)),
            }
            TaskOutput::None
        }
        Task::SumEls => match store {
            DenseReal(d) => TaskOutput::Cplx(reduce::sum_els(d)),
            DenseCplx(d) => TaskOutput::Cplx(reduce::sum_els(d)),
        },
        Task::Print(p) => {
            match store {
                DenseReal(d) => print_dense(p, StorageType::DenseReal, d)?,
                DenseCplx(d) => print_dense(p, StorageType::DenseCplx, d)?,
            }
            TaskOutput::None
        }
        Task::Write(w) => {
            match store {
                DenseReal(d) => io::write_real(w, d)?,
                DenseCplx(d) => io::write_cplx(w, d)?,
            }
            TaskOutput::None
        }
    };
    Ok(out)
}

/// Run a two-operand task. The first slot receives the result and may be
/// replaced with a different representation.
pub fn do_pair_task(
    task: &mut PairTask<'_>,
    store1: &mut Storage,
    store2: &Storage,
) -> Result<TaskOutput, TensorError> {
    use Storage::{DenseCplx, DenseReal};

    match task {
        PairTask::Contract(c) => contract_task(c, &mut ManageStore::new(store1), store2)?,
        PairTask::NCProd(p) => ncprod_task(p, &mut ManageStore::new(store1), store2)?,
        PairTask::PlusEq(p) => match store2 {
            DenseReal(b) => match store1 {
                DenseReal(a) => plus_eq::plus_eq(p, a.as_mut_slice(), b.as_slice())?,
                DenseCplx(a) => plus_eq::plus_eq(p, a.as_mut_slice(), b.to_cplx().as_slice())?,
            },
            DenseCplx(b) => match store1 {
                DenseReal(_) => plus_eq::plus_eq_promote(p, &mut ManageStore::new(store1), b)?,
                DenseCplx(a) => plus_eq::plus_eq(p, a.as_mut_slice(), b.as_slice())?,
            },
        },
    }
    Ok(TaskOutput::None)
}
