//! ndtensors-dense - dense storage core for tensor-network computations
//!
//! This crate provides type-erased dense storage (real and complex) and a
//! task dispatch mechanism that runs element access, scaling, reductions,
//! printing, serialization, contraction and permuted accumulation against
//! it.
//!
//! # Architecture
//!
//! ```text
//! Task / PairTask            operation descriptor
//!     → do_task / do_pair_task   exhaustive match over storage kinds
//!     → handler                  in place, or replace via ManageStore
//!     → kernels                  blas, view::transform, contract::{gemm, kernel}
//! ```
//!
//! Operations that need complex precision on real storage (setting a
//! complex element, complex fill or scale, adding complex data) promote the
//! slot to complex storage rather than failing.
//!
//! # Example
//!
//! ```
//! use ndtensors_dense::{Index, IndexSet, Storage, c64, do_task};
//! use ndtensors_dense::task::{SetElt, Task};
//!
//! let is = IndexSet::new([Index::new(2), Index::new(3)]).unwrap();
//! let mut store = Storage::real_zeros(is.area());
//!
//! // Writing a complex value promotes the storage
//! let mut set = Task::SetCplx(SetElt::new(&is, &[0, 1], c64::new(0.0, 1.0)));
//! do_task(&mut set, &mut store).unwrap();
//! assert!(store.is_complex());
//!
//! let sum = do_task(&mut Task::SumEls, &mut store).unwrap();
//! assert_eq!(sum.cplx(), Some(c64::new(0.0, 1.0)));
//! ```

pub mod blas;
pub mod contract;
pub mod dispatch;
pub mod error;
pub mod index;
pub mod io;
pub(crate) mod operations;
pub mod print;
pub mod random;
pub mod range;
pub mod scalar;
pub mod storage;
pub mod strides;
pub mod task;
pub mod view;

pub use dispatch::{do_pair_task, do_task};
pub use error::TensorError;
pub use index::{Index, IndexId, IndexSet};
pub use print::PrintConfig;
pub use range::{DimRange, Range, RangeIter};
pub use scalar::{Scalar, c64};
pub use storage::{Dense, ManageStore, Storage, StorageType};
pub use task::{PairTask, Task, TaskOutput};
