//! Ownership mediator for storage replacement.

use crate::scalar::c64;
use crate::storage::{Dense, Storage};

/// Grants a handler the right to replace one tensor's storage slot.
///
/// A `ManageStore` is created per dispatch call and bound to exactly one
/// slot. Installing new data drops the previous buffer; the new buffer
/// becomes the slot's sole owner. At most one replacement may happen per
/// call.
///
/// # Example
///
/// ```
/// use ndtensors_dense::storage::{ManageStore, Storage};
///
/// let mut slot = Storage::from_real_vec(vec![1.0, 2.0]);
/// let mut m = ManageStore::new(&mut slot);
/// let promoted = m.current().to_cplx().into_owned();
/// m.make_new_cplx(promoted)[0].im = 3.0;
/// assert!(slot.is_complex());
/// ```
#[derive(Debug)]
pub struct ManageStore<'a> {
    slot: &'a mut Storage,
    replaced: bool,
}

impl<'a> ManageStore<'a> {
    pub fn new(slot: &'a mut Storage) -> Self {
        Self {
            slot,
            replaced: false,
        }
    }

    /// The storage currently held by the slot.
    pub fn current(&self) -> &Storage {
        self.slot
    }

    /// Whether this mediator has already replaced the slot.
    pub fn replaced(&self) -> bool {
        self.replaced
    }

    /// Install `data` as the slot's storage, dropping the previous buffer.
    pub fn make_new_data(&mut self, data: Storage) -> &mut Storage {
        debug_assert!(
            !self.replaced,
            "storage may be replaced at most once per dispatch"
        );
        self.replaced = true;
        *self.slot = data;
        self.slot
    }

    /// Install a real buffer and return it for further writes.
    pub fn make_new_real(&mut self, data: Dense<f64>) -> &mut Dense<f64> {
        match self.make_new_data(Storage::DenseReal(data)) {
            Storage::DenseReal(d) => d,
            Storage::DenseCplx(_) => unreachable!("slot holds the real buffer just installed"),
        }
    }

    /// Install a complex buffer and return it for further writes.
    pub fn make_new_cplx(&mut self, data: Dense<c64>) -> &mut Dense<c64> {
        match self.make_new_data(Storage::DenseCplx(data)) {
            Storage::DenseCplx(d) => d,
            Storage::DenseReal(_) => unreachable!("slot holds the complex buffer just installed"),
        }
    }
}
