//! Storage types for tensor data.
//!
//! A tensor owns exactly one [`Storage`] slot. The slot is a closed tagged
//! union over the supported dense representations:
//!
//! ```text
//! Storage
//! ├── DenseReal(Dense<f64>)
//! └── DenseCplx(Dense<c64>)
//! ```
//!
//! Operations that need a different representation (real to complex
//! promotion, taking real or imaginary parts) install a new variant through
//! [`ManageStore`] rather than mutating the old buffer.

mod dense;
mod manage;

use std::borrow::Cow;

use crate::scalar::c64;

pub use dense::Dense;
pub use manage::ManageStore;

/// Tag identifying a storage representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StorageType {
    DenseReal = 1,
    DenseCplx = 2,
}

impl StorageType {
    /// Human-readable name used by printing.
    pub fn name(self) -> &'static str {
        match self {
            StorageType::DenseReal => "Dense Real",
            StorageType::DenseCplx => "Dense Cplx",
        }
    }

    #[inline]
    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(StorageType::DenseReal),
            2 => Some(StorageType::DenseCplx),
            _ => None,
        }
    }
}

/// The storage slot of one tensor.
#[derive(Debug, Clone, PartialEq)]
pub enum Storage {
    DenseReal(Dense<f64>),
    DenseCplx(Dense<c64>),
}

impl Storage {
    /// Zero-initialized real storage.
    pub fn real_zeros(len: usize) -> Self {
        Storage::DenseReal(Dense::zeros(len))
    }

    /// Zero-initialized complex storage.
    pub fn cplx_zeros(len: usize) -> Self {
        Storage::DenseCplx(Dense::zeros(len))
    }

    pub fn from_real_vec(data: Vec<f64>) -> Self {
        Storage::DenseReal(Dense::from_vec(data))
    }

    pub fn from_cplx_vec(data: Vec<c64>) -> Self {
        Storage::DenseCplx(Dense::from_vec(data))
    }

    pub fn storage_type(&self) -> StorageType {
        match self {
            Storage::DenseReal(_) => StorageType::DenseReal,
            Storage::DenseCplx(_) => StorageType::DenseCplx,
        }
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Storage::DenseCplx(_))
    }

    pub fn len(&self) -> usize {
        match self {
            Storage::DenseReal(d) => d.len(),
            Storage::DenseCplx(d) => d.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_real(&self) -> Option<&Dense<f64>> {
        match self {
            Storage::DenseReal(d) => Some(d),
            Storage::DenseCplx(_) => None,
        }
    }

    pub fn as_cplx(&self) -> Option<&Dense<c64>> {
        match self {
            Storage::DenseCplx(d) => Some(d),
            Storage::DenseReal(_) => None,
        }
    }

    /// Element at linear offset `i`, widened to complex.
    pub fn get_linear(&self, i: usize) -> Option<c64> {
        match self {
            Storage::DenseReal(d) => d.as_slice().get(i).map(|&x| c64::new(x, 0.0)),
            Storage::DenseCplx(d) => d.as_slice().get(i).copied(),
        }
    }

    /// Complex view of the data: borrowed when already complex, otherwise
    /// a promoted copy.
    pub fn to_cplx(&self) -> Cow<'_, Dense<c64>> {
        match self {
            Storage::DenseReal(d) => Cow::Owned(d.to_cplx()),
            Storage::DenseCplx(d) => Cow::Borrowed(d),
        }
    }
}

impl From<Dense<f64>> for Storage {
    fn from(d: Dense<f64>) -> Self {
        Storage::DenseReal(d)
    }
}

impl From<Dense<c64>> for Storage {
    fn from(d: Dense<c64>) -> Self {
        Storage::DenseCplx(d)
    }
}
