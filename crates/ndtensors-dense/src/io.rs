//! Serialization hand-off.
//!
//! The Write task passes a storage's type tag and raw buffer to a
//! [`StorageWriter`]. [`BinaryWriter`] is a simple little-endian encoding:
//!
//! ```text
//! tag: u8 | len: u64 | len values (f64, or re/im f64 pairs for complex)
//! ```
//!
//! [`read_storage`] decodes the same layout.

use std::io::{self, Read, Write};

use crate::error::TensorError;
use crate::scalar::c64;
use crate::storage::{Dense, Storage, StorageType};
use crate::task::WriteIt;

/// Sink for serialized storage.
pub trait StorageWriter {
    fn write_real(&mut self, ty: StorageType, data: &[f64]) -> io::Result<()>;

    fn write_cplx(&mut self, ty: StorageType, data: &[c64]) -> io::Result<()>;
}

/// Binary encoder over any [`io::Write`].
#[derive(Debug)]
pub struct BinaryWriter<W: Write> {
    inner: W,
}

impl<W: Write> BinaryWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    fn write_header(&mut self, ty: StorageType, len: usize) -> io::Result<()> {
        self.inner.write_all(&[ty.tag()])?;
        self.inner.write_all(&(len as u64).to_le_bytes())
    }
}

impl<W: Write> StorageWriter for BinaryWriter<W> {
    fn write_real(&mut self, ty: StorageType, data: &[f64]) -> io::Result<()> {
        self.write_header(ty, data.len())?;
        for v in data {
            self.inner.write_all(&v.to_le_bytes())?;
        }
        Ok(())
    }

    fn write_cplx(&mut self, ty: StorageType, data: &[c64]) -> io::Result<()> {
        self.write_header(ty, data.len())?;
        for z in data {
            self.inner.write_all(&z.re.to_le_bytes())?;
            self.inner.write_all(&z.im.to_le_bytes())?;
        }
        Ok(())
    }
}

/// Decode one storage written by [`BinaryWriter`].
///
/// ```
/// use ndtensors_dense::io::{BinaryWriter, StorageWriter, read_storage};
/// use ndtensors_dense::storage::{Storage, StorageType};
///
/// let mut w = BinaryWriter::new(Vec::new());
/// w.write_real(StorageType::DenseReal, &[1.0, 2.0]).unwrap();
/// let bytes = w.into_inner();
///
/// let s = read_storage(&mut bytes.as_slice()).unwrap();
/// assert_eq!(s, Storage::from_real_vec(vec![1.0, 2.0]));
/// ```
pub fn read_storage<R: Read>(r: &mut R) -> Result<Storage, TensorError> {
    let mut tag = [0u8; 1];
    r.read_exact(&mut tag)?;
    let ty = StorageType::from_tag(tag[0]).ok_or(TensorError::UnknownStorageType { tag: tag[0] })?;

    let mut len = [0u8; 8];
    r.read_exact(&mut len)?;
    let len = u64::from_le_bytes(len) as usize;

    match ty {
        StorageType::DenseReal => {
            let data = (0..len).map(|_| read_f64(r)).collect::<io::Result<Vec<_>>>()?;
            Ok(Storage::DenseReal(Dense::from_vec(data)))
        }
        StorageType::DenseCplx => {
            let data = (0..len)
                .map(|_| -> io::Result<c64> { Ok(c64::new(read_f64(r)?, read_f64(r)?)) })
                .collect::<io::Result<Vec<_>>>()?;
            Ok(Storage::DenseCplx(Dense::from_vec(data)))
        }
    }
}

fn read_f64<R: Read>(r: &mut R) -> io::Result<f64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(f64::from_le_bytes(buf))
}

pub(crate) fn write_real(w: &mut WriteIt<'_>, d: &Dense<f64>) -> Result<(), TensorError> {
    w.out.write_real(StorageType::DenseReal, d.as_slice())?;
    Ok(())
}

pub(crate) fn write_cplx(w: &mut WriteIt<'_>, d: &Dense<c64>) -> Result<(), TensorError> {
    w.out.write_cplx(StorageType::DenseCplx, d.as_slice())?;
    Ok(())
}
