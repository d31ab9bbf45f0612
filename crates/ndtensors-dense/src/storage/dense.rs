//! Dense storage for tensor data.

use crate::scalar::{Scalar, c64};

/// Dense storage - contiguous array of elements in column-major order.
///
/// The length is fixed at construction; it only changes when the whole
/// buffer is replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct Dense<ElT: Scalar> {
    data: Vec<ElT>,
}

impl<ElT: Scalar> Dense<ElT> {
    /// Create dense storage with given length, zero-initialized.
    pub fn zeros(len: usize) -> Self {
        Self {
            data: vec![ElT::zero(); len],
        }
    }

    /// Create dense storage holding `len` copies of `value`.
    pub fn filled(len: usize, value: ElT) -> Self {
        Self {
            data: vec![value; len],
        }
    }

    /// Create dense storage from existing vector (takes ownership).
    pub fn from_vec(data: Vec<ElT>) -> Self {
        Self { data }
    }

    /// Length of storage.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if storage is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[ElT] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [ElT] {
        &mut self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ElT> {
        self.data.iter()
    }

    pub fn into_vec(self) -> Vec<ElT> {
        self.data
    }

    /// Widen every element to complex, keeping values and zeroing
    /// imaginary parts for real storage.
    pub fn to_cplx(&self) -> Dense<c64> {
        Dense::from_vec(self.data.iter().map(|x| x.to_c64()).collect())
    }

    /// Real parts of every element.
    pub fn real_parts(&self) -> Dense<f64> {
        Dense::from_vec(self.data.iter().map(|x| x.real_part()).collect())
    }

    /// Imaginary parts of every element.
    pub fn imag_parts(&self) -> Dense<f64> {
        Dense::from_vec(self.data.iter().map(|x| x.imag_part()).collect())
    }
}

impl<ElT: Scalar> std::ops::Index<usize> for Dense<ElT> {
    type Output = ElT;

    #[inline]
    fn index(&self, i: usize) -> &ElT {
        &self.data[i]
    }
}

impl<ElT: Scalar> std::ops::IndexMut<usize> for Dense<ElT> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut ElT {
        &mut self.data[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let d: Dense<f64> = Dense::zeros(5);
        assert_eq!(d.len(), 5);
        assert!(!d.is_empty());
        assert!(d.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_index_mut() {
        let mut d = Dense::zeros(3);
        d[1] = 5.0;
        assert_eq!(d.as_slice(), &[0.0, 5.0, 0.0]);
    }

    #[test]
    fn test_to_cplx() {
        let d = Dense::from_vec(vec![1.0, -2.0]);
        let z = d.to_cplx();
        assert_eq!(z.as_slice(), &[c64::new(1.0, 0.0), c64::new(-2.0, 0.0)]);
    }

    #[test]
    fn test_parts() {
        let z = Dense::from_vec(vec![c64::new(1.0, 2.0), c64::new(3.0, -4.0)]);
        assert_eq!(z.real_parts().as_slice(), &[1.0, 3.0]);
        assert_eq!(z.imag_parts().as_slice(), &[2.0, -4.0]);
    }
}
