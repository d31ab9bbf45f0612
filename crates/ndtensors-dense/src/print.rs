//! Human-readable storage printing.

use std::fmt;

use crate::blas::nrm2;
use crate::error::TensorError;
use crate::range::RangeIter;
use crate::scalar::Scalar;
use crate::storage::{Dense, StorageType};
use crate::task::PrintIt;

/// Settings shared by every print call.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintConfig {
    /// Elements whose squared magnitude does not exceed this are skipped.
    pub print_scale: f64,
    /// Digits after the decimal point.
    pub precision: usize,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            print_scale: 1e-10,
            precision: 5,
        }
    }
}

/// Print an info line, then (optionally) every significant element.
///
/// Elements are listed in column-major order as `(i,j,...) value` with
/// 1-based positions. A rank-0 storage prints its single value.
pub(crate) fn print_dense<T: Scalar>(
    p: &mut PrintIt<'_>,
    kind: StorageType,
    d: &Dense<T>,
) -> Result<(), TensorError> {
    writeln!(p.out, "{} {{norm={:.2}}}", kind.name(), nrm2(d.as_slice()))?;

    let scale = T::from_real(p.scalefac);
    let precision = p.config.precision;

    if p.is.rank() == 0 {
        if let Some(&v) = d.as_slice().first() {
            write!(p.out, "  ")?;
            write_val(p.out, scale * v, precision)?;
        }
        return Ok(());
    }

    if !p.print_data {
        return Ok(());
    }

    for (ind, off) in RangeIter::new(p.is) {
        let val = scale * d[off];
        if val.abs_sqr() > p.config.print_scale {
            write!(p.out, "(")?;
            for (n, i) in ind.iter().enumerate() {
                if n > 0 {
                    write!(p.out, ",")?;
                }
                write!(p.out, "{}", i + 1)?;
            }
            write!(p.out, ") ")?;
            write_val(p.out, val, precision)?;
        }
    }
    Ok(())
}

fn write_val<T: Scalar>(out: &mut dyn fmt::Write, v: T, precision: usize) -> fmt::Result {
    if T::IS_COMPLEX {
        let (re, im) = (v.real_part(), v.imag_part());
        let sign = if im < 0.0 { '-' } else { '+' };
        writeln!(out, "{re:.precision$}{sign}{:.precision$}i", im.abs())
    } else {
        writeln!(out, "{:.precision$}", v.real_part())
    }
}
