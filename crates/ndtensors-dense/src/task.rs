//! Operation descriptors.
//!
//! A task names one operation together with its arguments. Single-operand
//! tasks are collected in [`Task`], two-operand tasks in [`PairTask`]; both
//! are run against storage by [`crate::dispatch`]. Some tasks carry output
//! fields (result index set, scale factor) that the handler fills in.

use std::fmt;

use crate::index::IndexSet;
use crate::io::StorageWriter;
use crate::print::PrintConfig;
use crate::scalar::c64;

/// Read the element at a multi-index.
#[derive(Debug, Clone, Copy)]
pub struct GetElt<'a> {
    pub is: &'a IndexSet,
    pub inds: &'a [usize],
}

impl<'a> GetElt<'a> {
    pub fn new(is: &'a IndexSet, inds: &'a [usize]) -> Self {
        Self { is, inds }
    }
}

/// Write one element at a multi-index.
#[derive(Debug, Clone, Copy)]
pub struct SetElt<'a, V> {
    pub is: &'a IndexSet,
    pub inds: &'a [usize],
    pub elt: V,
}

impl<'a, V> SetElt<'a, V> {
    pub fn new(is: &'a IndexSet, inds: &'a [usize], elt: V) -> Self {
        Self { is, inds, elt }
    }
}

/// Overwrite every element with one value.
#[derive(Debug, Clone, Copy)]
pub struct Fill<V> {
    pub value: V,
}

/// Multiply every element by one value.
#[derive(Debug, Clone, Copy)]
pub struct Mult<V> {
    pub value: V,
}

/// Render a human-readable description of the data.
pub struct PrintIt<'a> {
    pub is: &'a IndexSet,
    /// Applied to every printed value.
    pub scalefac: f64,
    pub print_data: bool,
    pub config: &'a PrintConfig,
    pub out: &'a mut dyn fmt::Write,
}

impl<'a> PrintIt<'a> {
    pub fn new(is: &'a IndexSet, config: &'a PrintConfig, out: &'a mut dyn fmt::Write) -> Self {
        Self {
            is,
            scalefac: 1.0,
            print_data: true,
            config,
            out,
        }
    }
}

/// Hand the storage to a serializer.
pub struct WriteIt<'a> {
    pub out: &'a mut dyn StorageWriter,
}

/// Contract two operands over their shared indices.
///
/// `result` may be set by the caller to fix the output axis order;
/// otherwise it is filled in. `scalefac` is set when the output holds more
/// than one element.
#[derive(Debug, Clone)]
pub struct Contract<'a> {
    pub lis: &'a IndexSet,
    pub ris: &'a IndexSet,
    pub result: Option<IndexSet>,
    pub scalefac: Option<f64>,
}

impl<'a> Contract<'a> {
    pub fn new(lis: &'a IndexSet, ris: &'a IndexSet) -> Self {
        Self {
            lis,
            ris,
            result: None,
            scalefac: None,
        }
    }

    /// Contract into a caller-chosen result axis order.
    pub fn with_result(lis: &'a IndexSet, ris: &'a IndexSet, result: IndexSet) -> Self {
        Self {
            result: Some(result),
            ..Self::new(lis, ris)
        }
    }
}

/// Product that keeps shared indices instead of summing them.
///
/// `result` and `scalefac` are outputs.
#[derive(Debug, Clone)]
pub struct NCProd<'a> {
    pub lis: &'a IndexSet,
    pub ris: &'a IndexSet,
    pub result: Option<IndexSet>,
    pub scalefac: Option<f64>,
}

impl<'a> NCProd<'a> {
    pub fn new(lis: &'a IndexSet, ris: &'a IndexSet) -> Self {
        Self {
            lis,
            ris,
            result: None,
            scalefac: None,
        }
    }
}

/// `dest += fac * permute(src, perm)`.
///
/// `perm[i]` is the destination axis of source axis `i`.
#[derive(Debug, Clone, Copy)]
pub struct PlusEq<'a> {
    pub is1: &'a IndexSet,
    pub is2: &'a IndexSet,
    pub perm: &'a [usize],
    pub fac: f64,
}

impl<'a> PlusEq<'a> {
    pub fn new(is1: &'a IndexSet, is2: &'a IndexSet, perm: &'a [usize], fac: f64) -> Self {
        Self { is1, is2, perm, fac }
    }
}

/// Operations on a single storage slot.
pub enum Task<'a> {
    GetElt(GetElt<'a>),
    SetReal(SetElt<'a, f64>),
    SetCplx(SetElt<'a, c64>),
    FillReal(Fill<f64>),
    FillCplx(Fill<c64>),
    MultReal(Mult<f64>),
    MultCplx(Mult<c64>),
    NormNoScale,
    Conj,
    TakeReal,
    TakeImag,
    SumEls,
    Print(PrintIt<'a>),
    Write(WriteIt<'a>),
}

/// Operations combining two storage slots. The first slot may be replaced.
#[derive(Debug, Clone)]
pub enum PairTask<'a> {
    Contract(Contract<'a>),
    NCProd(NCProd<'a>),
    PlusEq(PlusEq<'a>),
}

/// Value returned by a dispatched task.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TaskOutput {
    #[default]
    None,
    Real(f64),
    Cplx(c64),
}

impl TaskOutput {
    pub fn real(self) -> Option<f64> {
        match self {
            TaskOutput::Real(r) => Some(r),
            _ => None,
        }
    }

    /// The value as complex; real outputs are widened.
    pub fn cplx(self) -> Option<c64> {
        match self {
            TaskOutput::Real(r) => Some(c64::new(r, 0.0)),
            TaskOutput::Cplx(z) => Some(z),
            TaskOutput::None => None,
        }
    }

    pub fn is_none(self) -> bool {
        matches!(self, TaskOutput::None)
    }
}
