//! Storage-level operation handlers.
//!
//! Each handler implements one cell of the dispatch matrix:
//!
//! ```text
//! Level 1: Task / PairTask descriptor
//!     → dispatch selects the handler by storage kind
//!
//! Level 2: Handler (this module)
//!     → mutate in place, or replace the slot through ManageStore
//!
//! Level 3: Kernels (blas, view::transform, contract)
//! ```
//!
//! Handlers named `*_promote` receive a real slot and install a complex
//! buffer in its place.

pub(crate) mod element;
pub(crate) mod elementwise;
pub(crate) mod plus_eq;
pub(crate) mod reduce;
