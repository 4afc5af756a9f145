//! Gram-Matrix LLL Core Library
//!
//! Exposes LLL lattice-basis reduction over Gram matrices to a host object
//! layer, with exact big-integer marshalling in both directions.
//!
//! # Overview
//!
//! The engineering center of this crate is the boundary between two
//! independently designed integer representations: the host's tagged
//! integers (immediate values or relocatable digit buffers) and the native
//! side's owned big integers. Conversions go through a transient view that
//! re-resolves buffer addresses on every access, so host heap compaction
//! can never be observed through a stale reference.
//!
//! # Key Components
//!
//! - [`host`] - tagged integers, relocatable heap, and the digit view
//! - [`convert`] - integer and matrix marshalling across the boundary
//! - [`matrix`] - dense big-integer matrices and non-owning windows
//! - [`gram_schmidt`] - exact rational orthogonalization from Gram data
//! - [`lll`] - the in-place Gram-matrix LLL routine
//! - [`reduce`] - the orchestrated reduce-strip-package entry point
//!
//! # Example
//!
//! ```
//! use gram_lll_core::{reduce_gram, HostHeap};
//! use gram_lll_core::convert::host_mat_from_rows;
//!
//! let mut heap = HostHeap::new();
//! let gram = host_mat_from_rows(&[vec![2i64, 1], vec![1, 2]], &mut heap);
//!
//! let res = reduce_gram(&mut heap, &gram, 0.99).unwrap();
//! assert_eq!(res.remainder.len(), 2);
//! assert_eq!(res.transformation.len(), 2);
//! ```

pub mod convert;
pub mod gram_schmidt;
pub mod host;
pub mod lll;
pub mod matrix;
pub mod reduce;

pub use convert::{
    drain_limb_cache, entry_to_host, host_mat_to_native, host_to_entry, native_to_host_mat,
    MarshalError,
};
pub use gram_schmidt::GramSchmidt;
pub use host::{Handle, HostHeap, HostInt, IntView, Limb, LimbRef};
pub use lll::{GramLll, LllContext, LllStats};
pub use matrix::{IntMat, MatWindow};
pub use reduce::{reduce_gram, GramReduction, ReduceError};
