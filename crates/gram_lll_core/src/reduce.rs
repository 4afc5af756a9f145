//! Reduction orchestrator
//!
//! The crate-level entry point: takes a Gram matrix in host representation,
//! runs LLL on a native copy, strips the degenerate part, and returns the
//! reduced Gram matrix together with the transformation rows of the
//! surviving basis vectors, both marshalled back to host objects.

use thiserror::Error;

use crate::convert::{self, MarshalError};
use crate::host::{HostHeap, HostInt};
use crate::lll::{GramLll, LllContext};
use crate::matrix::IntMat;

/// Errors reported before any reduction work starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReduceError {
    #[error(transparent)]
    Marshal(#[from] MarshalError),

    #[error("gram matrix is {rows}×{cols}, expected square")]
    NotSquare { rows: usize, cols: usize },

    #[error("gram matrix is not symmetric")]
    NotSymmetric,
}

/// Result record of a Gram-matrix reduction.
///
/// For n×n input and k surviving basis vectors, `remainder` is the k×k
/// reduced Gram matrix and `transformation` is the k×n matrix of row
/// operations taking the original basis to the surviving one.
#[derive(Debug, Clone)]
pub struct GramReduction {
    pub remainder: Vec<Vec<HostInt>>,
    pub transformation: Vec<Vec<HostInt>>,
}

/// LLL-reduce a Gram matrix given in host representation.
///
/// `delta` is passed through to the reduction routine unchecked; the
/// conventional range is (0.25, 1). Jagged, non-square, or asymmetric
/// input is rejected explicitly. Positive-semidefiniteness is the caller's
/// responsibility and is not verified.
///
/// Every native allocation made here is released before return on every
/// path, and the conversion scratch cache is drained so no cross-call
/// memory accumulates.
pub fn reduce_gram(
    heap: &mut HostHeap,
    gram: &[Vec<HostInt>],
    delta: f64,
) -> Result<GramReduction, ReduceError> {
    let ctx = LllContext::with_delta(delta);

    let mut mat = convert::host_mat_to_native(gram, heap)?;
    if mat.rows() != mat.cols() {
        let (rows, cols) = mat.dims();
        return Err(ReduceError::NotSquare { rows, cols });
    }
    if !mat.is_symmetric() {
        return Err(ReduceError::NotSymmetric);
    }

    let n = mat.rows();
    let mut trans = IntMat::identity(n);

    GramLll::reduce(&mut mat, &mut trans, &ctx);

    // Strip the vanished prefix of the Gram matrix, and keep only the
    // transformation rows of the surviving vectors. Windows borrow the
    // matrices, so they are gone before `mat` and `trans` are dropped.
    let (remainder, transformation) = {
        let w_rem = mat.strip_leading_zero_rows_and_cols();
        let k = w_rem.rows();
        let w_trans = trans.window(n - k, 0, n, n);

        (
            convert::native_to_host_mat(&w_rem, heap),
            convert::native_to_host_mat(&w_trans, heap),
        )
    };

    drop(mat);
    drop(trans);
    convert::drain_limb_cache();

    Ok(GramReduction {
        remainder,
        transformation,
    })
}
