//! Host ↔ native conversions
//!
//! One-shot conversions between host tagged integers and owned big integers,
//! and the matrix marshalling built on top of them. Host-to-native goes
//! through an [`IntView`] so digits are read in place; native-to-host always
//! allocates fresh host objects and never aliases native storage.
//!
//! Native-to-host conversion reuses one scratch limb buffer across all cells
//! of a matrix. Its capacity is kept in a thread-local cache between calls;
//! [`drain_limb_cache`] releases it so no cross-invocation memory
//! accumulates.

use std::cell::RefCell;

use num_bigint::{BigInt, Sign};
use thiserror::Error;

use crate::host::{HostHeap, HostInt, IntView, Limb};
use crate::matrix::{IntMat, MatWindow};

/// Errors reported by the marshalling boundary.
///
/// The boundary validates what the native layer would otherwise trust
/// blindly; entry types are already enforced by [`HostInt`] itself.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarshalError {
    #[error("row {row} has {found} entries, expected {expected} (matrix must be rectangular)")]
    JaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

thread_local! {
    static LIMB_SCRATCH: RefCell<Vec<Limb>> = RefCell::new(Vec::new());
}

/// Release the thread-local scratch buffer kept by [`entry_to_host`].
pub fn drain_limb_cache() {
    LIMB_SCRATCH.with(|cell| {
        *cell.borrow_mut() = Vec::new();
    });
}

/// Host integer → owned big integer.
///
/// Binds a view, resolves it against the heap's current state, and
/// assembles the value. Total for every well-formed [`HostInt`].
pub fn host_to_entry(op: &HostInt, heap: &HostHeap) -> BigInt {
    let view = IntView::bind(op, heap);
    view.resolve(heap).to_bigint()
}

/// Big integer → fresh host integer.
///
/// Zero maps to the immediate zero with no sign artifact; immediate-range
/// magnitudes normalize to `Small`. The result never references `v`'s
/// storage.
pub fn entry_to_host(v: &BigInt, heap: &mut HostHeap) -> HostInt {
    LIMB_SCRATCH.with(|cell| {
        let mut scratch = cell.borrow_mut();
        scratch.clear();
        scratch.extend(v.iter_u64_digits());
        HostInt::from_limbs(v.sign() == Sign::Minus, &scratch, heap)
    })
}

/// Host nested-sequence matrix → native dense matrix.
///
/// Row count is the outer length; column count is row 1's length (0 for an
/// empty matrix). A row of any other length is rejected rather than read
/// out of bounds.
pub fn host_mat_to_native(
    mat: &[Vec<HostInt>],
    heap: &HostHeap,
) -> Result<IntMat, MarshalError> {
    let rows = mat.len();
    let cols = if rows > 0 { mat[0].len() } else { 0 };

    let mut data = Vec::with_capacity(rows * cols);
    for (i, row) in mat.iter().enumerate() {
        if row.len() != cols {
            return Err(MarshalError::JaggedRow {
                row: i,
                expected: cols,
                found: row.len(),
            });
        }
        for op in row {
            data.push(host_to_entry(op, heap));
        }
    }
    Ok(IntMat::from_flat(data, rows, cols))
}

/// Native matrix window → host nested-sequence matrix.
///
/// Allocates one outer sequence and one inner sequence per row; every cell
/// is a fresh host object.
pub fn native_to_host_mat(win: &MatWindow<'_>, heap: &mut HostHeap) -> Vec<Vec<HostInt>> {
    (0..win.rows())
        .map(|i| {
            (0..win.cols())
                .map(|j| entry_to_host(win.get(i, j), heap))
                .collect()
        })
        .collect()
}

/// Build a host matrix from plain integer rows (test and caller convenience).
pub fn host_mat_from_rows<T: Into<BigInt> + Clone>(
    rows: &[Vec<T>],
    heap: &mut HostHeap,
) -> Vec<Vec<HostInt>> {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|v| {
                    let v: BigInt = v.clone().into();
                    entry_to_host(&v, heap)
                })
                .collect()
        })
        .collect()
}

/// Read a host matrix back into plain big-integer rows.
pub fn host_mat_to_rows(mat: &[Vec<HostInt>], heap: &HostHeap) -> Vec<Vec<BigInt>> {
    mat.iter()
        .map(|row| row.iter().map(|op| host_to_entry(op, heap)).collect())
        .collect()
}
