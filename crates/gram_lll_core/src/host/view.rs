//! Tagged-integer view
//!
//! A transient, stack-scoped binding of a [`HostInt`] to a sign-magnitude
//! value header, letting conversion code read a host integer's digits in
//! place without copying. Immediate values are served from an inline
//! single-limb scratch field; large values reference the heap buffer by
//! handle and re-derive the limb slice on every [`IntView::resolve`], so a
//! compaction between resolutions can never be observed through a stale
//! address.
//!
//! A view is constructed immediately before one conversion, consulted within
//! that conversion's scope, and discarded. It never owns host memory.

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use super::heap::{Handle, HostHeap, Limb};
use super::int::HostInt;

/// Sign-magnitude header over a host integer's digits.
///
/// `size` is the signed in-use limb count (0 encodes the value zero);
/// `alloc` is the allocation length, always ≥ `|size|`.
#[derive(Debug)]
pub struct IntView {
    size: isize,
    alloc: usize,
    scratch: Limb,
    obj: Option<Handle>,
}

impl IntView {
    /// Bind a view to `op`. Pure bookkeeping: no digits are copied.
    pub fn bind(op: &HostInt, heap: &HostHeap) -> Self {
        match *op {
            HostInt::Small(v) => IntView {
                size: match v {
                    0 => 0,
                    _ if v > 0 => 1,
                    _ => -1,
                },
                alloc: 1,
                scratch: v.unsigned_abs(),
                obj: None,
            },
            HostInt::Large { negative, digits } => {
                let len = heap.len(digits);
                IntView {
                    size: if negative { -(len as isize) } else { len as isize },
                    alloc: len,
                    scratch: 0,
                    obj: Some(digits),
                }
            }
        }
    }

    /// Re-derive the working limb slice from the heap's current state.
    ///
    /// Must be called fresh before every read; the result must never be
    /// cached across an operation that could allocate (and therefore
    /// relocate). The borrow returned here cannot coexist with a `&mut`
    /// heap operation, so that rule is compiler-enforced.
    pub fn resolve<'a>(&'a self, heap: &'a HostHeap) -> LimbRef<'a> {
        let limbs = match self.obj {
            Some(h) => heap.digits(h),
            None => std::slice::from_ref(&self.scratch),
        };
        LimbRef {
            limbs: &limbs[..self.size.unsigned_abs()],
            negative: self.size < 0,
        }
    }

    /// Signed in-use limb count.
    pub fn size(&self) -> isize {
        self.size
    }

    /// Allocation length in limbs.
    pub fn alloc_len(&self) -> usize {
        self.alloc
    }
}

/// A resolved view: sign plus little-endian magnitude limbs borrowed from
/// the heap (or from the view's inline scratch).
#[derive(Debug, Clone, Copy)]
pub struct LimbRef<'a> {
    limbs: &'a [Limb],
    negative: bool,
}

impl LimbRef<'_> {
    pub fn limbs(&self) -> &[Limb] {
        self.limbs
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Assemble the referenced value into an owned big integer.
    pub fn to_bigint(&self) -> BigInt {
        let mut mag = BigUint::zero();
        for &limb in self.limbs.iter().rev() {
            mag = (mag << 64u32) | BigUint::from(limb);
        }
        let mag = BigInt::from(mag);
        if self.negative {
            -mag
        } else {
            mag
        }
    }
}
