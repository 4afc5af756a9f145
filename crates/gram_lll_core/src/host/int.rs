//! Tagged host integers
//!
//! A host integer is either an immediate signed value or a reference to a
//! sign-magnitude digit buffer owned by the [`HostHeap`]. Constructors
//! normalize: a magnitude that fits the immediate range is always stored
//! inline, and large magnitudes are stored with a nonzero top limb.

use num_bigint::{BigInt, Sign};

use super::heap::{Handle, HostHeap, Limb};

/// Largest magnitude stored as an immediate value.
///
/// Hosts reserve low tag bits in an immediate word, so the usable range is
/// narrower than the machine word. We model a host reserving 3 bits.
pub const IMMEDIATE_MAX: i64 = (1 << 60) - 1;

/// A host-owned integer: immediate value or heap digit buffer.
///
/// Invariants maintained by the constructors: `Large` magnitudes have a
/// nonzero top limb and do not fit the immediate range; the sign of zero
/// is always positive (zero is `Small(0)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostInt {
    Small(i64),
    Large { negative: bool, digits: Handle },
}

impl HostInt {
    /// Host integer from a machine integer.
    pub fn from_i64(v: i64, heap: &mut HostHeap) -> Self {
        if (-IMMEDIATE_MAX..=IMMEDIATE_MAX).contains(&v) {
            HostInt::Small(v)
        } else {
            Self::from_limbs(v < 0, &[v.unsigned_abs()], heap)
        }
    }

    /// Fresh host integer from a sign and little-endian magnitude limbs.
    ///
    /// Drops high zero limbs and demotes immediate-range values to `Small`,
    /// so `(false, &[])` and `(true, &[0])` both produce zero.
    pub fn from_limbs(negative: bool, limbs: &[Limb], heap: &mut HostHeap) -> Self {
        let mut len = limbs.len();
        while len > 0 && limbs[len - 1] == 0 {
            len -= 1;
        }
        match &limbs[..len] {
            [] => HostInt::Small(0),
            &[l] if l <= IMMEDIATE_MAX as u64 => {
                let v = l as i64;
                HostInt::Small(if negative { -v } else { v })
            }
            mag => HostInt::Large {
                negative,
                digits: heap.alloc(mag),
            },
        }
    }

    /// Fresh host integer with the value of `v`.
    pub fn from_bigint(v: &BigInt, heap: &mut HostHeap) -> Self {
        let (sign, mag) = v.to_u64_digits();
        Self::from_limbs(sign == Sign::Minus, &mag, heap)
    }
}
