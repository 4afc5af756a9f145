//! Relocatable host heap
//!
//! Models the host object manager that owns big-integer digit buffers.
//! Buffers are addressed by stable [`Handle`]s; the backing storage may be
//! compacted (relocated) by any allocation, so a raw slice obtained from
//! [`HostHeap::digits`] is only valid until the next `&mut` operation. The
//! borrow checker enforces exactly that discipline, which is the safety
//! property the marshalling layer depends on.

/// Digit type of host integers (one machine word, little-endian order).
pub type Limb = u64;

/// Stable reference to a digit buffer in the heap.
///
/// Handles survive compaction; the buffer's address does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handle(usize);

#[derive(Debug, Clone, Copy)]
struct Slot {
    off: usize,
    len: usize,
}

/// Arena of variable-length limb buffers with explicit compaction.
#[derive(Debug, Default)]
pub struct HostHeap {
    store: Vec<Limb>,
    slots: Vec<Slot>,
    stress: bool,
}

impl HostHeap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Heap that compacts on every allocation.
    ///
    /// Used in tests to prove that no caller holds a buffer reference
    /// across an allocation point.
    pub fn with_stress() -> Self {
        Self {
            stress: true,
            ..Self::default()
        }
    }

    /// Copy `digits` into the heap and return a stable handle.
    ///
    /// May relocate every existing buffer.
    pub fn alloc(&mut self, digits: &[Limb]) -> Handle {
        if self.stress {
            self.compact();
        }
        let off = self.store.len();
        self.store.extend_from_slice(digits);
        self.slots.push(Slot {
            off,
            len: digits.len(),
        });
        Handle(self.slots.len() - 1)
    }

    /// Current digits of the buffer behind `h`.
    ///
    /// The returned slice is invalidated by any subsequent `&mut` call.
    pub fn digits(&self, h: Handle) -> &[Limb] {
        let s = self.slots[h.0];
        &self.store[s.off..s.off + s.len]
    }

    /// Length in limbs of the buffer behind `h`.
    pub fn len(&self, h: Handle) -> usize {
        self.slots[h.0].len
    }

    /// Relocate every buffer into a fresh backing store.
    ///
    /// Handles stay valid; offsets change (buffers are repacked in reverse
    /// allocation order so relocation is observable, not a no-op).
    pub fn compact(&mut self) {
        let mut store = Vec::with_capacity(self.store.len());
        for slot in self.slots.iter_mut().rev() {
            let off = store.len();
            store.extend_from_slice(&self.store[slot.off..slot.off + slot.len]);
            slot.off = off;
        }
        self.store = store;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_and_read() {
        let mut heap = HostHeap::new();
        let a = heap.alloc(&[1, 2, 3]);
        let b = heap.alloc(&[7]);

        assert_eq!(heap.digits(a), &[1, 2, 3]);
        assert_eq!(heap.digits(b), &[7]);
        assert_eq!(heap.len(a), 3);
    }

    #[test]
    fn test_compact_preserves_contents() {
        let mut heap = HostHeap::new();
        let a = heap.alloc(&[10, 20]);
        let b = heap.alloc(&[30, 40, 50]);
        let c = heap.alloc(&[60]);

        heap.compact();

        assert_eq!(heap.digits(a), &[10, 20]);
        assert_eq!(heap.digits(b), &[30, 40, 50]);
        assert_eq!(heap.digits(c), &[60]);
    }

    #[test]
    fn test_stress_mode_relocates_on_alloc() {
        let mut heap = HostHeap::with_stress();
        let handles: Vec<Handle> = (0..16).map(|i| heap.alloc(&[i, i + 1])).collect();

        for (i, h) in handles.iter().enumerate() {
            let i = i as Limb;
            assert_eq!(heap.digits(*h), &[i, i + 1]);
        }
    }
}
