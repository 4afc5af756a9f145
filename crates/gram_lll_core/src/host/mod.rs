//! Host object layer
//!
//! Models the pieces of a computer-algebra host that the marshalling layer
//! touches: a relocatable heap of digit buffers, tagged integers that are
//! either immediate or heap-backed, and the transient view that exposes a
//! tagged integer's digits to conversion code.
//!
//! # Key Components
//!
//! - [`HostHeap`] - relocatable arena owning digit buffers
//! - [`HostInt`] - tagged integer (immediate or heap-backed)
//! - [`IntView`] - stack-scoped sign-magnitude view over a tagged integer

pub mod heap;
pub mod int;
pub mod view;

pub use heap::{Handle, HostHeap, Limb};
pub use int::{HostInt, IMMEDIATE_MAX};
pub use view::{IntView, LimbRef};
