//! Compile-time platform layer for SwissTable-style hash tables.
//!
//! Everything here is decided when the crate is built. Table code asks this
//! crate instead of sprinkling its own `cfg`s.
//!
//! # Modules
//!
//! - [`compiler`]: which C toolchain pairs with this build (Clang, GCC, MSVC).
//! - [`linkage`]: C or Rust linkage for [`export_boundary!`] groups.
//! - [`isa`]: SSE2/SSSE3 availability, with environment overrides.
//! - [`atomic`]: relaxed atomic counters.
//! - [`check`]: fatal [`check!`] and debug-only [`dcheck!`].
//! - [`hints`]: branch, inlining, and prefetch hints.
//! - [`caps`]: all of the above in one [`Capabilities`] value.
//!
//! # Example
//!
//! ```
//! use platform::{atomic, hints, isa};
//!
//! let counter = atomic::new_atomic(0usize);
//! let seed = atomic::atomic_inc(&counter);
//!
//! let ctrl = [0x80u8; isa::GROUP_WIDTH];
//! hints::prefetch(ctrl.as_ptr(), hints::Locality::High);
//!
//! platform::check!(ctrl.len().is_power_of_two(), "group width {} is not a power of two", ctrl.len());
//! if hints::unlikely(seed != 0) {
//!   unreachable!();
//! }
//! ```
//!
//! # Features
//!
//! - `std` (default): failed checks write to stderr and abort. Without it they
//!   panic with the same text.
//! - `ffi`: exported groups use C linkage.
//! - `log`: failed checks are also sent to the `log` facade.

#![no_std]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

#[cfg(feature = "std")]
extern crate std;

// ─────────────────────────────────────────────────────────────────────────────
// Core modules
// ─────────────────────────────────────────────────────────────────────────────

pub mod atomic;
pub mod caps;
pub mod check;
pub mod compiler;
pub mod config;
pub mod ffi;
pub mod hints;
pub mod isa;
pub mod linkage;

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

pub use caps::{Arch, Capabilities};
pub use compiler::Compiler;
pub use isa::IsaConfig;
pub use linkage::Linkage;

/// Compile-time capabilities of this build.
#[inline]
#[must_use]
pub const fn capabilities() -> Capabilities {
  Capabilities::CURRENT
}
