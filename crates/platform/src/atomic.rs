//! Relaxed atomic counters.
//!
//! Tables use one shared counter as a weak entropy source (per-table seeds,
//! insertion-order randomization). Only atomicity is guaranteed: concurrent
//! increments are never lost, but no ordering is established between threads.
//!
//! ```
//! use platform::atomic::{Atomic, atomic_inc, new_atomic};
//!
//! let counter: Atomic<usize> = new_atomic(7usize);
//! assert_eq!(atomic_inc(&counter), 7);
//! assert_eq!(atomic_inc(&counter), 8);
//! ```

use core::sync::atomic::Ordering;

mod sealed {
  pub trait Sealed {}
}

/// An integer type with an atomic counterpart.
pub trait AtomicInteger: Copy + sealed::Sealed {
  /// The atomic wrapper for `Self`.
  type Atomic: AtomicCounter<Value = Self>;

  /// Wrap `value` in its atomic counterpart.
  fn new_atomic(value: Self) -> Self::Atomic;
}

/// An atomic integer that supports relaxed increments.
pub trait AtomicCounter: Send + Sync + sealed::Sealed {
  /// The plain integer type.
  type Value: Copy;

  /// Add one (wrapping) with relaxed ordering, returning the previous value.
  fn increment(&self) -> Self::Value;

  /// Read the current value with relaxed ordering.
  fn load_relaxed(&self) -> Self::Value;
}

/// Atomic version of integer type `T` (`Atomic<usize>` is `AtomicUsize`).
pub type Atomic<T> = <T as AtomicInteger>::Atomic;

/// Create an [`Atomic<T>`] holding `value`.
#[inline]
#[must_use]
pub fn new_atomic<T: AtomicInteger>(value: T) -> Atomic<T> {
  T::new_atomic(value)
}

/// Atomically add one to `counter` and return the previous value.
///
/// Relaxed ordering: the update is atomic, nothing else is synchronized.
#[inline(always)]
pub fn atomic_inc<A: AtomicCounter>(counter: &A) -> A::Value {
  counter.increment()
}

macro_rules! impl_atomic {
  ($($width:literal => $int:ty, $atomic:ident;)+) => {$(
    #[cfg(target_has_atomic = $width)]
    impl sealed::Sealed for $int {}

    #[cfg(target_has_atomic = $width)]
    impl sealed::Sealed for core::sync::atomic::$atomic {}

    #[cfg(target_has_atomic = $width)]
    impl AtomicInteger for $int {
      type Atomic = core::sync::atomic::$atomic;

      #[inline]
      fn new_atomic(value: Self) -> Self::Atomic {
        core::sync::atomic::$atomic::new(value)
      }
    }

    #[cfg(target_has_atomic = $width)]
    impl AtomicCounter for core::sync::atomic::$atomic {
      type Value = $int;

      #[inline(always)]
      fn increment(&self) -> $int {
        self.fetch_add(1, Ordering::Relaxed)
      }

      #[inline]
      fn load_relaxed(&self) -> $int {
        self.load(Ordering::Relaxed)
      }
    }
  )+};
}

impl_atomic! {
  "8" => u8, AtomicU8;
  "8" => i8, AtomicI8;
  "16" => u16, AtomicU16;
  "16" => i16, AtomicI16;
  "32" => u32, AtomicU32;
  "32" => i32, AtomicI32;
  "64" => u64, AtomicU64;
  "64" => i64, AtomicI64;
  "ptr" => usize, AtomicUsize;
  "ptr" => isize, AtomicIsize;
}

// ─────────────────────────────────────────────────────────────────────────────
// Weak Entropy
// ─────────────────────────────────────────────────────────────────────────────

/// A cheap, non-cryptographic seed that changes on every call.
///
/// With `std` this bumps a per-thread counter; otherwise a process-wide
/// relaxed counter. Either way the count is mixed with the counter's address,
/// so separate processes (under ASLR) and threads diverge.
#[cfg(any(feature = "std", target_has_atomic = "ptr"))]
#[inline]
#[must_use]
pub fn random_seed() -> usize {
  #[cfg(feature = "std")]
  {
    use core::cell::Cell;

    std::thread_local! {
      static COUNTER: Cell<usize> = const { Cell::new(0) };
    }

    COUNTER.with(|counter| {
      let value = counter.get().wrapping_add(1);
      counter.set(value);
      value ^ core::ptr::from_ref(counter).addr()
    })
  }

  #[cfg(not(feature = "std"))]
  {
    use core::sync::atomic::AtomicUsize;

    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    atomic_inc(&COUNTER) ^ core::ptr::from_ref(&COUNTER).addr()
  }
}

#[cfg(test)]
mod tests {
  use core::sync::atomic::{AtomicI8, AtomicU8, AtomicUsize};

  use super::*;

  #[test]
  fn inc_returns_previous_value() {
    let c: Atomic<usize> = AtomicUsize::new(0);
    assert_eq!(atomic_inc(&c), 0);
    assert_eq!(atomic_inc(&c), 1);
    assert_eq!(c.load_relaxed(), 2);
  }

  #[test]
  fn inc_wraps() {
    let c: Atomic<u8> = AtomicU8::new(u8::MAX);
    assert_eq!(atomic_inc(&c), u8::MAX);
    assert_eq!(c.load_relaxed(), 0);

    let s: Atomic<i8> = AtomicI8::new(i8::MAX);
    atomic_inc(&s);
    assert_eq!(s.load_relaxed(), i8::MIN);
  }

  #[test]
  fn new_atomic_round_trips_initial_value() {
    let c = new_atomic(41u32);
    assert_eq!(c.load_relaxed(), 41);
    atomic_inc(&c);
    assert_eq!(c.load_relaxed(), 42);
  }

  #[test]
  #[cfg(target_has_atomic = "64")]
  fn sixty_four_bit_counters() {
    let c = new_atomic(u64::MAX - 1);
    atomic_inc(&c);
    assert_eq!(c.load_relaxed(), u64::MAX);
  }

  #[test]
  #[cfg(any(feature = "std", target_has_atomic = "ptr"))]
  fn random_seed_changes_between_calls() {
    let a = random_seed();
    let b = random_seed();
    assert_ne!(a, b);
  }
}
