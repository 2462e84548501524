//! Code-generation hints that never change behavior.
//!
//! - [`likely`] / [`unlikely`]: branch-layout hints on a `bool`.
//! - [`always_inline!`](crate::always_inline) / [`never_inline!`](crate::never_inline):
//!   inlining requests attached to whole items.
//! - [`prefetch`]: cache prefetch of an address that is never dereferenced.
//!
//! Where the target has no suitable instruction the hint is an identity or a
//! no-op. That fallback is the defined behavior, not an error: every function
//! here compiles on every target.

// SAFETY: This module issues prefetch instructions, which require unsafe.
// Prefetches are hints to the CPU and cannot cause memory unsafety; invalid
// addresses are silently ignored.
#![allow(unsafe_code)]

// ─────────────────────────────────────────────────────────────────────────────
// Availability
// ─────────────────────────────────────────────────────────────────────────────

/// Branch hints influence code layout on every rustc target.
pub const HAVE_BRANCH_HINTS: bool = true;

/// `#[inline(always)]` / `#[inline(never)]` are honored on every rustc target.
pub const HAVE_INLINE_HINTS: bool = true;

/// A prefetch instruction is emitted on this target.
pub const HAVE_PREFETCH: bool = cfg!(any(
  target_arch = "x86_64",
  all(target_arch = "x86", target_feature = "sse"),
  target_arch = "aarch64"
));

// ─────────────────────────────────────────────────────────────────────────────
// Branch Prediction
// ─────────────────────────────────────────────────────────────────────────────

#[cold]
#[inline(never)]
const fn cold_path() {}

/// `b`, with the hint that it is usually `true`.
#[inline(always)]
#[must_use]
pub const fn likely(b: bool) -> bool {
  if !b {
    cold_path();
  }
  b
}

/// `b`, with the hint that it is usually `false`.
#[inline(always)]
#[must_use]
pub const fn unlikely(b: bool) -> bool {
  if b {
    cold_path();
  }
  b
}

// ─────────────────────────────────────────────────────────────────────────────
// Inlining
// ─────────────────────────────────────────────────────────────────────────────

/// Mark every item in the block `#[inline(always)]`.
///
/// ```
/// platform::always_inline! {
///   fn h2(hash: u64) -> u8 {
///     (hash & 0x7f) as u8
///   }
/// }
/// assert_eq!(h2(0xff), 0x7f);
/// ```
#[macro_export]
macro_rules! always_inline {
  ($($item:item)*) => {
    $(
      #[inline(always)]
      $item
    )*
  };
}

/// Mark every item in the block `#[inline(never)]`.
///
/// Useful for slow paths (rehash, resize) that would bloat their callers.
#[macro_export]
macro_rules! never_inline {
  ($($item:item)*) => {
    $(
      #[inline(never)]
      $item
    )*
  };
}

// ─────────────────────────────────────────────────────────────────────────────
// Prefetch
// ─────────────────────────────────────────────────────────────────────────────

/// Expected temporal locality of prefetched data.
///
/// Ordered like the conventional 0..=3 locality scale: `None` is streaming
/// data touched once, `High` should stay in every cache level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Locality {
  /// Non-temporal: bypass or evict quickly.
  None = 0,
  /// Keep in the outermost cache.
  Low = 1,
  /// Keep in L2 and beyond.
  Moderate = 2,
  /// Keep in all cache levels.
  #[default]
  High = 3,
}

impl Locality {
  /// Map a 0..=3 level onto a locality, saturating above 3.
  #[inline]
  #[must_use]
  pub const fn from_level(level: u8) -> Self {
    match level {
      0 => Self::None,
      1 => Self::Low,
      2 => Self::Moderate,
      _ => Self::High,
    }
  }
}

/// Hint that the memory at `ptr` will be read soon.
///
/// Never dereferences `ptr`: null, dangling, or unaligned pointers are fine and
/// simply make the hint useless. A no-op where [`HAVE_PREFETCH`] is false.
#[inline(always)]
pub fn prefetch<T>(ptr: *const T, locality: Locality) {
  #[cfg(any(target_arch = "x86_64", all(target_arch = "x86", target_feature = "sse")))]
  {
    #[cfg(target_arch = "x86")]
    use core::arch::x86::{_MM_HINT_NTA, _MM_HINT_T0, _MM_HINT_T1, _MM_HINT_T2, _mm_prefetch};
    #[cfg(target_arch = "x86_64")]
    use core::arch::x86_64::{_MM_HINT_NTA, _MM_HINT_T0, _MM_HINT_T1, _MM_HINT_T2, _mm_prefetch};

    let p = ptr.cast::<i8>();
    // SAFETY: `prefetcht*`/`prefetchnta` never fault and SSE is enabled on this target.
    unsafe {
      match locality {
        Locality::None => _mm_prefetch::<_MM_HINT_NTA>(p),
        Locality::Low => _mm_prefetch::<_MM_HINT_T2>(p),
        Locality::Moderate => _mm_prefetch::<_MM_HINT_T1>(p),
        Locality::High => _mm_prefetch::<_MM_HINT_T0>(p),
      }
    }
  }

  #[cfg(target_arch = "aarch64")]
  {
    // SAFETY: PRFM is a hint; it never faults, even on unmapped addresses.
    unsafe {
      match locality {
        Locality::None => core::arch::asm!(
          "prfm pldl1strm, [{ptr}]",
          ptr = in(reg) ptr,
          options(nostack, preserves_flags, readonly)
        ),
        Locality::Low => core::arch::asm!(
          "prfm pldl3keep, [{ptr}]",
          ptr = in(reg) ptr,
          options(nostack, preserves_flags, readonly)
        ),
        Locality::Moderate => core::arch::asm!(
          "prfm pldl2keep, [{ptr}]",
          ptr = in(reg) ptr,
          options(nostack, preserves_flags, readonly)
        ),
        Locality::High => core::arch::asm!(
          "prfm pldl1keep, [{ptr}]",
          ptr = in(reg) ptr,
          options(nostack, preserves_flags, readonly)
        ),
      }
    }
  }

  #[cfg(not(any(
    target_arch = "x86_64",
    all(target_arch = "x86", target_feature = "sse"),
    target_arch = "aarch64"
  )))]
  {
    let _ = (ptr, locality);
  }
}
