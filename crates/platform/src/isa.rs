//! SIMD capability flags for SwissTable group probing.
//!
//! Two levels matter to the table: SSE2 (16-byte control groups) and SSSE3
//! (`pshufb`/`psignb` shortcuts on top of SSE2). Each flag is resolved by the
//! build script as:
//!
//! 1. `SWISS_HAVE_SSE2` / `SWISS_HAVE_SSSE3` when set (see [`config`](crate::config)),
//! 2. otherwise `target_feature = "sse2"` / `"ssse3"`.
//!
//! SSSE3 without SSE2 matches no real CPU and stops the build.
//!
//! # Intrinsics
//!
//! [`sse2`] and [`ssse3`] re-export the intrinsics table code needs, and exist
//! only when the matching flag is on for an x86 target.
//!
//! ```
//! use platform::isa;
//!
//! if isa::HAVE_SSSE3 {
//!   assert!(isa::HAVE_SSE2);
//! }
//! assert_eq!(isa::GROUP_WIDTH, if isa::HAVE_SSE2 { 16 } else { 8 });
//! ```

use core::fmt;

use crate::config::{self, ConfigError};

/// SSE2 is available.
pub const HAVE_SSE2: bool = cfg!(swiss_sse2);

/// SSSE3 is available. Implies [`HAVE_SSE2`].
pub const HAVE_SSSE3: bool = cfg!(swiss_ssse3);

/// Bytes of control metadata probed per group.
pub const GROUP_WIDTH: usize = if HAVE_SSE2 { 16 } else { 8 };

#[cfg(all(swiss_ssse3, not(swiss_sse2)))]
compile_error!("bad configuration: SSSE3 implies SSE2");

const _: () = IsaConfig::CURRENT.assert_valid();

// ─────────────────────────────────────────────────────────────────────────────
// Resolved Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Where a flag's value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Source {
  /// Set explicitly through an override variable.
  Override,
  /// Derived from the target's enabled features.
  Detected,
}

impl Source {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Override => "override",
      Self::Detected => "detected",
    }
  }
}

impl fmt::Display for Source {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Provenance of [`HAVE_SSE2`].
pub const SSE2_SOURCE: Source = if cfg!(swiss_sse2_override) { Source::Override } else { Source::Detected };

/// Provenance of [`HAVE_SSSE3`].
pub const SSSE3_SOURCE: Source = if cfg!(swiss_ssse3_override) { Source::Override } else { Source::Detected };

/// A validated pair of SIMD flags.
///
/// Only valid combinations can be constructed. In a `const`, an invalid one is
/// a compile error:
///
/// ```compile_fail
/// use platform::isa::IsaConfig;
///
/// const BAD: IsaConfig = IsaConfig::new(false, true);
/// ```
///
/// An override replaces detection entirely, including turning a detected
/// feature off:
///
/// ```
/// use platform::isa::IsaConfig;
///
/// let cfg = IsaConfig::resolve(Some(false), true, Some(false), true);
/// assert_eq!(cfg, Ok(IsaConfig::new(false, false)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IsaConfig {
  sse2: bool,
  ssse3: bool,
}

impl IsaConfig {
  /// The configuration this crate was built with.
  pub const CURRENT: Self = Self {
    sse2: HAVE_SSE2,
    ssse3: HAVE_SSSE3,
  };

  /// Portable configuration: no SIMD.
  pub const NONE: Self = Self::new(false, false);

  /// Build a configuration, panicking on SSSE3 without SSE2.
  ///
  /// # Panics
  ///
  /// Panics (or fails const evaluation) if `ssse3 && !sse2`.
  #[must_use]
  pub const fn new(sse2: bool, ssse3: bool) -> Self {
    match Self::try_new(sse2, ssse3) {
      Ok(cfg) => cfg,
      Err(err) => panic!("{}", err.message()),
    }
  }

  /// Build a configuration, rejecting SSSE3 without SSE2.
  pub const fn try_new(sse2: bool, ssse3: bool) -> Result<Self, ConfigError> {
    match config::check_isa(sse2, ssse3) {
      Ok(()) => Ok(Self { sse2, ssse3 }),
      Err(err) => Err(err),
    }
  }

  /// Apply overrides to detected values, then validate.
  ///
  /// This is the same resolution the build script performs.
  pub const fn resolve(
    sse2_override: Option<bool>,
    sse2_detected: bool,
    ssse3_override: Option<bool>,
    ssse3_detected: bool,
  ) -> Result<Self, ConfigError> {
    Self::try_new(
      config::resolve_flag(sse2_override, sse2_detected),
      config::resolve_flag(ssse3_override, ssse3_detected),
    )
  }

  #[inline]
  #[must_use]
  pub const fn sse2(self) -> bool {
    self.sse2
  }

  #[inline]
  #[must_use]
  pub const fn ssse3(self) -> bool {
    self.ssse3
  }

  /// Group width a table built for this configuration uses.
  #[inline]
  #[must_use]
  pub const fn group_width(self) -> usize {
    if self.sse2 { 16 } else { 8 }
  }

  const fn assert_valid(self) {
    if let Err(err) = config::check_isa(self.sse2, self.ssse3) {
      panic!("{}", err.message());
    }
  }
}

impl Default for IsaConfig {
  #[inline]
  fn default() -> Self {
    Self::CURRENT
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Intrinsics
// ─────────────────────────────────────────────────────────────────────────────

/// SSE2 intrinsics used for 16-wide group matching.
#[cfg(all(swiss_sse2, any(target_arch = "x86", target_arch = "x86_64")))]
pub mod sse2 {
  #[cfg(target_arch = "x86")]
  pub use core::arch::x86::{
    __m128i, _mm_and_si128, _mm_andnot_si128, _mm_cmpeq_epi8, _mm_cmpgt_epi8, _mm_loadu_si128, _mm_movemask_epi8,
    _mm_or_si128, _mm_set1_epi8, _mm_setzero_si128, _mm_storeu_si128, _mm_subs_epi8,
  };
  #[cfg(target_arch = "x86_64")]
  pub use core::arch::x86_64::{
    __m128i, _mm_and_si128, _mm_andnot_si128, _mm_cmpeq_epi8, _mm_cmpgt_epi8, _mm_loadu_si128, _mm_movemask_epi8,
    _mm_or_si128, _mm_set1_epi8, _mm_setzero_si128, _mm_storeu_si128, _mm_subs_epi8,
  };
}

/// SSSE3 intrinsics used for empty-slot matching and control conversion.
#[cfg(all(swiss_ssse3, any(target_arch = "x86", target_arch = "x86_64")))]
pub mod ssse3 {
  #[cfg(target_arch = "x86")]
  pub use core::arch::x86::{_mm_shuffle_epi8, _mm_sign_epi8};
  #[cfg(target_arch = "x86_64")]
  pub use core::arch::x86_64::{_mm_shuffle_epi8, _mm_sign_epi8};
}
