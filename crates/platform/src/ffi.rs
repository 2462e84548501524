//! C-callable view of the platform layer.
//!
//! With the `ffi` feature these are unmangled `extern "C"` symbols that C table
//! code can link against:
//!
//! ```c
//! typedef struct {
//!   bool clang, gcc_like, msvc_like;
//!   bool sse2, ssse3, debug_checks, prefetch;
//! } SwissRawCapabilities;
//!
//! SwissRawCapabilities swiss_platform_capabilities(void);
//! size_t swiss_platform_random_seed(void);
//! ```
//!
//! Without it they are ordinary Rust functions.

// SAFETY: `export_boundary!` emits `#[unsafe(no_mangle)]` under the `ffi` feature.
#![allow(unsafe_code)]

use crate::caps::Capabilities;

/// [`Capabilities`] flattened to a C-compatible struct.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct RawCapabilities {
  pub clang: bool,
  pub gcc_like: bool,
  pub msvc_like: bool,
  pub sse2: bool,
  pub ssse3: bool,
  pub debug_checks: bool,
  pub prefetch: bool,
}

impl From<Capabilities> for RawCapabilities {
  fn from(caps: Capabilities) -> Self {
    Self {
      clang: caps.compiler.is_clang(),
      gcc_like: caps.compiler.is_gcc_like(),
      msvc_like: caps.compiler.is_msvc_like(),
      sse2: caps.sse2,
      ssse3: caps.ssse3,
      debug_checks: caps.debug_checks,
      prefetch: caps.prefetch,
    }
  }
}

crate::export_boundary! {
  /// Capabilities of this build.
  #[must_use]
  pub fn swiss_platform_capabilities() -> RawCapabilities {
    RawCapabilities::from(Capabilities::CURRENT)
  }

  /// A weak per-call seed for table hashing.
  #[cfg(any(feature = "std", target_has_atomic = "ptr"))]
  #[must_use]
  pub fn swiss_platform_random_seed() -> usize {
    crate::atomic::random_seed()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn raw_matches_summary() {
    let raw = swiss_platform_capabilities();
    let caps = Capabilities::CURRENT;
    assert_eq!(raw.sse2, caps.sse2);
    assert_eq!(raw.ssse3, caps.ssse3);
    assert_eq!(raw.clang, crate::compiler::IS_CLANG);
    assert_eq!(raw.gcc_like, crate::compiler::IS_GCC_LIKE);
    assert_eq!(raw.msvc_like, crate::compiler::IS_MSVC_LIKE);
    assert_eq!(raw.debug_checks, cfg!(debug_assertions));
    assert_eq!(raw.prefetch, crate::hints::HAVE_PREFETCH);
  }

  #[test]
  #[cfg(any(feature = "std", target_has_atomic = "ptr"))]
  fn seeds_differ() {
    assert_ne!(swiss_platform_random_seed(), swiss_platform_random_seed());
  }

  #[test]
  fn layout_is_one_byte_per_flag() {
    assert_eq!(core::mem::size_of::<RawCapabilities>(), 7);
    assert_eq!(core::mem::align_of::<RawCapabilities>(), 1);
  }

  #[cfg(feature = "ffi")]
  #[test]
  fn exported_with_c_abi() {
    let caps: extern "C" fn() -> RawCapabilities = swiss_platform_capabilities;
    assert_eq!(caps(), RawCapabilities::from(Capabilities::CURRENT));
  }
}
