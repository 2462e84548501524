//! One-stop summary of what this build of the platform layer provides.
//!
//! Every field is fixed at compile time. [`Capabilities::CURRENT`] gathers the
//! per-module constants so callers (and the C export) can report them in one
//! place:
//!
//! ```
//! let caps = platform::capabilities();
//! assert_eq!(caps.arch, platform::Arch::current());
//! assert!(!caps.ssse3 || caps.sse2);
//! ```

use core::fmt;

use crate::{check, compiler::Compiler, hints, isa, linkage::Linkage};

// ─────────────────────────────────────────────────────────────────────────────
// Architecture Identification
// ─────────────────────────────────────────────────────────────────────────────

/// Target architecture enumeration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Arch {
  X86_64,
  X86,
  Aarch64,
  Arm,
  Riscv64,
  Wasm32,
  #[default]
  Other,
}

impl Arch {
  /// Get the architecture for the current compilation target.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    #[cfg(target_arch = "x86_64")]
    {
      Self::X86_64
    }
    #[cfg(target_arch = "x86")]
    {
      Self::X86
    }
    #[cfg(target_arch = "aarch64")]
    {
      Self::Aarch64
    }
    #[cfg(target_arch = "arm")]
    {
      Self::Arm
    }
    #[cfg(target_arch = "riscv64")]
    {
      Self::Riscv64
    }
    #[cfg(target_arch = "wasm32")]
    {
      Self::Wasm32
    }
    #[cfg(not(any(
      target_arch = "x86_64",
      target_arch = "x86",
      target_arch = "aarch64",
      target_arch = "arm",
      target_arch = "riscv64",
      target_arch = "wasm32"
    )))]
    {
      Self::Other
    }
  }

  /// Returns the human-readable name for this architecture.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::X86 => "x86",
      Self::Aarch64 => "aarch64",
      Self::Arm => "arm",
      Self::Riscv64 => "riscv64",
      Self::Wasm32 => "wasm32",
      Self::Other => "other",
    }
  }

  /// Whether the SSE2/SSSE3 intrinsics can exist on this architecture at all.
  #[inline]
  #[must_use]
  pub const fn is_x86(self) -> bool {
    matches!(self, Self::X86_64 | Self::X86)
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Capabilities
// ─────────────────────────────────────────────────────────────────────────────

/// Compile-time facts about this build.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capabilities {
  pub arch: Arch,
  pub compiler: Compiler,
  /// File stem of the C compiler, empty when none was found.
  pub tool: &'static str,
  pub linkage: Linkage,
  /// SSE2 group probing is compiled in.
  pub sse2: bool,
  /// SSSE3 shortcuts are compiled in.
  pub ssse3: bool,
  /// `dcheck!` is active.
  pub debug_checks: bool,
  /// [`prefetch`](crate::hints::prefetch) emits an instruction.
  pub prefetch: bool,
}

/// Feature name and whether it is set.
type FeatureEntry = (&'static str, fn(&Capabilities) -> bool);

const FEATURES: &[FeatureEntry] = &[
  ("sse2", |c| c.sse2),
  ("ssse3", |c| c.ssse3),
  ("prefetch", |c| c.prefetch),
  ("debug-checks", |c| c.debug_checks),
  ("c-linkage", |c| c.linkage.is_c()),
];

impl Capabilities {
  /// The capabilities of this build.
  pub const CURRENT: Self = Self {
    arch: Arch::current(),
    compiler: Compiler::CURRENT,
    tool: Compiler::tool_name(),
    linkage: crate::linkage::LINKAGE,
    sse2: isa::HAVE_SSE2,
    ssse3: isa::HAVE_SSSE3,
    debug_checks: check::DEBUG_CHECKS,
    prefetch: hints::HAVE_PREFETCH,
  };

  /// Control-group width a table built with these capabilities uses.
  #[inline]
  #[must_use]
  pub const fn group_width(&self) -> usize {
    if self.sse2 { 16 } else { 8 }
  }

  /// Returns an iterator over the names of all enabled features.
  pub fn feature_names(&self) -> impl Iterator<Item = &'static str> + '_ {
    FEATURES
      .iter()
      .filter_map(move |(name, enabled)| if enabled(self) { Some(*name) } else { None })
  }
}

impl Default for Capabilities {
  #[inline]
  fn default() -> Self {
    Self::CURRENT
  }
}

impl fmt::Debug for Capabilities {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Capabilities({}, {}", self.arch, self.compiler)?;
    if !self.tool.is_empty() {
      write!(f, " [{}]", self.tool)?;
    }

    let mut iter = self.feature_names().peekable();
    if iter.peek().is_none() {
      write!(f, ", none)")
    } else {
      write!(f, ", [")?;
      let mut first = true;
      for name in iter {
        if !first {
          write!(f, ", ")?;
        }
        first = false;
        write!(f, "{name}")?;
      }
      write!(f, "])")
    }
  }
}

impl fmt::Display for Capabilities {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(self, f)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
