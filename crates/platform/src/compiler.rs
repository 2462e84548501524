//! C toolchain identification.
//!
//! The build script probes the C compiler that `cc` would use for the current
//! target (the one that builds C code linked against this crate's
//! [`export_boundary!`](crate::export_boundary) items) and reports three raw
//! facts. This module turns them into the predicates table code branches on.
//!
//! Clang is detected first: it impersonates GCC (GNU mode) and MSVC (clang-cl),
//! so the "strict" predicates exclude it.
//!
//! | Toolchain | `IS_CLANG` | `IS_GCC_LIKE` | `IS_MSVC_LIKE` | `IS_GCC` | `IS_MSVC` |
//! |-----------|-----------|---------------|----------------|----------|-----------|
//! | gcc | | ✓ | | ✓ | |
//! | clang | ✓ | ✓ | | | |
//! | cl.exe | | | ✓ | | ✓ |
//! | clang-cl | ✓ | | ✓ | | |
//! | unknown | | | | | |

use core::fmt;

/// Identity of the C toolchain paired with this build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Compiler {
  clang: bool,
  gcc_like: bool,
  msvc_like: bool,
}

impl Compiler {
  /// The toolchain this crate was built with.
  pub const CURRENT: Self = Self::classify(cfg!(swiss_cc_clang), cfg!(swiss_cc_gnu), cfg!(swiss_cc_msvc));

  /// An unrecognized toolchain: every predicate is false.
  pub const UNKNOWN: Self = Self::classify(false, false, false);

  /// Build an identity from raw family facts.
  #[inline]
  #[must_use]
  pub const fn classify(clang: bool, gcc_like: bool, msvc_like: bool) -> Self {
    Self {
      clang,
      gcc_like,
      msvc_like,
    }
  }

  /// Clang in any mode.
  #[inline]
  #[must_use]
  pub const fn is_clang(self) -> bool {
    self.clang
  }

  /// GCC, or Clang in GNU mode.
  #[inline]
  #[must_use]
  pub const fn is_gcc_like(self) -> bool {
    self.gcc_like
  }

  /// MSVC, or clang-cl.
  #[inline]
  #[must_use]
  pub const fn is_msvc_like(self) -> bool {
    self.msvc_like
  }

  /// GCC itself, never Clang pretending to be GCC.
  #[inline]
  #[must_use]
  pub const fn is_gcc(self) -> bool {
    self.gcc_like && !self.clang
  }

  /// MSVC itself, never clang-cl.
  #[inline]
  #[must_use]
  pub const fn is_msvc(self) -> bool {
    self.msvc_like && !self.clang
  }

  /// Collapse the predicates into a single kind.
  #[must_use]
  pub const fn kind(self) -> CompilerKind {
    if self.is_clang() {
      CompilerKind::Clang
    } else if self.is_gcc() {
      CompilerKind::Gcc
    } else if self.is_msvc() {
      CompilerKind::Msvc
    } else {
      CompilerKind::Other
    }
  }

  /// File stem of the probed compiler (`"gcc"`, `"clang-cl"`, ...).
  ///
  /// Empty when no compiler was found.
  #[inline]
  #[must_use]
  pub const fn tool_name() -> &'static str {
    match option_env!("SWISS_CC_TOOL") {
      Some(name) => name,
      None => "",
    }
  }
}

impl Default for Compiler {
  #[inline]
  fn default() -> Self {
    Self::CURRENT
  }
}

/// Which of the mutually exclusive toolchains is in use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CompilerKind {
  Clang,
  Gcc,
  Msvc,
  Other,
}

impl CompilerKind {
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Clang => "clang",
      Self::Gcc => "gcc",
      Self::Msvc => "msvc",
      Self::Other => "other",
    }
  }
}

impl fmt::Display for CompilerKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl fmt::Display for Compiler {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let kind = self.kind();
    match (kind, self.gcc_like, self.msvc_like) {
      (CompilerKind::Clang, true, _) => write!(f, "{kind} (gnu mode)"),
      (CompilerKind::Clang, _, true) => write!(f, "{kind} (msvc mode)"),
      _ => write!(f, "{kind}"),
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Clang in any mode.
pub const IS_CLANG: bool = Compiler::CURRENT.is_clang();
/// GCC or GNU-mode Clang.
pub const IS_GCC_LIKE: bool = Compiler::CURRENT.is_gcc_like();
/// MSVC or clang-cl.
pub const IS_MSVC_LIKE: bool = Compiler::CURRENT.is_msvc_like();
/// GCC and not Clang.
pub const IS_GCC: bool = Compiler::CURRENT.is_gcc();
/// MSVC and not Clang.
pub const IS_MSVC: bool = Compiler::CURRENT.is_msvc();
