//! Build-time configuration: override parsing, toolchain classification, and
//! capability resolution.
//!
//! This file is compiled twice: once as part of the crate, and once by
//! `build.rs` via `#[path]`. It must stay `core`-only and dependency-free.
//!
//! # Overrides
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `SWISS_HAVE_SSE2` | Forces the SSE2 flag on or off |
//! | `SWISS_HAVE_SSSE3` | Forces the SSSE3 flag on or off |
//!
//! Values are trimmed and matched case-insensitively against
//! `1/true/on/yes` and `0/false/off/no`. An empty value counts as unset.
//! Anything else fails the build.

use core::fmt;

/// Environment variable overriding SSE2 detection.
pub const SSE2_OVERRIDE: &str = "SWISS_HAVE_SSE2";

/// Environment variable overriding SSSE3 detection.
pub const SSSE3_OVERRIDE: &str = "SWISS_HAVE_SSSE3";

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// A configuration that cannot describe any real build.
///
/// These are raised while resolving capability flags and always halt the
/// build; there is no fallback value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ConfigError {
  /// An override variable held a value that is not a recognized boolean.
  InvalidOverride {
    /// Name of the offending variable.
    name: &'static str,
  },
  /// SSSE3 was enabled while SSE2 was not.
  Ssse3WithoutSse2,
}

impl ConfigError {
  /// Static description, usable from `const` panics.
  #[must_use]
  pub const fn message(&self) -> &'static str {
    match self {
      Self::InvalidOverride { .. } => "bad configuration: override must be one of 1, 0, true, false, on, off, yes, no",
      Self::Ssse3WithoutSse2 => "bad configuration: SSSE3 implies SSE2",
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::InvalidOverride { name } => {
        write!(f, "bad configuration: {name} must be one of 1, 0, true, false, on, off, yes, no")
      }
      Self::Ssse3WithoutSse2 => f.write_str(self.message()),
    }
  }
}

impl core::error::Error for ConfigError {}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing
// ─────────────────────────────────────────────────────────────────────────────

/// Parse a boolean override value.
///
/// Returns `None` for anything that is not a recognized keyword. Callers
/// decide whether an empty string means "unset" (see [`parse_override`]).
#[must_use]
pub fn parse_flag(value: &str) -> Option<bool> {
  let value = value.trim();

  const ON: [&str; 4] = ["1", "true", "on", "yes"];
  const OFF: [&str; 4] = ["0", "false", "off", "no"];

  if ON.iter().any(|kw| value.eq_ignore_ascii_case(kw)) {
    return Some(true);
  }
  if OFF.iter().any(|kw| value.eq_ignore_ascii_case(kw)) {
    return Some(false);
  }
  None
}

/// Interpret the raw contents of override variable `name`.
///
/// - unset or blank: `Ok(None)` (fall back to detection)
/// - recognized keyword: `Ok(Some(flag))`
/// - anything else: [`ConfigError::InvalidOverride`]
pub fn parse_override(name: &'static str, raw: Option<&str>) -> Result<Option<bool>, ConfigError> {
  let Some(raw) = raw else {
    return Ok(None);
  };
  if raw.trim().is_empty() {
    return Ok(None);
  }
  match parse_flag(raw) {
    Some(flag) => Ok(Some(flag)),
    None => Err(ConfigError::InvalidOverride { name }),
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Resolve one capability flag: an explicit override always wins.
#[inline]
#[must_use]
pub const fn resolve_flag(override_value: Option<bool>, detected: bool) -> bool {
  match override_value {
    Some(flag) => flag,
    None => detected,
  }
}

/// Reject SIMD combinations no hardware can have.
pub const fn check_isa(sse2: bool, ssse3: bool) -> Result<(), ConfigError> {
  if ssse3 && !sse2 {
    return Err(ConfigError::Ssse3WithoutSse2);
  }
  Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Toolchain
// ─────────────────────────────────────────────────────────────────────────────

/// Dialect facts about the C compiler, as the crate sees them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ToolFamily {
  pub clang: bool,
  pub gnu: bool,
  pub msvc: bool,
}

/// Classify a probed C compiler from its file stem and the probe's exclusive
/// family (`like_*`, at most one set).
///
/// Clang in GNU mode is also GNU-like, and clang-cl is also MSVC-like. A
/// compiler whose executable does not exist (`found == false`) is unknown,
/// whatever its name says.
#[must_use]
pub fn classify_tool(stem: &str, found: bool, like_clang: bool, like_gnu: bool, like_msvc: bool) -> Option<ToolFamily> {
  if !found {
    return None;
  }
  let clang_cl = like_msvc && stem.contains("clang-cl");
  Some(ToolFamily {
    clang: like_clang || clang_cl,
    gnu: like_gnu || like_clang,
    msvc: like_msvc,
  })
}
