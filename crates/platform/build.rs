//! Resolves toolchain identity and SIMD capability flags.
//!
//! Everything the crate knows about its build environment is decided here and
//! passed down as `cfg`s:
//!
//! | cfg | Meaning |
//! |-----|---------|
//! | `swiss_cc_clang` | C toolchain is Clang (any mode, including clang-cl) |
//! | `swiss_cc_gnu` | C toolchain speaks the GNU dialect (gcc, clang) |
//! | `swiss_cc_msvc` | C toolchain speaks the MSVC dialect (cl.exe, clang-cl) |
//! | `swiss_sse2` / `swiss_ssse3` | SIMD level is available |
//! | `swiss_sse2_override` / `swiss_ssse3_override` | the flag came from an override |
//!
//! An unknown C toolchain is not an error: none of the `swiss_cc_*` cfgs are
//! emitted. An invalid SIMD configuration is: the build stops here.

use std::{
  env::{self, VarError},
  path::Path,
};

#[allow(dead_code)]
#[path = "src/config.rs"]
mod config;

use config::{SSE2_OVERRIDE, SSSE3_OVERRIDE};

const CFGS: &[&str] = &[
  "swiss_cc_clang",
  "swiss_cc_gnu",
  "swiss_cc_msvc",
  "swiss_sse2",
  "swiss_ssse3",
  "swiss_sse2_override",
  "swiss_ssse3_override",
];

fn main() {
  println!("cargo::rerun-if-changed=build.rs");
  println!("cargo::rerun-if-changed=src/config.rs");
  for cfg in CFGS {
    println!("cargo::rustc-check-cfg=cfg({cfg})");
  }

  probe_compiler();
  resolve_isa();
}

// ─────────────────────────────────────────────────────────────────────────────
// Compiler Identity
// ─────────────────────────────────────────────────────────────────────────────

/// Classify the C toolchain `cc` would use for this target.
///
/// `cc` reports exclusive families (GNU, Clang, MSVC) from the compiler's name
/// alone, so the executable must also resolve on disk. `CC=clang` on a host
/// without clang is an unknown toolchain.
fn probe_compiler() {
  println!("cargo::rerun-if-env-changed=CC");
  println!("cargo::rerun-if-env-changed=PATH");

  let tool = match cc::Build::new().cargo_metadata(false).cargo_warnings(false).try_get_compiler() {
    Ok(tool) => tool,
    Err(_) => {
      println!("cargo::rustc-env=SWISS_CC_TOOL=");
      return;
    }
  };

  let path = tool.path();
  let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
  let family = config::classify_tool(
    stem,
    tool_exists(path),
    tool.is_like_clang(),
    tool.is_like_gnu(),
    tool.is_like_msvc(),
  );

  let Some(family) = family else {
    println!("cargo::rustc-env=SWISS_CC_TOOL=");
    return;
  };

  if family.clang {
    println!("cargo::rustc-cfg=swiss_cc_clang");
  }
  if family.gnu {
    println!("cargo::rustc-cfg=swiss_cc_gnu");
  }
  if family.msvc {
    println!("cargo::rustc-cfg=swiss_cc_msvc");
  }
  println!("cargo::rustc-env=SWISS_CC_TOOL={stem}");
}

/// Whether `path` names an existing file, searching `PATH` for bare names.
fn tool_exists(path: &Path) -> bool {
  let has_dir = path.parent().is_some_and(|dir| !dir.as_os_str().is_empty());
  if path.is_absolute() || has_dir {
    return path.is_file();
  }

  let Some(search) = env::var_os("PATH") else {
    return false;
  };
  env::split_paths(&search).any(|dir| {
    let candidate = dir.join(path);
    candidate.is_file() || (cfg!(windows) && candidate.extension().is_none() && candidate.with_extension("exe").is_file())
  })
}

// ─────────────────────────────────────────────────────────────────────────────
// Instruction Sets
// ─────────────────────────────────────────────────────────────────────────────

fn resolve_isa() {
  let target_features = env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();
  let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
  let has_feature = |name: &str| target_features.split(',').any(|f| f == name);

  let sse2_override = read_override(SSE2_OVERRIDE);
  let ssse3_override = read_override(SSSE3_OVERRIDE);

  let sse2 = config::resolve_flag(sse2_override, has_feature("sse2"));
  let ssse3 = config::resolve_flag(ssse3_override, has_feature("ssse3"));

  if let Err(err) = config::check_isa(sse2, ssse3) {
    panic!("{err} (SSE2 = {sse2}, SSSE3 = {ssse3}; check {SSE2_OVERRIDE} and {SSSE3_OVERRIDE})");
  }

  let x86 = matches!(target_arch.as_str(), "x86" | "x86_64");
  if sse2 && !x86 {
    println!("cargo::warning={SSE2_OVERRIDE} forces SSE2 on {target_arch}; x86 intrinsics stay unavailable");
  }

  if sse2 {
    println!("cargo::rustc-cfg=swiss_sse2");
  }
  if ssse3 {
    println!("cargo::rustc-cfg=swiss_ssse3");
  }
  if sse2_override.is_some() {
    println!("cargo::rustc-cfg=swiss_sse2_override");
  }
  if ssse3_override.is_some() {
    println!("cargo::rustc-cfg=swiss_ssse3_override");
  }
}

/// Read and validate one override variable. Invalid values stop the build.
fn read_override(name: &'static str) -> Option<bool> {
  println!("cargo::rerun-if-env-changed={name}");

  let raw = match env::var(name) {
    Ok(raw) => Some(raw),
    Err(VarError::NotPresent) => None,
    Err(VarError::NotUnicode(raw)) => panic!("{name} is not valid UTF-8: {raw:?}"),
  };

  match config::parse_override(name, raw.as_deref()) {
    Ok(value) => value,
    Err(err) => panic!("{err} (got {:?})", raw.unwrap_or_default()),
  }
}
