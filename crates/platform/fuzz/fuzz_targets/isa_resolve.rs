//! Fuzz target for SIMD flag resolution.
//!
//! Tests that:
//! - An override always wins over detection
//! - Every accepted configuration has SSSE3 imply SSE2
//! - Every rejection is exactly SSSE3 without SSE2

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use platform::{IsaConfig, config::ConfigError};

#[derive(Arbitrary, Debug)]
struct Input {
  sse2_override: Option<bool>,
  sse2_detected: bool,
  ssse3_override: Option<bool>,
  ssse3_detected: bool,
}

fuzz_target!(|input: Input| {
  let sse2 = input.sse2_override.unwrap_or(input.sse2_detected);
  let ssse3 = input.ssse3_override.unwrap_or(input.ssse3_detected);

  let resolved = IsaConfig::resolve(
    input.sse2_override,
    input.sse2_detected,
    input.ssse3_override,
    input.ssse3_detected,
  );

  match resolved {
    Ok(cfg) => {
      assert_eq!((cfg.sse2(), cfg.ssse3()), (sse2, ssse3));
      assert!(!cfg.ssse3() || cfg.sse2());
      assert_eq!(cfg.group_width(), if sse2 { 16 } else { 8 });
    }
    Err(err) => {
      assert_eq!(err, ConfigError::Ssse3WithoutSse2);
      assert!(ssse3 && !sse2);
    }
  }

  assert_eq!(resolved, IsaConfig::try_new(sse2, ssse3));
});
