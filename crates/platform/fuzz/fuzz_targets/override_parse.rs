//! Fuzz target for override value parsing.
//!
//! Tests that:
//! - No panics on arbitrary input
//! - Surrounding whitespace and ASCII case never change the result
//! - Blank values are "unset", everything unparseable is an error

#![no_main]

use libfuzzer_sys::fuzz_target;
use platform::config::{self, ConfigError, SSE2_OVERRIDE};

fuzz_target!(|value: &str| {
  let parsed = config::parse_flag(value);

  // ─── Invariant: Normalization ───
  assert_eq!(config::parse_flag(&format!("  {value}\t")), parsed);
  assert_eq!(config::parse_flag(&value.to_ascii_uppercase()), parsed);

  // ─── Invariant: Override classification ───
  match config::parse_override(SSE2_OVERRIDE, Some(value)) {
    Ok(None) => assert!(value.trim().is_empty()),
    Ok(Some(flag)) => assert_eq!(parsed, Some(flag)),
    Err(err) => {
      assert_eq!(err, ConfigError::InvalidOverride { name: SSE2_OVERRIDE });
      assert!(parsed.is_none());
      assert!(!value.trim().is_empty());
    }
  }
});
