//! Process-fatal invariant checks.
//!
//! [`check!`](crate::check!) is always on, in every build profile; it is not
//! an `assert!` that release builds drop. [`dcheck!`](crate::dcheck!) behaves
//! the same in debug builds and vanishes when `debug_assertions` is off: its
//! condition and message are type-checked but never evaluated.
//!
//! A failed check writes
//!
//! ```text
//! CHECK failed at <file>:<line>
//! <message>
//! ```
//!
//! to stderr, flushes, and aborts. There is no unwinding and no return path:
//! these guard states the table treats as impossible.
//!
//! ```
//! let capacity = 15usize;
//! platform::check!((capacity + 1).is_power_of_two(), "invalid capacity: {}", capacity);
//! platform::dcheck!(capacity > 0, "capacity should be nonzero");
//! ```

use core::fmt;

/// Whether [`dcheck!`](crate::dcheck!) is active in this crate's build.
///
/// `dcheck!` expands in the caller's crate and follows the caller's
/// `debug_assertions`; within one profile the two agree.
pub const DEBUG_CHECKS: bool = cfg!(debug_assertions);

/// Leading word of every failure report.
pub const MARKER: &str = "CHECK";

/// Abort with `message` if `cond` is false.
///
/// The message takes `format!` syntax and is only formatted on failure. With
/// no message, the stringified condition is reported.
#[macro_export]
macro_rules! check {
  ($cond:expr $(,)?) => {
    $crate::check!($cond, "{}", ::core::stringify!($cond))
  };
  ($cond:expr, $($arg:tt)+) => {
    if $crate::hints::unlikely(!$cond) {
      $crate::check::failed(::core::file!(), ::core::line!(), ::core::format_args!($($arg)+))
    }
  };
}

/// [`check!`] in debug builds; nothing at all otherwise.
///
/// Do not put side effects in the condition: release builds skip them.
#[macro_export]
macro_rules! dcheck {
  ($($arg:tt)+) => {
    if ::core::cfg!(debug_assertions) {
      $crate::check!($($arg)+);
    }
  };
}

crate::never_inline! {
  /// Report a failed check at `file:line` and abort.
  ///
  /// Called by [`check!`](crate::check!); use the macro instead so the
  /// location is filled in.
  #[cold]
  #[doc(hidden)]
  pub fn failed(file: &str, line: u32, message: fmt::Arguments<'_>) -> ! {
    #[cfg(feature = "log")]
    log::error!("{MARKER} failed at {file}:{line}: {message}");

    #[cfg(feature = "std")]
    {
      let stderr = std::io::stderr();
      let mut out = stderr.lock();
      let _ = write_report(&mut out, file, line, message);
      std::process::abort()
    }

    #[cfg(not(feature = "std"))]
    {
      panic!("{MARKER} failed at {file}:{line}\n{message}")
    }
  }
}

/// Write a failure report and flush.
#[cfg(feature = "std")]
pub(crate) fn write_report<W: std::io::Write>(
  out: &mut W,
  file: &str,
  line: u32,
  message: fmt::Arguments<'_>,
) -> std::io::Result<()> {
  writeln!(out, "{MARKER} failed at {file}:{line}")?;
  out.write_fmt(message)?;
  out.write_all(b"\n")?;
  out.flush()
}

#[cfg(test)]
mod tests {
  extern crate alloc;
  extern crate std;

  use alloc::{string::String, vec::Vec};

  use super::*;

  #[test]
  #[cfg(feature = "std")]
  fn report_format() {
    let mut buf = Vec::new();
    write_report(&mut buf, "src/table.rs", 42, format_args!("bad ctrl value at {}: {:02x}", 3, 0x80)).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(text, "CHECK failed at src/table.rs:42\nbad ctrl value at 3: 80\n");
  }

  #[test]
  fn passing_check_has_no_effect() {
    let mut formatted = false;
    let mut note = || {
      formatted = true;
      "unused"
    };
    crate::check!(1 + 1 == 2, "{}", note());
    crate::check!(true);
    crate::check!(true, "boom",);
    assert!(!formatted, "message must not be evaluated for a passing check");
  }

  #[test]
  fn dcheck_evaluates_condition_only_in_debug() {
    let mut evaluated = 0u32;
    for _ in 0..100 {
      crate::dcheck!(
        {
          evaluated += 1;
          true
        },
        "never fails"
      );
    }
    let expected = if cfg!(debug_assertions) { 100 } else { 0 };
    assert_eq!(evaluated, expected);
    assert_eq!(DEBUG_CHECKS, cfg!(debug_assertions));
  }

  #[test]
  #[cfg(not(feature = "std"))]
  #[should_panic(expected = "CHECK failed at")]
  fn failing_check_panics_without_std() {
    crate::check!(core::hint::black_box(false), "boom");
  }
}
