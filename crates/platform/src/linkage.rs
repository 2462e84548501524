//! Linkage selection for exported function groups.
//!
//! With the `ffi` feature, items inside [`export_boundary!`] are emitted as
//! unmangled `extern "C"` functions, callable from C. Without it they are plain
//! Rust functions and the boundary disappears. Because the group is a single
//! macro invocation, its opening and closing can never be mismatched.
//!
//! ```
//! platform::export_boundary! {
//!   /// Adds one.
//!   pub fn doc_example_inc(x: u32) -> u32 {
//!     x.wrapping_add(1)
//!   }
//! }
//!
//! assert_eq!(doc_example_inc(41), 42);
//! ```
//!
//! Only plain, non-generic `fn` items with `name: Type` parameters are accepted:
//! generics cannot have an unmangled C symbol, and `unsafe fn`, parameter
//! patterns, and statics are not part of the exported surface. Anything else is
//! rejected at the macro call:
//!
//! ```compile_fail
//! platform::export_boundary! {
//!   pub fn doc_example_identity<T>(x: T) -> T {
//!     x
//!   }
//! }
//! ```

use core::fmt;

/// How exported items are linked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Linkage {
  /// Unmangled `extern "C"` symbols.
  C,
  /// Ordinary Rust items.
  Rust,
}

impl Linkage {
  /// The ABI string items in an export boundary use.
  #[must_use]
  pub const fn abi(self) -> &'static str {
    match self {
      Self::C => "C",
      Self::Rust => "Rust",
    }
  }

  #[inline]
  #[must_use]
  pub const fn is_c(self) -> bool {
    matches!(self, Self::C)
  }
}

impl fmt::Display for Linkage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.abi())
  }
}

/// Linkage of every [`export_boundary!`] group in this build.
pub const LINKAGE: Linkage = if cfg!(feature = "ffi") { Linkage::C } else { Linkage::Rust };

/// Declare a contiguous group of functions with the build's [`LINKAGE`].
///
/// Items must be plain `fn`s: optional attributes and visibility, no generics,
/// no `unsafe`/`const`/`async` qualifiers, and `name: Type` parameters.
///
/// C linkage: each function gets `#[unsafe(no_mangle)]` and `extern "C"`.
/// Crates exporting through this macro must allow `unsafe_code` for the
/// module holding the group.
#[cfg(feature = "ffi")]
#[macro_export]
macro_rules! export_boundary {
  ($(
    $(#[$attr:meta])*
    $vis:vis fn $name:ident($($arg:ident: $ty:ty),* $(,)?) $(-> $ret:ty)? $body:block
  )*) => {
    $(
      $(#[$attr])*
      #[unsafe(no_mangle)]
      $vis extern "C" fn $name($($arg: $ty),*) $(-> $ret)? $body
    )*
  };
}

/// Declare a contiguous group of functions with the build's [`LINKAGE`].
///
/// Items must be plain `fn`s: optional attributes and visibility, no generics,
/// no `unsafe`/`const`/`async` qualifiers, and `name: Type` parameters.
///
/// Rust linkage: items are emitted unchanged.
#[cfg(not(feature = "ffi"))]
#[macro_export]
macro_rules! export_boundary {
  ($(
    $(#[$attr:meta])*
    $vis:vis fn $name:ident($($arg:ident: $ty:ty),* $(,)?) $(-> $ret:ty)? $body:block
  )*) => {
    $(
      $(#[$attr])*
      $vis fn $name($($arg: $ty),*) $(-> $ret)? $body
    )*
  };
}

#[cfg(test)]
mod tests {
  #![allow(unsafe_code)]

  use super::*;

  crate::export_boundary! {
    fn linkage_test_add(a: u32, b: u32) -> u32 {
      a.wrapping_add(b)
    }

    #[inline]
    pub(crate) fn linkage_test_noop() {}
  }

  #[test]
  fn grouped_items_are_callable() {
    assert_eq!(linkage_test_add(2, 3), 5);
    linkage_test_noop();
  }

  #[test]
  fn linkage_follows_feature() {
    assert_eq!(LINKAGE.is_c(), cfg!(feature = "ffi"));
    assert_eq!(Linkage::C.abi(), "C");
    assert_eq!(Linkage::Rust.abi(), "Rust");
  }

  #[cfg(feature = "ffi")]
  #[test]
  fn c_linkage_yields_extern_c_fn_pointers() {
    let f: extern "C" fn(u32, u32) -> u32 = linkage_test_add;
    assert_eq!(f(1, 1), 2);
  }

  #[cfg(not(feature = "ffi"))]
  #[test]
  fn rust_linkage_yields_rust_fn_pointers() {
    let f: fn(u32, u32) -> u32 = linkage_test_add;
    assert_eq!(f(1, 1), 2);
  }
}
