//! Abort behavior of `check!` / `dcheck!`.
//!
//! A failing check kills the process, so each scenario re-runs this test
//! binary as a child filtered to `child_entry`, and the parent inspects the
//! child's exit status and stderr.

#![cfg(feature = "std")]

use std::{
  env,
  process::{Command, Output},
};

const MODE_VAR: &str = "SWISS_PLATFORM_CHECK_CHILD";

const BOOM_LINE: u32 = line!() + 3;

fn failing_check() {
  platform::check!(core::hint::black_box(false), "boom: {} slots", 7);
}

const DEBUG_BOOM_LINE: u32 = line!() + 3;

fn failing_dcheck() {
  platform::dcheck!(core::hint::black_box(1 + 1) == 3, "dboom");
}

/// Entry point for the child process; a no-op in the parent run.
#[test]
fn child_entry() {
  match env::var(MODE_VAR).as_deref() {
    Ok("check") => failing_check(),
    Ok("dcheck") => failing_dcheck(),
    Ok("pass") => {
      platform::check!(true, "unreachable");
      platform::dcheck!(true);
    }
    _ => {}
  }
}

fn run_child(mode: &str) -> Output {
  let exe = env::current_exe().unwrap();
  Command::new(exe)
    .args(["--exact", "child_entry", "--nocapture", "--test-threads=1"])
    .env(MODE_VAR, mode)
    .output()
    .unwrap()
}

#[cfg(unix)]
fn assert_aborted(out: &Output) {
  use std::os::unix::process::ExitStatusExt;
  const SIGABRT: i32 = 6;
  assert_eq!(out.status.signal(), Some(SIGABRT), "status: {:?}", out.status);
}

#[cfg(not(unix))]
fn assert_aborted(out: &Output) {
  assert!(!out.status.success(), "status: {:?}", out.status);
}

#[test]
fn failing_check_aborts_with_location_and_message() {
  let out = run_child("check");
  assert_aborted(&out);

  let stderr = String::from_utf8_lossy(&out.stderr);
  let header = format!("CHECK failed at {}:{}\nboom: 7 slots\n", file!(), BOOM_LINE);
  assert!(stderr.contains(&header), "stderr:\n{stderr}");
}

#[test]
fn failing_dcheck_aborts_only_in_debug() {
  let out = run_child("dcheck");
  let stderr = String::from_utf8_lossy(&out.stderr);

  if cfg!(debug_assertions) {
    assert_aborted(&out);
    let header = format!("CHECK failed at {}:{}\ndboom\n", file!(), DEBUG_BOOM_LINE);
    assert!(stderr.contains(&header), "stderr:\n{stderr}");
  } else {
    assert!(out.status.success(), "stderr:\n{stderr}");
    assert!(!stderr.contains("CHECK failed"));
  }
}

#[test]
fn passing_checks_leave_the_process_alone() {
  let out = run_child("pass");
  let stderr = String::from_utf8_lossy(&out.stderr);
  assert!(out.status.success(), "stderr:\n{stderr}");
  assert!(!stderr.contains("CHECK failed"));
}
