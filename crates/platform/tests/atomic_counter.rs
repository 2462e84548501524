use std::{
  collections::HashSet,
  sync::{Barrier, atomic::AtomicUsize},
  thread,
};

use platform::atomic::{Atomic, AtomicCounter, atomic_inc, new_atomic, random_seed};

const THREADS: usize = 8;
const PER_THREAD: usize = 10_000;

#[test]
fn concurrent_increments_are_never_lost() {
  let counter: Atomic<usize> = new_atomic(5usize);

  thread::scope(|s| {
    for _ in 0..THREADS {
      s.spawn(|| {
        for _ in 0..PER_THREAD {
          atomic_inc(&counter);
        }
      });
    }
  });

  assert_eq!(counter.load_relaxed(), 5 + THREADS * PER_THREAD);
}

#[test]
fn every_previous_value_is_observed_once() {
  let counter = AtomicUsize::new(0);

  let seen: Vec<Vec<usize>> = thread::scope(|s| {
    let handles: Vec<_> = (0..4)
      .map(|_| s.spawn(|| (0..1_000).map(|_| atomic_inc(&counter)).collect::<Vec<_>>()))
      .collect();
    handles.into_iter().map(|h| h.join().unwrap()).collect()
  });

  let all: HashSet<usize> = seen.into_iter().flatten().collect();
  assert_eq!(all.len(), 4_000);
  assert!(all.iter().all(|v| *v < 4_000));
}

#[test]
fn narrow_counters_wrap_under_contention() {
  let counter = new_atomic(0u8);

  thread::scope(|s| {
    for _ in 0..4 {
      s.spawn(|| {
        for _ in 0..256 {
          atomic_inc(&counter);
        }
      });
    }
  });

  // 4 * 256 increments wrap back to the start.
  assert_eq!(counter.load_relaxed(), 0);
}

#[test]
fn seeds_differ_across_threads() {
  // Keep every thread alive until all have drawn, so no two share storage.
  let barrier = Barrier::new(4);
  let seeds: Vec<usize> = thread::scope(|s| {
    let handles: Vec<_> = (0..4)
      .map(|_| {
        s.spawn(|| {
          let seed = random_seed();
          barrier.wait();
          seed
        })
      })
      .collect();
    handles.into_iter().map(|h| h.join().unwrap()).collect()
  });

  let unique: HashSet<_> = seeds.iter().collect();
  assert!(unique.len() > 1, "seeds: {seeds:?}");
}
