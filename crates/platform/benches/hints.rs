//! Platform primitive benchmarks
//!
//! Run: `cargo bench -p swisstable-platform`

use core::{hint::black_box, sync::atomic::AtomicUsize};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use platform::{
  atomic::atomic_inc,
  hints::{self, Locality},
};

fn bench_atomic_inc(c: &mut Criterion) {
  let counter = AtomicUsize::new(0);
  c.bench_function("atomic_inc", |b| b.iter(|| atomic_inc(black_box(&counter))));
}

fn bench_branch_hints(c: &mut Criterion) {
  let mut group = c.benchmark_group("branch");
  let data: Vec<u8> = (0..4096u32).map(|i| (i.wrapping_mul(2_654_435_761) >> 24) as u8).collect();
  group.throughput(Throughput::Bytes(data.len() as u64));

  group.bench_function("plain", |b| {
    b.iter(|| black_box(&data).iter().filter(|&&x| x == 0x80).count())
  });
  group.bench_function("unlikely", |b| {
    b.iter(|| black_box(&data).iter().filter(|&&x| hints::unlikely(x == 0x80)).count())
  });

  group.finish();
}

fn bench_prefetch(c: &mut Criterion) {
  let mut group = c.benchmark_group("prefetch");
  let table = vec![0u64; 1 << 20];
  let stride = 4099;

  for locality in [Locality::None, Locality::Low, Locality::Moderate, Locality::High] {
    group.bench_with_input(BenchmarkId::from_parameter(locality as u8), &locality, |b, &locality| {
      b.iter(|| {
        let mut pos = 0usize;
        let mut sum = 0u64;
        for _ in 0..256 {
          let next = (pos + stride) % table.len();
          hints::prefetch(table.as_ptr().wrapping_add(next), locality);
          sum = sum.wrapping_add(table[pos]);
          pos = next;
        }
        black_box(sum)
      });
    });
  }

  group.finish();
}

criterion_group!(benches, bench_atomic_inc, bench_branch_hints, bench_prefetch);
criterion_main!(benches);
