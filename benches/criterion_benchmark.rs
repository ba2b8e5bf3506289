use criterion::{criterion_group, criterion_main};

mod single_benches;
use single_benches::*;

criterion_group!(benches, bench_msbfs::bench_msbfs, bench_prim::bench_prim);
criterion_main!(benches);
