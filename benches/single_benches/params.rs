/// Number of nodes of the random graphs used in benchmarks.
pub const BENCH_NUM_NODES: [usize; 3] = [100, 500, 2000];
/// Expected degree of the random graphs used in benchmarks.
pub const BENCH_DEGREE: f64 = 8.0;
pub const NUM_SAMPLES: usize = 10;
pub const SEED: u64 = 0;
