use super::params::*;
use criterion::{BenchmarkId, Criterion, Throughput};
use dsi_progress_logger::no_logging;
use spmat_algo::prelude::*;
use spmat_algo::utils::random::random_undirected;

pub fn bench_prim(c: &mut Criterion) {
    let mut group = c.benchmark_group("Prim");
    group.sampling_mode(criterion::SamplingMode::Flat);
    group.sample_size(NUM_SAMPLES);
    let ctx = Context::sequential().unwrap();
    for num_nodes in BENCH_NUM_NODES {
        let graph = random_undirected::<f64>(
            num_nodes,
            BENCH_DEGREE / num_nodes as f64,
            100,
            SEED,
        )
        .unwrap();
        group.throughput(Throughput::Elements(num_nodes as u64));
        group.bench_with_input(BenchmarkId::from_parameter(num_nodes), &graph, |b, graph| {
            b.iter(|| prim(&ctx, graph, 0, no_logging![]).unwrap())
        });
    }
    group.finish();
}
