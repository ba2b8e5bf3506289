use super::params::*;
use criterion::{BenchmarkId, Criterion, Throughput};
use dsi_progress_logger::no_logging;
use spmat_algo::prelude::*;
use spmat_algo::utils::random::random_undirected;

pub fn bench_msbfs(c: &mut Criterion) {
    let mut group = c.benchmark_group("Multi-source breadth-first visit");
    group.sampling_mode(criterion::SamplingMode::Flat);
    group.sample_size(NUM_SAMPLES);
    for num_nodes in BENCH_NUM_NODES {
        let graph = random_undirected::<f32>(
            num_nodes,
            BENCH_DEGREE / num_nodes as f64,
            100,
            SEED,
        )
        .unwrap();
        let sources = msbfs::every_second_node(num_nodes).unwrap();
        group.throughput(Throughput::Elements(graph.nvals() as u64));
        for num_threads in [1, 4] {
            let ctx = Context::new(Threads::NumThreads(num_threads)).unwrap();
            group.bench_with_input(
                BenchmarkId::new(format!("{} threads", num_threads), num_nodes),
                &graph,
                |b, graph| {
                    b.iter(|| {
                        msbfs(&ctx, graph, &sources, BfsOutput::Parents, no_logging![]).unwrap()
                    })
                },
            );
        }
    }
    group.finish();
}
