use anyhow::Result;
use dsi_progress_logger::no_logging;
use spmat_algo::prelude::*;
use spmat_algo::utils::random::random_undirected;
use std::collections::VecDeque;

fn reference_levels(graph: &Matrix<f32>, source: usize) -> Vec<Option<u32>> {
    let mut levels = vec![None; graph.nrows()];
    let mut queue = VecDeque::new();
    levels[source] = Some(0);
    queue.push_back(source);
    while let Some(node) = queue.pop_front() {
        let distance = levels[node].unwrap();
        for &(succ, _) in graph.row(node) {
            if levels[succ].is_none() {
                levels[succ] = Some(distance + 1);
                queue.push_back(succ);
            }
        }
    }
    levels
}

fn undirected(num_nodes: usize, edges: &[(usize, usize)]) -> Result<Matrix<f32>> {
    Ok(Matrix::from_triples(
        num_nodes,
        num_nodes,
        f32::INFINITY,
        edges
            .iter()
            .flat_map(|&(u, v)| [(u, v, 1.0), (v, u, 1.0)]),
    )?)
}

fn check_levels(graph: &Matrix<f32>, sources: &Vector<u32>, levels: &Matrix<u32>) {
    assert_eq!(levels.shape(), (sources.len(), graph.nrows()));
    for (i, source) in sources.iter() {
        let expected = reference_levels(graph, source as usize);
        for (node, &level) in expected.iter().enumerate() {
            assert_eq!(
                levels.get(i, node),
                level,
                "level of node {} from source {} (node {})",
                node,
                i,
                source
            );
        }
    }
}

fn check_parents(
    graph: &Matrix<f32>,
    sources: &Vector<u32>,
    parents: &Matrix<u32>,
    levels: &Matrix<u32>,
) {
    for (i, source) in sources.iter() {
        let source = source as usize;
        assert_eq!(parents.get(i, source), Some(source as u32));
        for &(node, level) in levels.row(i) {
            // Parents are neighbors one level up
            let parent = parents.get(i, node).unwrap() as usize;
            if node != source {
                assert!(graph.contains(parent, node));
                assert_eq!(levels.get(i, parent), Some(level - 1));
            }
            // Following parents reaches the source in exactly `level` steps
            let mut curr = node;
            for _ in 0..level {
                curr = parents.get(i, curr).unwrap() as usize;
            }
            assert_eq!(curr, source);
        }
        assert_eq!(parents.row(i).len(), levels.row(i).len());
    }
}

#[test]
fn test_path_and_cycle() -> Result<()> {
    let ctx = Context::sequential()?;
    // A path 0 - 1 - 2 - 3 and a triangle 4 - 5 - 6
    let graph = undirected(7, &[(0, 1), (1, 2), (2, 3), (4, 5), (5, 6), (6, 4)])?;
    let sources = Vector::from_pairs(3, u32::MAX, [(0, 0), (1, 2), (2, 5)])?;

    let levels = msbfs(&ctx, &graph, &sources, BfsOutput::Levels, no_logging![])?;
    assert_eq!(levels.row(0), &[(0, 0), (1, 1), (2, 2), (3, 3)]);
    assert_eq!(levels.row(1), &[(0, 2), (1, 1), (2, 0), (3, 1)]);
    assert_eq!(levels.row(2), &[(4, 1), (5, 0), (6, 1)]);

    let parents = msbfs(&ctx, &graph, &sources, BfsOutput::Parents, no_logging![])?;
    assert_eq!(parents.row(0), &[(0, 0), (1, 0), (2, 1), (3, 2)]);
    assert_eq!(parents.row(1), &[(0, 1), (1, 2), (2, 2), (3, 2)]);
    assert_eq!(parents.row(2), &[(4, 5), (5, 5), (6, 5)]);
    Ok(())
}

#[test]
fn test_isolated_node() -> Result<()> {
    let ctx = Context::sequential()?;
    let graph = undirected(5, &[(0, 1), (1, 2), (2, 3)])?;
    let sources = msbfs::every_second_node(5)?;

    let levels = msbfs(&ctx, &graph, &sources, BfsOutput::Levels, no_logging![])?;
    let parents = msbfs(&ctx, &graph, &sources, BfsOutput::Parents, no_logging![])?;
    for i in 0..sources.len() {
        assert_eq!(levels.get(i, 4), None);
        assert_eq!(parents.get(i, 4), None);
        assert_eq!(levels.get_or_fill(i, 4), u32::MAX);
    }
    check_levels(&graph, &sources, &levels);
    check_parents(&graph, &sources, &parents, &levels);

    // A visit from the isolated node ends immediately
    let sources = Vector::from_pairs(1, u32::MAX, [(0, 4)])?;
    let mut visit = MsBfs::new(&ctx, &graph, &sources, BfsOutput::Levels)?;
    assert_eq!(visit.step(no_logging![])?, 0);
    assert!(visit.is_done());
    assert_eq!(visit.round(), 0);
    assert_eq!(visit.current().read(), (vec![0], vec![4], vec![0]));
    Ok(())
}

#[test]
fn test_random_graphs() -> Result<()> {
    let ctx = Context::new(Threads::NumThreads(4))?;
    for seed in 0..5 {
        let graph = random_undirected::<f32>(80, 0.04, 10, seed)?;
        let sources = msbfs::every_second_node(graph.nrows())?;
        let levels = msbfs(&ctx, &graph, &sources, BfsOutput::Levels, no_logging![])?;
        let parents = msbfs(&ctx, &graph, &sources, BfsOutput::Parents, no_logging![])?;
        check_levels(&graph, &sources, &levels);
        check_parents(&graph, &sources, &parents, &levels);
    }
    Ok(())
}

#[test]
fn test_rerun_is_identical() -> Result<()> {
    let sequential = Context::sequential()?;
    let parallel = Context::new(Threads::NumThreads(3))?;
    let graph = random_undirected::<f64>(50, 0.08, 5, 42)?;
    let sources = Vector::from_pairs(4, u32::MAX, [(0, 3), (1, 17), (2, 17), (3, 49)])?;

    let first = msbfs(&sequential, &graph, &sources, BfsOutput::Levels, no_logging![])?;
    let second = msbfs(&sequential, &graph, &sources, BfsOutput::Levels, no_logging![])?;
    let third = msbfs(&parallel, &graph, &sources, BfsOutput::Levels, no_logging![])?;
    assert_eq!(first.read(), second.read());
    assert_eq!(first.read(), third.read());
    // Duplicate sources produce identical rows
    assert_eq!(first.row(1), first.row(2));
    Ok(())
}

#[test]
fn test_rounds_bounded_by_eccentricity() -> Result<()> {
    let ctx = Context::sequential()?;
    let num_nodes = 10;
    let edges: Vec<_> = (0..num_nodes - 1).map(|i| (i, i + 1)).collect();
    let graph = undirected(num_nodes, &edges)?;
    let sources = Vector::from_pairs(2, u32::MAX, [(0, 0), (1, 5)])?;

    let mut visit = MsBfs::new(&ctx, &graph, &sources, BfsOutput::Parents)?;
    let mut visited = visit.visited();
    assert_eq!(visited, 2);
    while !visit.is_done() {
        visited += visit.step(no_logging![])?;
        assert_eq!(visit.visited(), visited);
    }
    // The farthest node from node 0 is at distance 9
    assert_eq!(visit.round(), num_nodes - 1);
    assert_eq!(visited, 2 * num_nodes);
    Ok(())
}
