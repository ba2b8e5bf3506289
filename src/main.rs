/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::{bail, ensure, Context as _, Result};
use dsi_progress_logger::prelude::*;
use spmat_algo::prelude::*;
use spmat_algo::utils::matrix_market::load_matrix_market;

const PRIM_START_NODE: usize = 0;

fn print_matrix(matrix: &Matrix<u32>, name: &str, pl: &impl ProgressLog) {
    pl.info(format_args!("{} (nvals = {}):", name, matrix.nvals()));
    for (row, col, value) in matrix.iter() {
        pl.info(format_args!("  [{}, {}] = {}", row, col, value));
    }
}

/// Parses explicit source node ids; [`u32::MAX`] is the node-id fill value,
/// so it cannot be a source.
fn parse_sources(args: impl IntoIterator<Item = String>) -> Result<Vec<u32>> {
    args.into_iter()
        .map(|arg| -> Result<u32> {
            let id = arg
                .parse::<u32>()
                .with_context(|| format!("Invalid source node {}", arg))?;
            ensure!(id != u32::MAX, "Source node {} is reserved", id);
            Ok(id)
        })
        .collect()
}

fn main() -> Result<()> {
    stderrlog::new()
        .verbosity(2)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;
    let mut args = std::env::args().skip(1);
    let operation = args
        .next()
        .context("Usage: spmat-algo (msbfs|prim) PATH [SOURCE...]")?;
    let path = args.next().context("No matrix path provided")?;

    let mut main_pl = progress_logger![display_memory = true];
    let ctx = Context::new(Threads::Default)?;
    main_pl.info(format_args!("Backend: {}", ctx.info()));

    let graph = load_matrix_market(&path, f32::INFINITY)?;
    main_pl.info(format_args!(
        "Loaded {}: {}x{}, {} entries",
        path,
        graph.nrows(),
        graph.ncols(),
        graph.nvals()
    ));

    match operation.as_str() {
        "msbfs" => {
            let ids = parse_sources(args)?;
            if ids.is_empty() {
                // Every second node is a source
                let sources = msbfs::every_second_node(graph.nrows())?;
                let parents = msbfs(&ctx, &graph, &sources, BfsOutput::Parents, &mut main_pl)?;
                main_pl.info(format_args!(
                    "parent: {} entries over {} sources",
                    parents.nvals(),
                    sources.len()
                ));
            } else {
                let sources =
                    Vector::from_pairs(ids.len(), u32::MAX, ids.iter().copied().enumerate())?;
                let levels = msbfs(&ctx, &graph, &sources, BfsOutput::Levels, &mut main_pl)?;
                print_matrix(&levels, "level", &main_pl);
            }
        }
        "prim" => match prim(&ctx, &graph, PRIM_START_NODE, &mut main_pl)? {
            PrimOutcome::Tree(tree) => {
                main_pl.info(format_args!("total MST weight = {:.2}", tree.total_weight));
            }
            PrimOutcome::NoSpanningTree { start, reached } => {
                bail!(
                    "No spanning tree exists from node {}: only {} of {} nodes are reachable",
                    start,
                    reached,
                    graph.nrows()
                );
            }
        },
        other => bail!("Unknown operation {}", other),
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn args(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_parse_sources() -> Result<()> {
        assert_eq!(parse_sources(args(&["3", "0", "3"]))?, vec![3, 0, 3]);
        assert!(parse_sources(args(&[])).unwrap().is_empty());
        assert!(parse_sources(args(&["4294967295"])).is_err());
        assert!(parse_sources(args(&["-1"])).is_err());
        assert!(parse_sources(args(&["two"])).is_err());
        Ok(())
    }
}
