//! Prim's minimum spanning tree algorithm on an adjacency matrix.

use crate::sparse::{BinaryOp, Context, Element, Error, Mask, Matrix, Result, Vector};
use crate::utils::PingPong;
use dsi_progress_logger::ProgressLog;
use kahan::KahanSum;

/// A spanning tree found by [`Prim`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanningTree {
    /// The sum of the weights of the edges of the tree.
    pub total_weight: f64,
    /// The number of edges of the tree.
    pub rounds: usize,
}

/// The outcome of [`Prim::run`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrimOutcome {
    /// The graph is connected.
    Tree(SpanningTree),
    /// Some nodes are unreachable from the start node, so no spanning tree
    /// exists.
    NoSpanningTree {
        /// The start node.
        start: usize,
        /// The number of nodes reachable from the start node.
        reached: usize,
    },
}

/// Prim's algorithm growing a minimum spanning tree from a start node.
///
/// The algorithm keeps, for every node, the weight of the cheapest known
/// edge connecting it to the tree, and a mask of the nodes not yet in the
/// tree. Every round restricts the weights to the mask, picks the cheapest
/// node, removes it from the mask and relaxes the weights with its edges
/// by an element-wise minimum into the other weight buffer.
///
/// The adjacency matrix is assumed to be symmetric; rows are used as edge
/// lists. Ties are broken in favor of the node with the smallest id.
pub struct Prim<'a, T: Element> {
    ctx: &'a Context,
    adjacency: &'a Matrix<T>,
    start: usize,
    /// The weight of the cheapest edge connecting each node to the tree
    weights: PingPong<Vector<T>>,
    /// Nodes not in the tree yet
    not_visited: Vector<T>,
    /// Candidate weights restricted to nodes not in the tree
    to_visit: Vector<T>,
    /// Edges of the last node added to the tree
    neighbors: Vector<T>,
    visited_count: usize,
    total_weight: KahanSum<f64>,
}

impl<'a, T: Element> Prim<'a, T> {
    /// Prepares a computation.
    ///
    /// # Arguments
    /// * `ctx`: the backend context.
    ///
    /// * `adjacency`: a square, symmetric weighted adjacency matrix.
    ///
    /// * `start`: the node the tree is grown from.
    pub fn new(ctx: &'a Context, adjacency: &'a Matrix<T>, start: usize) -> Result<Self> {
        let (rows, cols) = adjacency.shape();
        if rows != cols {
            return Err(Error::NotSquare { rows, cols });
        }
        let num_nodes = rows;
        if start >= num_nodes {
            return Err(Error::StartOutOfRange { start, num_nodes });
        }
        let fill = adjacency.fill();

        let mut weights = PingPong::try_new_with(|| Vector::new(num_nodes, fill))?;
        ctx.m_extract_row(weights.current_mut(), adjacency, start)?;

        let not_visited = Vector::from_pairs(
            num_nodes,
            fill,
            (0..num_nodes)
                .filter(|&node| node != start)
                .map(|node| (node, T::ONE)),
        )?;

        Ok(Self {
            ctx,
            adjacency,
            start,
            weights,
            not_visited,
            to_visit: Vector::new(num_nodes, fill)?,
            neighbors: Vector::new(num_nodes, fill)?,
            visited_count: 1,
            total_weight: KahanSum::new(),
        })
    }

    /// Returns the number of nodes in the tree.
    pub fn visited_count(&self) -> usize {
        self.visited_count
    }

    /// Returns the total weight of the edges selected so far.
    pub fn total_weight(&self) -> f64 {
        self.total_weight.sum()
    }

    /// Returns `true` if the tree spans the whole graph.
    pub fn is_complete(&self) -> bool {
        self.visited_count == self.adjacency.nrows()
    }

    /// Performs a round, returning the node added to the tree and the
    /// weight of the edge connecting it.
    ///
    /// Returns `None` if no node outside the tree is connected to it,
    /// which, unless the tree is [complete](Prim::is_complete), means that
    /// the graph is disconnected.
    pub fn step(&mut self) -> Result<Option<(usize, T)>> {
        self.to_visit.clear();
        self.ctx.v_assign(
            &mut self.to_visit,
            Mask::Structure(&self.not_visited),
            self.weights.current(),
        )?;
        if self.to_visit.nvals() == 0 {
            return Ok(None);
        }

        let (node, weight) = self.ctx.v_find_min(&self.to_visit)?;
        self.total_weight += weight.to_f64();
        self.not_visited.remove(node);
        self.visited_count += 1;

        self.ctx
            .m_extract_row(&mut self.neighbors, self.adjacency, node)?;
        let (weights, next_weights) = self.weights.split();
        self.ctx
            .v_eadd(next_weights, weights, &self.neighbors, BinaryOp::Min)?;
        self.weights.flip();

        Ok(Some((node, weight)))
    }

    /// Runs the algorithm to completion.
    pub fn run(mut self, pl: &mut impl ProgressLog) -> Result<PrimOutcome> {
        let num_nodes = self.adjacency.nrows();
        pl.item_name("node");
        pl.expected_updates(Some(num_nodes - 1));
        pl.start(format!(
            "Computing a minimum spanning tree from node {}...",
            self.start
        ));

        while !self.is_complete() {
            if self.step()?.is_none() {
                pl.done();
                pl.info(format_args!(
                    "Only {} of {} nodes are reachable from node {}: no spanning tree",
                    self.visited_count, num_nodes, self.start
                ));
                return Ok(PrimOutcome::NoSpanningTree {
                    start: self.start,
                    reached: self.visited_count,
                });
            }
            pl.light_update();
        }

        pl.done();
        pl.info(format_args!(
            "Total weight: {}",
            self.total_weight.sum()
        ));
        Ok(PrimOutcome::Tree(SpanningTree {
            total_weight: self.total_weight.sum(),
            rounds: self.visited_count - 1,
        }))
    }
}

/// Computes a minimum spanning tree; see [`Prim`].
pub fn prim<T: Element>(
    ctx: &Context,
    adjacency: &Matrix<T>,
    start: usize,
    pl: &mut impl ProgressLog,
) -> Result<PrimOutcome> {
    Prim::new(ctx, adjacency, start)?.run(pl)
}
