//! Multi-source breadth-first visits expressed as masked matrix products.

use crate::sparse::{BinaryOp, Context, Element, Error, Mask, Matrix, Result, Semiring, Vector};
use crate::utils::PingPong;
use dsi_progress_logger::ProgressLog;

/// What a [`MsBfs`] computes for every (source, node) pair.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum BfsOutput {
    /// The parent of the node in the visit tree of the source; sources are
    /// their own parents.
    Parents,
    /// The distance of the node from the source.
    Levels,
}

/// A breadth-first visit from many sources at once.
///
/// Row `i` of the `nsrc × n` *frontier* matrix holds the nodes discovered
/// in the last round by the visit from source `i`, each associated with
/// its parent. A round computes the next frontier as the product of the
/// current one with the transposed adjacency matrix, masked by the
/// complement of the parent (or level) matrix so that nodes already
/// discovered are never rediscovered, and merges it into the parent (or
/// level) matrix without overwriting existing entries. The visit ends when
/// a round discovers nothing.
///
/// Both matrices are double buffered: a round reads the current buffers
/// and writes the other ones.
///
/// Node ids are stored as `u32`, with [`u32::MAX`] as fill value.
///
/// # Examples
///
/// ```
/// use dsi_progress_logger::no_logging;
/// use spmat_algo::algo::msbfs::*;
/// use spmat_algo::sparse::*;
///
/// # fn main() -> Result<()> {
/// let ctx = Context::sequential()?;
/// // The path 0 - 1 - 2
/// let graph = Matrix::from_triples(
///     3,
///     3,
///     f32::INFINITY,
///     [(0, 1, 1.0), (1, 0, 1.0), (1, 2, 1.0), (2, 1, 1.0)],
/// )?;
/// let sources = Vector::from_pairs(2, u32::MAX, [(0, 0), (1, 2)])?;
/// let levels = MsBfs::new(&ctx, &graph, &sources, BfsOutput::Levels)?.run(no_logging![])?;
/// assert_eq!(levels.row(0), &[(0, 0), (1, 1), (2, 2)]);
/// assert_eq!(levels.row(1), &[(0, 2), (1, 1), (2, 0)]);
/// # Ok(())
/// # }
/// ```
pub struct MsBfs<'a, T: Element> {
    ctx: &'a Context,
    /// The transposed adjacency matrix
    transposed: Matrix<T>,
    /// Parents (or levels) discovered so far
    parent: PingPong<Matrix<u32>>,
    /// Nodes discovered by the last round, with their parents
    frontier: PingPong<Matrix<u32>>,
    /// The frontier tagged with the current level
    tagged: Option<Matrix<u32>>,
    num_nodes: usize,
    num_sources: usize,
    round: usize,
    visited: usize,
    exhausted: bool,
}

impl<'a, T: Element> MsBfs<'a, T> {
    /// Prepares a visit.
    ///
    /// # Arguments
    /// * `ctx`: the backend context.
    ///
    /// * `adjacency`: a square adjacency matrix; only its structure is used.
    ///
    /// * `sources`: a vector mapping each source ordinal to a node id; every
    ///   ordinal must be present.
    ///
    /// * `output`: whether to compute parents or levels.
    pub fn new(
        ctx: &'a Context,
        adjacency: &Matrix<T>,
        sources: &Vector<u32>,
        output: BfsOutput,
    ) -> Result<Self> {
        let (rows, cols) = adjacency.shape();
        if rows != cols {
            return Err(Error::NotSquare { rows, cols });
        }
        let num_nodes = rows;
        let max = u32::MAX as usize;
        if num_nodes >= max {
            return Err(Error::TooManyNodes { num_nodes, max });
        }
        let num_sources = sources.len();

        let mut transposed = Matrix::new(num_nodes, num_nodes, adjacency.fill())?;
        ctx.m_transpose(&mut transposed, adjacency)?;

        let mut parent: PingPong<Matrix<u32>> =
            PingPong::try_new_with(|| ctx.make_matrix(num_sources, num_nodes))?;
        let mut frontier: PingPong<Matrix<u32>> =
            PingPong::try_new_with(|| ctx.make_matrix(num_sources, num_nodes))?;
        let tagged = match output {
            BfsOutput::Parents => None,
            BfsOutput::Levels => Some(ctx.make_matrix(num_sources, num_nodes)?),
        };

        for index in 0..num_sources {
            let node = sources.get(index).ok_or(Error::MissingSource { index })?;
            if node as usize >= num_nodes {
                return Err(Error::SourceOutOfRange {
                    index,
                    node: node as usize,
                    num_nodes,
                });
            }
            let initial = match output {
                BfsOutput::Parents => node,
                BfsOutput::Levels => 0,
            };
            parent.current_mut().set(index, node as usize, initial);
            frontier.current_mut().set(index, node as usize, node);
        }

        Ok(Self {
            ctx,
            transposed,
            parent,
            frontier,
            tagged,
            num_nodes,
            num_sources,
            round: 0,
            visited: num_sources,
            exhausted: false,
        })
    }

    /// Returns the number of rounds that discovered at least one node.
    pub fn round(&self) -> usize {
        self.round
    }

    /// Returns the number of (source, node) pairs discovered so far,
    /// sources included.
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Returns the parents (or levels) discovered so far.
    pub fn current(&self) -> &Matrix<u32> {
        self.parent.current()
    }

    /// Returns `true` if no further round can discover a node.
    pub fn is_done(&self) -> bool {
        self.exhausted || self.visited >= self.num_nodes * self.num_sources
    }

    /// Performs a round, returning the number of (source, node) pairs it
    /// discovered; zero means that the visit is over.
    pub fn step(&mut self, pl: &mut impl ProgressLog) -> Result<usize> {
        if self.is_done() {
            return Ok(0);
        }

        let (frontier, next_frontier) = self.frontier.split();
        let discovered = self.ctx.mxm_t(
            next_frontier,
            Mask::Complement(self.parent.current()),
            frontier,
            &self.transposed,
            Semiring::ANY_SECOND_INDEX,
        )?;
        self.frontier.flip();

        if discovered == 0 {
            self.exhausted = true;
            return Ok(0);
        }
        self.round += 1;

        let (parent, next_parent) = self.parent.split();
        match self.tagged.as_mut() {
            None => self.ctx.m_eadd(
                next_parent,
                parent,
                self.frontier.current(),
                BinaryOp::KeepExisting,
            )?,
            Some(tagged) => {
                let level = self.round as u32;
                self.ctx
                    .m_apply(tagged, self.frontier.current(), move |_| level)?;
                self.ctx
                    .m_eadd(next_parent, parent, tagged, BinaryOp::KeepExisting)?;
            }
        }
        self.parent.flip();

        self.visited += discovered;
        pl.update_with_count(discovered);
        Ok(discovered)
    }

    /// Runs the visit to completion, returning the `nsrc × n` matrix of
    /// parents (or levels). Nodes unreachable from a source have no entry in
    /// its row.
    pub fn run(mut self, pl: &mut impl ProgressLog) -> Result<Matrix<u32>> {
        pl.item_name("node");
        pl.expected_updates(Some(self.num_nodes * self.num_sources));
        pl.start(format!(
            "Visiting {} nodes from {} sources...",
            self.num_nodes, self.num_sources
        ));

        while !self.is_done() {
            self.step(pl)?;
        }

        pl.done();
        pl.info(format_args!(
            "{} rounds, {} (source, node) pairs reached",
            self.round, self.visited
        ));
        Ok(self.parent.into_current())
    }
}

/// Runs a multi-source visit; see [`MsBfs`].
pub fn msbfs<T: Element>(
    ctx: &Context,
    adjacency: &Matrix<T>,
    sources: &Vector<u32>,
    output: BfsOutput,
    pl: &mut impl ProgressLog,
) -> Result<Matrix<u32>> {
    MsBfs::new(ctx, adjacency, sources, output)?.run(pl)
}

/// Returns a source vector containing every second node, starting from
/// node zero: source `i` is node `2i`.
pub fn every_second_node(num_nodes: usize) -> Result<Vector<u32>> {
    Vector::from_pairs(
        num_nodes / 2,
        u32::MAX,
        (0..num_nodes / 2).map(|i| (i, (2 * i) as u32)),
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use dsi_progress_logger::no_logging;

    fn star(num_leaves: usize) -> Result<Matrix<f32>> {
        Matrix::from_triples(
            num_leaves + 1,
            num_leaves + 1,
            f32::INFINITY,
            (1..=num_leaves).flat_map(|leaf| [(0, leaf, 1.0), (leaf, 0, 1.0)]),
        )
    }

    #[test]
    fn test_rounds() -> Result<()> {
        let ctx = Context::sequential()?;
        let graph = star(4)?;
        let sources = Vector::from_pairs(1, u32::MAX, [(0, 1)])?;
        let mut visit = MsBfs::new(&ctx, &graph, &sources, BfsOutput::Parents)?;

        assert_eq!(visit.step(no_logging![])?, 1);
        assert_eq!(visit.current().row(0), &[(0, 1), (1, 1)]);
        assert_eq!(visit.step(no_logging![])?, 3);
        assert_eq!(visit.round(), 2);
        assert_eq!(visit.visited(), 5);
        assert!(visit.is_done());
        assert_eq!(visit.step(no_logging![])?, 0);
        assert_eq!(
            visit.current().row(0),
            &[(0, 1), (1, 1), (2, 0), (3, 0), (4, 0)]
        );
        Ok(())
    }

    #[test]
    fn test_every_second_node() -> Result<()> {
        let sources = every_second_node(7)?;
        assert_eq!(sources.read(), (vec![0, 1, 2], vec![0, 2, 4]));
        Ok(())
    }

    #[test]
    fn test_invalid_input() -> Result<()> {
        let ctx = Context::sequential()?;
        let rectangular = Matrix::<f32>::new(2, 3, f32::INFINITY)?;
        let sources = Vector::from_pairs(1, u32::MAX, [(0, 0)])?;
        assert!(matches!(
            MsBfs::new(&ctx, &rectangular, &sources, BfsOutput::Levels),
            Err(Error::NotSquare { rows: 2, cols: 3 })
        ));

        let graph = star(2)?;
        let missing = Vector::from_pairs(2, u32::MAX, [(0, 0)])?;
        assert!(matches!(
            MsBfs::new(&ctx, &graph, &missing, BfsOutput::Levels),
            Err(Error::MissingSource { index: 1 })
        ));
        let out_of_range = Vector::from_pairs(1, u32::MAX, [(0, 3)])?;
        assert!(matches!(
            MsBfs::new(&ctx, &graph, &out_of_range, BfsOutput::Levels),
            Err(Error::SourceOutOfRange { node: 3, .. })
        ));
        Ok(())
    }
}
