use std::collections::TryReserveError;
use thiserror::Error;

/// Result type alias using the engine's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by sparse containers, engine operations and the
/// algorithms built on them.
///
/// All of them are fatal for the computation that raised them: nothing in
/// this crate retries.
#[derive(Error, Debug)]
pub enum Error {
    /// The adjacency matrix is not square.
    #[error("rows ({rows}) != cols ({cols}) for the provided matrix")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Operands of an engine operation have incompatible shapes.
    #[error("shape mismatch in {op}: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        /// The operation that detected the mismatch.
        op: &'static str,
        /// The expected shape.
        expected: (usize, usize),
        /// The shape actually found.
        found: (usize, usize),
    },

    /// A working structure could not be allocated.
    #[error("failed to allocate {what} ({len} slots)")]
    Allocation {
        /// What was being allocated.
        what: &'static str,
        /// Requested number of slots.
        len: usize,
        /// The underlying allocator failure.
        #[source]
        source: TryReserveError,
    },

    /// A reduction was requested on a structure with no present entries.
    #[error("{op} on a structure with no entries")]
    EmptyReduction {
        /// The reduction.
        op: &'static str,
    },

    /// The source vector has no node id for the given ordinal.
    #[error("no source node at ordinal {index}")]
    MissingSource {
        /// The ordinal.
        index: usize,
    },

    /// A source node id is not a node of the graph.
    #[error("source {index} is node {node}, but the graph has {num_nodes} nodes")]
    SourceOutOfRange {
        /// The ordinal.
        index: usize,
        /// The offending node id.
        node: usize,
        /// Number of nodes of the graph.
        num_nodes: usize,
    },

    /// The graph has too many nodes for node ids to be stored as `u32`
    /// values distinct from the sentinel.
    #[error("the graph has {num_nodes} nodes, but at most {max} are supported")]
    TooManyNodes {
        /// Number of nodes of the graph.
        num_nodes: usize,
        /// Maximum supported number of nodes.
        max: usize,
    },

    /// The start node is not a node of the graph.
    #[error("start node {start} is out of range for a graph with {num_nodes} nodes")]
    StartOutOfRange {
        /// The offending start node.
        start: usize,
        /// Number of nodes of the graph.
        num_nodes: usize,
    },

    /// The backend thread pool could not be built.
    #[error("could not build the backend thread pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
