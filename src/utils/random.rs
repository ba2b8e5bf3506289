use crate::sparse::{Element, Matrix, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generates the adjacency matrix of a random undirected Erdős–Rényi graph.
///
/// Every unordered pair of distinct nodes is connected with probability
/// `p`; each edge gets an integer weight drawn uniformly in
/// `1..=max_weight`, stored in both directions. The generation is
/// deterministic for a given `seed`.
///
/// # Panics
///
/// If `p` is not in [0 . . 1].
pub fn random_undirected<T: Element>(
    num_nodes: usize,
    p: f64,
    max_weight: u32,
    seed: u64,
) -> Result<Matrix<T>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut matrix = Matrix::new(num_nodes, num_nodes, T::SENTINEL)?;
    for i in 0..num_nodes {
        for j in i + 1..num_nodes {
            if rng.random_bool(p) {
                let weight = T::from_f64(rng.random_range(1..=max_weight.max(1)) as f64);
                matrix.set(i, j, weight);
                matrix.set(j, i, weight);
            }
        }
    }
    Ok(matrix)
}
