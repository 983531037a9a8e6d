use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use crate::color::VertexId;
use crate::error::ColoringError;
use crate::graph::Graph;

/**
generates a random graph with n vertices (Erdős–Rényi G(n,p) model):
each pair (i,j), i < j, is an edge with probability p, independently.
The generator has its own random source, seeded by `seed`.
*/
pub fn erdos_renyi(n:usize, p:f64, seed:u64) -> Result<Graph, ColoringError> {
    if n == 0 {
        return Err(ColoringError::EmptyGraph);
    }
    if !(0. ..=1.).contains(&p) {
        return Err(ColoringError::InvalidEdgeProbability(p));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges:Vec<(VertexId,VertexId)> = Vec::new();
    for i in 0..n {
        for j in i+1..n {
            if rng.gen::<f64>() < p {
                edges.push((i,j));
            }
        }
    }
    Graph::new(n, &edges)
}

/// complete graph on n vertices
pub fn complete_graph(n:usize) -> Result<Graph, ColoringError> {
    if n == 0 {
        return Err(ColoringError::EmptyGraph);
    }
    let edges:Vec<(VertexId,VertexId)> = (0..n)
        .flat_map(|i| (i+1..n).map(move |j| (i,j)))
        .collect();
    Graph::new(n, &edges)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extreme_probabilities() {
        assert_eq!(erdos_renyi(10, 0., 1).unwrap().nb_edges(), 0);
        assert_eq!(erdos_renyi(10, 1., 1).unwrap().nb_edges(), 45);
    }

    #[test]
    fn test_same_seed_same_graph() {
        let a = erdos_renyi(30, 0.3, 99).unwrap();
        let b = erdos_renyi(30, 0.3, 99).unwrap();
        assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(erdos_renyi(0, 0.5, 0), Err(ColoringError::EmptyGraph)));
        assert!(matches!(erdos_renyi(5, 1.5, 0), Err(ColoringError::InvalidEdgeProbability(_))));
        assert!(matches!(erdos_renyi(5, -0.1, 0), Err(ColoringError::InvalidEdgeProbability(_))));
        assert!(matches!(erdos_renyi(5, f64::NAN, 0), Err(ColoringError::InvalidEdgeProbability(_))));
    }

    #[test]
    fn test_complete_graph() {
        let g = complete_graph(5).unwrap();
        assert_eq!(g.nb_edges(), 10);
        assert!(g.vertices().all(|v| g.degree(v) == 4));
    }
}
