//! Search algorithms for the graph coloring problem.

/// randomized conflict-minimizing local search with elite resets
pub mod decentralized;
