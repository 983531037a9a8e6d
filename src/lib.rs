//! Randomized local search for the graph coloring problem with a fixed number of colors

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]


/// error type
pub mod error;

/// graph to color
pub mod graph;

/// colorings, conflict evaluation and checker
pub mod color;

/// read DIMACS formats
pub mod dimacs;

/// random graph generators
pub mod generator;

/// search algorithms
pub mod search;

/// sweep over a range of palette sizes
pub mod sweep;

/// reporting and export of colorings
pub mod report;

/// helper and utility methods for executables
pub mod util;
