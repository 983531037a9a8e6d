use thiserror::Error;

use crate::color::VertexId;

/// errors raised while building a graph, reading an instance or configuring a search.
/// A search that does not reach zero conflicts is not an error.
#[derive(Debug, Error)]
pub enum ColoringError {
    /// the palette must contain at least one color
    #[error("invalid palette size {0} (must be >= 1)")]
    InvalidPaletteSize(usize),
    /// a vertex has color 0 (colors start at 1)
    #[error("vertex {0} has color 0 (colors start at 1)")]
    InvalidColor(VertexId),
    /// the graph has no vertex
    #[error("the graph has no vertices")]
    EmptyGraph,
    /// the iteration budget must be positive
    #[error("invalid iteration budget {0} (must be >= 1)")]
    InvalidMaxIterations(usize),
    /// the reset period must be positive
    #[error("invalid hold {0} (must be >= 1)")]
    InvalidHold(usize),
    /// an edge references a vertex outside of [0, n)
    #[error("edge ({u},{v}) references a vertex outside of [0,{n})")]
    VertexOutOfRange {
        /// first endpoint
        u: VertexId,
        /// second endpoint
        v: VertexId,
        /// number of vertices in the graph
        n: usize,
    },
    /// an edge (v,v)
    #[error("self-loop on vertex {0}")]
    SelfLoop(VertexId),
    /// the same undirected edge was given twice
    #[error("duplicate edge ({0},{1})")]
    DuplicateEdge(VertexId, VertexId),
    /// edge probability outside [0,1]
    #[error("invalid edge probability {0} (must be in [0,1])")]
    InvalidEdgeProbability(f64),
    /// empty range of palette sizes for a sweep
    #[error("invalid color range [{start},{end}]")]
    InvalidColorRange {
        /// first palette size
        start: usize,
        /// last palette size
        end: usize,
    },
    /// error while reading or writing a file
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// malformed instance file
    #[error("parse error: {0}")]
    Parse(String),
    /// (de)serialization error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
