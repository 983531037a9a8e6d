use std::convert::TryFrom;

use fastrand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::ColoringError;
use crate::graph::Graph;

/** Vertex Id */
pub type VertexId = usize;

/** Color (palette colors are 1..=k) */
pub type Color = usize;

/** Solution of a graph coloring problem
(represented as a partition, one color class per line).
*/
pub type Solution = Vec<Vec<VertexId>>;

/** total assignment of a color to every vertex.
Owns its colors: cloning gives an independent copy.
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct Coloring {
    /// colors[v]: color of the vertex v
    colors: Vec<Color>,
}

impl TryFrom<Vec<Color>> for Coloring {
    type Error = ColoringError;

    /// fails if a vertex has color 0 (colors start at 1)
    fn try_from(colors:Vec<Color>) -> Result<Self, Self::Error> {
        match colors.iter().position(|c| *c < 1) {
            Some(v) => Err(ColoringError::InvalidColor(v)),
            None => Ok(Self { colors }),
        }
    }
}

impl From<Coloring> for Vec<Color> {
    fn from(coloring:Coloring) -> Self { coloring.colors }
}

impl Coloring {
    /** draws a color uniformly in [1,k] for each vertex, in increasing vertex order */
    pub fn random(n:usize, k:usize, rng:&mut Rng) -> Self {
        assert!(k >= 1);
        Self { colors: (0..n).map(|_| rng.usize(1..=k)).collect() }
    }

    /** colors every vertex with c */
    pub fn uniform(n:usize, c:Color) -> Self {
        assert!(c >= 1);
        Self { colors: vec![c ; n] }
    }

    /// number of colored vertices
    pub fn len(&self) -> usize { self.colors.len() }

    /// true if no vertex is colored
    pub fn is_empty(&self) -> bool { self.colors.is_empty() }

    /// color of v
    pub fn get(&self, v:VertexId) -> Color { self.colors[v] }

    /// recolors v with c
    pub fn set(&mut self, v:VertexId, c:Color) {
        debug_assert!(c >= 1);
        self.colors[v] = c;
    }

    /// colors as a slice indexed by vertex
    pub fn as_slice(&self) -> &[Color] { &self.colors }

    /// largest color used (0 if no vertex)
    pub fn max_color(&self) -> Color {
        self.colors.iter().copied().max().unwrap_or(0)
    }

    /// true if every color lies in [1,k]
    pub fn within_palette(&self, k:usize) -> bool {
        self.colors.iter().all(|c| (1..=k).contains(c))
    }

    /** renames colors: c becomes mapping[c-1]. */
    pub fn relabel(&self, mapping:&[Color]) -> Self {
        Self { colors: self.colors.iter().map(|c| mapping[c-1]).collect() }
    }

    /** builds the color classes (empty classes are removed) */
    pub fn to_partition(&self) -> Solution {
        let mut sol:Solution = vec![vec![]; self.max_color()];
        for (v,c) in self.colors.iter().enumerate() {
            sol[c-1].push(v);
        }
        sol.into_iter().filter(|e| !e.is_empty()).collect()
    }
}


/**
number of edges (u,v) such that u and v share a color. O(|E|).
# Panics
 - if the coloring does not color exactly the vertices of the graph
*/
pub fn conflict_count(graph:&Graph, coloring:&Coloring) -> usize {
    assert_eq!(graph.nb_vertices(), coloring.len(), "coloring does not match the graph");
    graph.edges().iter()
        .filter(|(u,v)| coloring.get(*u) == coloring.get(*v))
        .count()
}

/// list of conflicting edges
pub fn conflicting_edges(graph:&Graph, coloring:&Coloring) -> Vec<(VertexId,VertexId)> {
    assert_eq!(graph.nb_vertices(), coloring.len(), "coloring does not match the graph");
    graph.edges().iter()
        .filter(|(u,v)| coloring.get(*u) == coloring.get(*v))
        .copied()
        .collect()
}

/**
change of the conflict count if v was recolored with c. O(d(v)).
conflict_count(after) == conflict_count(before) + recolor_delta(before)
*/
pub fn recolor_delta(graph:&Graph, coloring:&Coloring, v:VertexId, c:Color) -> i64 {
    let previous = coloring.get(v);
    if previous == c { return 0; }
    let mut delta:i64 = 0;
    for u in graph.neighbors(v) {
        let cu = coloring.get(*u);
        if cu == previous { delta -= 1; }
        if cu == c { delta += 1; }
    }
    delta
}

/// checker result
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum CheckerResult {
    /// proper coloring using the given number of colors
    Ok(usize),
    /// coloring is total but some edges are conflicting (number of conflicts, first one)
    Conflicts(usize, (VertexId,VertexId)),
    /// vertex not colored
    VertexNotColored(VertexId),
    /// vertex colored although it is not in the graph
    UnknownVertex(VertexId),
    /// vertex colored with a color outside the palette
    ColorOutOfPalette(VertexId, Color),
}

/**
checks that the coloring is total and within the palette [1,k], and counts the conflicts.
*/
pub fn checker(graph:&Graph, coloring:&Coloring, k:usize) -> CheckerResult {
    if coloring.len() < graph.nb_vertices() {
        return CheckerResult::VertexNotColored(coloring.len());
    }
    if coloring.len() > graph.nb_vertices() {
        return CheckerResult::UnknownVertex(graph.nb_vertices());
    }
    for (v,c) in coloring.as_slice().iter().enumerate() {
        if *c < 1 || *c > k {
            return CheckerResult::ColorOutOfPalette(v, *c);
        }
    }
    let conflicts = conflicting_edges(graph, coloring);
    match conflicts.first() {
        None => CheckerResult::Ok(coloring.to_partition().len()),
        Some(e) => CheckerResult::Conflicts(conflicts.len(), *e),
    }
}
