use bit_set::BitSet;
use log::info;

use crate::color::VertexId;
use crate::error::ColoringError;

/** models an undirected graph to color.
Vertices are dense ids in [0,n). The graph is immutable once built.
*/
#[derive(Debug, Clone)]
pub struct Graph {
    /// nb vertices
    n: usize,
    /// edges of the graph (u < v)
    edges: Vec<(VertexId,VertexId)>,
    /// adj_list[i]: list of vertices adjacent to i
    adj_list: Vec<Vec<VertexId>>,
}


impl Graph {

    /** constructor using an edge list.
    fails if an edge references a vertex outside of [0,n), is a self-loop, or is
    given twice (in any orientation).
    */
    pub fn new(n:usize, edges:&[(VertexId,VertexId)]) -> Result<Self, ColoringError> {
        // seen[u]: neighbors of u already added
        let mut seen:Vec<BitSet> = vec![BitSet::new() ; n];
        let mut adj_list = vec![Vec::new() ; n];
        let mut normalized = Vec::with_capacity(edges.len());
        for &(u,v) in edges {
            if u >= n || v >= n {
                return Err(ColoringError::VertexOutOfRange { u, v, n });
            }
            if u == v {
                return Err(ColoringError::SelfLoop(u));
            }
            if seen[u].contains(v) {
                return Err(ColoringError::DuplicateEdge(u, v));
            }
            seen[u].insert(v);
            seen[v].insert(u);
            adj_list[u].push(v);
            adj_list[v].push(u);
            normalized.push((u.min(v), u.max(v)));
        }
        Ok(Self { n, edges:normalized, adj_list })
    }

    /** constructor using an adjacency list (adj_list[u] contains v iff adj_list[v] contains u) */
    pub fn from_adj_list(adj_list:&[Vec<VertexId>]) -> Result<Self, ColoringError> {
        let n = adj_list.len();
        let mut edges = Vec::new();
        for (u,l) in adj_list.iter().enumerate() {
            for &v in l {
                if v >= n {
                    return Err(ColoringError::VertexOutOfRange { u, v, n });
                }
                if u <= v {
                    edges.push((u,v));
                }
            }
        }
        Self::new(n, &edges)
    }

    /// number of vertices
    pub fn nb_vertices(&self) -> usize { self.n }

    /// number of edges
    pub fn nb_edges(&self) -> usize { self.edges.len() }

    /// iterator over the vertices
    pub fn vertices(&self) -> std::ops::Range<VertexId> { 0..self.n }

    /// edge list (each undirected edge appears once, smallest endpoint first)
    pub fn edges(&self) -> &[(VertexId, VertexId)] { &self.edges }

    /// list of vertices adjacent to u
    pub fn neighbors(&self, u:VertexId) -> &[VertexId] { &self.adj_list[u] }

    /// degree of u
    pub fn degree(&self, u:VertexId) -> usize { self.adj_list[u].len() }

    /// logs statistics of the graph
    pub fn display_statistics(&self) {
        info!("{} \t vertices", self.nb_vertices());
        info!("{} \t edges", self.nb_edges());
        let degrees = self.vertices().map(|i| self.degree(i));
        if let Some(min) = degrees.clone().min() { info!("{} \t min degree", min); }
        if let Some(max) = degrees.max() { info!("{} \t max degree", max); }
    }
}
