use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};

use crate::common::{DomainError, DomainResult};
use super::ports::{SpatialTopology, Topology};
use super::types::{Coord, VertexId};

/// Undirected roadmap with planar vertex positions.
///
/// The same type backs both the movement graph and the communication graph;
/// vertex ids are the petgraph node indices, so vertices are never removed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roadmap {
    graph: UnGraph<Coord, ()>,
}

/// Human-editable interchange form of a roadmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub vertices: Vec<VertexDocument>,
    #[serde(default)]
    pub edges: Vec<(VertexId, VertexId)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexDocument {
    pub x: f64,
    pub y: f64,
}

impl Roadmap {
    pub fn new() -> Self {
        Self { graph: UnGraph::new_undirected() }
    }

    pub fn from_coords(coords: impl IntoIterator<Item = Coord>) -> Self {
        let mut roadmap = Self::new();
        for coord in coords {
            roadmap.add_vertex(coord);
        }
        roadmap
    }

    /// Build a roadmap from vertex positions and an edge list.
    pub fn from_edges(coords: Vec<Coord>, edges: &[(VertexId, VertexId)]) -> DomainResult<Self> {
        let mut roadmap = Self::from_coords(coords);
        for &(u, v) in edges {
            roadmap.add_edge(u, v)?;
        }
        Ok(roadmap)
    }

    /// Path graph `0 - 1 - ... - (n-1)` laid out on the x axis.
    pub fn line(n: usize) -> Self {
        let mut roadmap = Self::from_coords((0..n).map(|i| Coord(i as f64, 0.0)));
        for i in 1..n {
            roadmap.graph.update_edge(NodeIndex::new(i - 1), NodeIndex::new(i), ());
        }
        roadmap
    }

    /// 4-connected grid with unit spacing; vertex `y * width + x` sits at `(x, y)`.
    pub fn grid(width: usize, height: usize) -> Self {
        let mut roadmap = Self::new();
        for y in 0..height {
            for x in 0..width {
                roadmap.add_vertex(Coord(x as f64, y as f64));
            }
        }
        for y in 0..height {
            for x in 0..width {
                let v = y * width + x;
                if x + 1 < width {
                    roadmap.graph.update_edge(NodeIndex::new(v), NodeIndex::new(v + 1), ());
                }
                if y + 1 < height {
                    roadmap.graph.update_edge(NodeIndex::new(v), NodeIndex::new(v + width), ());
                }
            }
        }
        roadmap
    }

    /// Communication graph over the vertices of `other`: every pair of distinct
    /// vertices at Euclidean distance at most `range` is linked.
    pub fn within_range(other: &Roadmap, range: f64) -> Self {
        let coords: Vec<Coord> = other.graph.node_weights().copied().collect();
        let mut roadmap = Self::from_coords(coords.iter().copied());
        for u in 0..coords.len() {
            for v in (u + 1)..coords.len() {
                if coords[u].distance(&coords[v]) <= range {
                    roadmap.graph.update_edge(NodeIndex::new(u), NodeIndex::new(v), ());
                }
            }
        }
        roadmap
    }

    pub fn add_vertex(&mut self, coord: Coord) -> VertexId {
        self.graph.add_node(coord).index()
    }

    /// Link `u` and `v`. Adding an existing edge is a no-op.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> DomainResult<()> {
        let n = self.graph.node_count();
        if u >= n || v >= n {
            return Err(DomainError::InvalidGraph {
                reason: format!("edge ({}, {}) references a vertex outside 0..{}", u, v, n),
            });
        }
        self.graph.update_edge(NodeIndex::new(u), NodeIndex::new(v), ());
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn graph(&self) -> &UnGraph<Coord, ()> {
        &self.graph
    }

    pub fn edges(&self) -> Vec<(VertexId, VertexId)> {
        self.graph
            .raw_edges()
            .iter()
            .map(|e| (e.source().index(), e.target().index()))
            .collect()
    }

    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            vertices: self
                .graph
                .node_weights()
                .map(|c| VertexDocument { x: c.0, y: c.1 })
                .collect(),
            edges: self.edges(),
        }
    }

    pub fn from_document(document: &GraphDocument) -> DomainResult<Self> {
        let coords = document.vertices.iter().map(|v| Coord(v.x, v.y)).collect();
        Self::from_edges(coords, &document.edges)
    }
}

impl Topology for Roadmap {
    fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    fn neighbors(&self, vertex: VertexId) -> Vec<VertexId> {
        if vertex >= self.graph.node_count() {
            return Vec::new();
        }
        let mut out: Vec<VertexId> = self
            .graph
            .neighbors(NodeIndex::new(vertex))
            .map(|n| n.index())
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    fn are_connected(&self, u: VertexId, v: VertexId) -> bool {
        let n = self.graph.node_count();
        u < n && v < n && self.graph.find_edge(NodeIndex::new(u), NodeIndex::new(v)).is_some()
    }
}

impl SpatialTopology for Roadmap {
    fn coordinates(&self, vertex: VertexId) -> Coord {
        self.graph
            .node_weight(NodeIndex::new(vertex))
            .copied()
            .unwrap_or_default()
    }
}
