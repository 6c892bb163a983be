use crate::common::DomainResult;
use super::graph::Roadmap;
use super::types::{Coord, VertexId};

/// Read-only view of an undirected graph over the vertex domain `0..vertex_count()`.
pub trait Topology {
    fn vertex_count(&self) -> usize;
    /// Adjacent vertices in ascending order, without duplicates.
    fn neighbors(&self, vertex: VertexId) -> Vec<VertexId>;
    fn are_connected(&self, u: VertexId, v: VertexId) -> bool;
}

/// A topology whose vertices carry planar coordinates (the movement graph).
pub trait SpatialTopology: Topology {
    fn coordinates(&self, vertex: VertexId) -> Coord;
}

/// Port trait the planning domain depends on for loading and storing roadmaps.
/// Implementations (adapters) provide filesystem or other backed sources.
pub trait MapDataSource: Send + Sync {
    fn load_graph(&self, name: &str) -> DomainResult<Roadmap>;
    fn save_graph(&self, name: &str, graph: &Roadmap) -> DomainResult<()>;
}
