use serde::{Deserialize, Serialize};

/// Index of a vertex in the movement and communication graphs.
pub type VertexId = usize;

/// Vertex occupied by each agent at one time step, indexed by agent.
pub type Configuration = Vec<VertexId>;

/// Planar position attached to every roadmap vertex.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coord(pub f64, pub f64);

impl Coord {
    pub fn distance(&self, other: &Coord) -> f64 {
        ((self.0 - other.0).powi(2) + (self.1 - other.1).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanningAlgorithm {
    /// Euclidean-guided search with unit edge costs.
    #[default]
    AStar,
    BreadthFirst,
}

/// How the reconciler picks replacement waypoints at a conflicting time step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairStrategy {
    /// Evaluate a fixed number of random draws from the candidate pool.
    #[default]
    GreedyRandom,
    /// Evaluate every vertex of the candidate pool.
    GreedyExhaustive,
    /// Place all agents at once with a ranked depth-first search.
    RankedSearch,
}
