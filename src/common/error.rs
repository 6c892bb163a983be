use thiserror::Error;

use crate::domains::mapf::types::VertexId;

/// Failures of the planning engine.
///
/// `NoPath`, `NoOrder` and `NoSolution` are the planning outcomes callers are
/// expected to handle; the remaining variants report malformed input or an
/// exhausted search budget.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanningError {
    #[error("No path for agent {agent} from vertex {start} to vertex {target}")]
    NoPath {
        agent: usize,
        start: VertexId,
        target: VertexId,
    },

    #[error("Initial configuration is not connected enough to order the agents")]
    NoOrder,

    #[error("No conflict-free execution found after {attempts} attempts ({rejected_orders} could not order the agents)")]
    NoSolution { attempts: u32, rejected_orders: u32 },

    #[error("Predecessor chain from {target} does not lead back to {start}")]
    MalformedPredecessors { start: VertexId, target: VertexId },

    #[error("Executions disagree on the boundary configuration at agent {agent}")]
    BoundaryMismatch { agent: usize },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Invalid solver configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Path query budget of {limit} searches exhausted")]
    SearchBudgetExceeded { limit: u64 },
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid graph: {reason}")]
    InvalidGraph { reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Planning error: {0}")]
    Planning(#[from] PlanningError),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] anyhow::Error),
}

pub type PlanningResult<T> = Result<T, PlanningError>;
pub type DomainResult<T> = Result<T, DomainError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;
