pub mod conflicts;
pub mod context;
pub mod events;
pub mod execution;
pub mod graph;
pub mod ordering;
pub mod pathfinder;
pub mod ports;
pub mod reconciler;
pub mod solver;
pub mod types;
pub mod waypoint;

pub use conflicts::ConflictAnalyzer;
pub use context::SearchContext;
pub use events::*;
pub use execution::{build_execution, Execution};
pub use graph::*;
pub use ordering::choose_order;
pub use pathfinder::{extract_path, find_predecessors, shortest_path, PathOptions, Predecessors};
pub use ports::*;
pub use reconciler::{Reconciler, RepairOutcome};
pub use solver::{MapfSolver, Solution};
pub use types::*;
pub use waypoint::{best_neighbour, candidate_pool, ranked_search, Placement, Waypoint};
