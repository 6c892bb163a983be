use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use anyhow::Result;

use crate::common::{PlanningError, PlanningResult};
use crate::domains::mapf::pathfinder::PathOptions;
use crate::domains::mapf::types::{PlanningAlgorithm, RepairStrategy};

/// Deepest recursion the reconciler accepts; each level doubles the work.
pub const MAX_DEPTH_BUDGET: u32 = 24;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub solver: SolverConfig,
    pub logging: LoggingConfig,
    pub data: DataConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Full restarts under fresh random agent orders.
    pub attempts: u32,
    /// Divide-and-conquer levels before returning a best-effort execution.
    pub depth_budget: u32,
    pub strategy: RepairStrategy,
    /// Random candidates evaluated per greedy repair.
    pub candidate_draws: usize,
    /// Placements tried by the ranked search before it gives up.
    pub search_node_budget: usize,
    pub algorithm: PlanningAlgorithm,
    pub reopen_closed: bool,
    /// Cap on uncached shortest-path searches per solve call.
    pub max_path_queries: Option<u64>,
    /// Seed for the solver's generator; drawn from entropy when unset.
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            attempts: 5,
            depth_budget: 10,
            strategy: RepairStrategy::GreedyRandom,
            candidate_draws: 10,
            search_node_budget: 2_000,
            algorithm: PlanningAlgorithm::AStar,
            reopen_closed: false,
            max_path_queries: None,
            seed: None,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> PlanningResult<()> {
        let invalid = |reason: String| Err(PlanningError::InvalidConfig { reason });
        if self.attempts == 0 {
            return invalid("attempts must be at least 1".to_string());
        }
        if self.depth_budget > MAX_DEPTH_BUDGET {
            return invalid(format!(
                "depth_budget {} exceeds the maximum of {}",
                self.depth_budget, MAX_DEPTH_BUDGET
            ));
        }
        if self.candidate_draws == 0 {
            return invalid("candidate_draws must be at least 1".to_string());
        }
        if self.search_node_budget == 0 {
            return invalid("search_node_budget must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn path_options(&self) -> PathOptions {
        PathOptions {
            algorithm: self.algorithm,
            reopen_closed: self.reopen_closed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Domain log file; console only when unset.
    pub file: Option<String>,
    /// Filter for the tracing subscriber: trace, debug, info, warn, error.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Root of the graph store; see `FilesystemDataSource::new`.
    pub dir: Option<PathBuf>,
}

impl Config {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config = Self::from_toml(&content)?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.solver.validate()?;
        Ok(config)
    }
}
