use std::collections::HashMap;

use rand::RngCore;

use crate::common::{PlanningError, PlanningResult};
use crate::config::SolverConfig;
use super::conflicts::ConflictAnalyzer;
use super::events::{SolveEvent, SolveReport};
use super::execution::{assemble_execution, Execution};
use super::pathfinder::shortest_path;
use super::ports::{SpatialTopology, Topology};
use super::types::VertexId;

/// State shared by every stage of one solve call: the graphs, the tuning, the
/// random source, a memo of shortest paths and the event trace.
///
/// The repair loop asks for the same `(source, dest)` routes many times; paths
/// are cached for the lifetime of the context and only real searches count
/// against `max_path_queries`.
pub struct SearchContext<'a> {
    movement: &'a dyn SpatialTopology,
    communication: &'a dyn Topology,
    config: &'a SolverConfig,
    rng: &'a mut dyn RngCore,
    paths: HashMap<(VertexId, VertexId), Option<Vec<VertexId>>>,
    report: SolveReport,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        movement: &'a dyn SpatialTopology,
        communication: &'a dyn Topology,
        config: &'a SolverConfig,
        rng: &'a mut dyn RngCore,
    ) -> Self {
        Self {
            movement,
            communication,
            config,
            rng,
            paths: HashMap::new(),
            report: SolveReport::new(),
        }
    }

    pub fn movement(&self) -> &'a dyn SpatialTopology {
        self.movement
    }

    pub fn communication(&self) -> &'a dyn Topology {
        self.communication
    }

    pub fn analyzer(&self) -> ConflictAnalyzer<'a, dyn Topology + 'a> {
        ConflictAnalyzer::new(self.communication)
    }

    pub fn config(&self) -> &'a SolverConfig {
        self.config
    }

    pub fn rng(&mut self) -> &mut dyn RngCore {
        &mut *self.rng
    }

    /// Shortest movement path from `source` to `dest`, memoized.
    pub fn path(&mut self, source: VertexId, dest: VertexId) -> PlanningResult<Option<Vec<VertexId>>> {
        if let Some(known) = self.paths.get(&(source, dest)) {
            return Ok(known.clone());
        }
        if let Some(limit) = self.config.max_path_queries {
            if self.report.path_queries >= limit {
                return Err(PlanningError::SearchBudgetExceeded { limit });
            }
        }
        self.report.path_queries += 1;
        let found = shortest_path(self.movement, source, dest, self.config.path_options())?;
        self.paths.insert((source, dest), found.clone());
        Ok(found)
    }

    /// Edge count of the shortest path, `None` when unreachable.
    pub fn distance(&mut self, source: VertexId, dest: VertexId) -> PlanningResult<Option<usize>> {
        Ok(self.path(source, dest)?.map(|p| p.len() - 1))
    }

    /// Decoupled execution for `(sources, targets)` through the path cache.
    pub fn build_execution(&mut self, sources: &[VertexId], targets: &[VertexId]) -> PlanningResult<Execution> {
        assemble_execution(sources, targets, |s, d| self.path(s, d))
    }

    /// Decoupled `sources -> middle` followed by `middle -> targets`.
    pub fn splice(
        &mut self,
        sources: &[VertexId],
        middle: &[VertexId],
        targets: &[VertexId],
    ) -> PlanningResult<Execution> {
        let first = self.build_execution(sources, middle)?;
        let second = self.build_execution(middle, targets)?;
        first.concat(&second)
    }

    pub fn record(&mut self, event: SolveEvent) {
        self.report.record(event);
    }

    pub fn path_queries(&self) -> u64 {
        self.report.path_queries
    }

    pub fn into_report(self) -> SolveReport {
        self.report
    }
}
