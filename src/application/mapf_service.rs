// MAPF Service - loads roadmaps from a data source and runs the solver
use std::sync::Arc;

use crate::common::{ApplicationResult, DomainError, DomainResult};
use crate::config::SolverConfig;
use crate::domains::logger::DynLogger;
use crate::domains::mapf::{MapDataSource, MapfSolver, Roadmap, Solution, VertexId};

/// Movement and communication roadmaps of one planning problem.
#[derive(Debug, Clone)]
pub struct MapPair {
    pub movement: Roadmap,
    pub communication: Roadmap,
}

pub struct MapfService {
    data_source: Arc<dyn MapDataSource>,
    logger: DynLogger,
    config: SolverConfig,
}

impl MapfService {
    pub fn new(data_source: Arc<dyn MapDataSource>, logger: DynLogger, config: SolverConfig) -> Self {
        Self { data_source, logger, config }
    }

    pub fn load_maps(&self, movement: &str, communication: &str) -> DomainResult<MapPair> {
        let movement_graph = self.data_source.load_graph(movement)?;
        let communication_graph = self.data_source.load_graph(communication)?;
        if movement_graph.node_count() != communication_graph.node_count() {
            return Err(DomainError::InvalidGraph {
                reason: format!(
                    "{} has {} vertices but {} has {}",
                    movement,
                    movement_graph.node_count(),
                    communication,
                    communication_graph.node_count()
                ),
            });
        }
        self.logger.info(&format!(
            "Loaded {} ({} vertices, {} edges) and {} ({} edges)",
            movement,
            movement_graph.node_count(),
            movement_graph.edge_count(),
            communication,
            communication_graph.edge_count()
        ));
        Ok(MapPair { movement: movement_graph, communication: communication_graph })
    }

    pub fn plan(&self, maps: &MapPair, sources: &[VertexId], targets: &[VertexId]) -> ApplicationResult<Solution> {
        let solver = MapfSolver::new(&maps.movement, &maps.communication, self.config.clone())
            .with_logger(self.logger.clone());
        match solver.solve(sources, targets) {
            Ok(solution) => Ok(solution),
            Err(e) => {
                self.logger.error(&format!("Planning failed: {}", e));
                Err(e.into())
            }
        }
    }

    /// Load both roadmaps by name and plan on them.
    pub fn plan_by_name(
        &self,
        movement: &str,
        communication: &str,
        sources: &[VertexId],
        targets: &[VertexId],
    ) -> ApplicationResult<Solution> {
        let maps = self.load_maps(movement, communication)?;
        self.plan(&maps, sources, targets)
    }
}
