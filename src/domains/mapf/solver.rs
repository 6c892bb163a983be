use chrono::Utc;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::adapters::outbound::init_noop_logger;
use crate::common::{PlanningError, PlanningResult};
use crate::config::SolverConfig;
use crate::domains::logger::DynLogger;
use super::context::SearchContext;
use super::events::{SolveEvent, SolveReport};
use super::execution::Execution;
use super::ordering::choose_order;
use super::ports::{SpatialTopology, Topology};
use super::reconciler::Reconciler;
use super::types::VertexId;

/// A conflict-free execution in the caller's agent indexing.
#[derive(Debug, Clone)]
pub struct Solution {
    pub execution: Execution,
    pub report: SolveReport,
}

/// Entry point of the planner: retries divide-and-conquer repair under fresh
/// random agent orders until an execution without conflicts is found.
pub struct MapfSolver<'g> {
    movement: &'g dyn SpatialTopology,
    communication: &'g dyn Topology,
    config: SolverConfig,
    logger: DynLogger,
}

impl<'g> MapfSolver<'g> {
    pub fn new(
        movement: &'g dyn SpatialTopology,
        communication: &'g dyn Topology,
        config: SolverConfig,
    ) -> Self {
        Self {
            movement,
            communication,
            config,
            logger: init_noop_logger(),
        }
    }

    pub fn with_logger(mut self, logger: DynLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve with a generator seeded from `config.seed`, or from entropy.
    ///
    /// Never returns `NoOrder`: an attempt whose sources cannot be ordered is
    /// spent and counted, and exhaustion reports
    /// `NoSolution { attempts, rejected_orders }`. `rejected_orders == attempts`
    /// means the initial configuration is not connected.
    pub fn solve(&self, sources: &[VertexId], targets: &[VertexId]) -> PlanningResult<Solution> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.solve_with_rng(sources, targets, &mut rng)
    }

    pub fn solve_with_rng<R: RngCore>(
        &self,
        sources: &[VertexId],
        targets: &[VertexId],
        rng: &mut R,
    ) -> PlanningResult<Solution> {
        self.config.validate()?;
        self.validate_problem(sources, targets)?;

        let mut ctx = SearchContext::new(self.movement, self.communication, &self.config, rng);
        // Unreachable targets fail every attempt the same way.
        ctx.build_execution(sources, targets)?;

        let mut rejected_orders = 0;
        for attempt in 1..=self.config.attempts {
            let order = match choose_order(self.communication, sources, ctx.rng()) {
                Ok(order) => order,
                Err(PlanningError::NoOrder) => {
                    rejected_orders += 1;
                    self.logger.warn(&format!("attempt {}: initial configuration could not be ordered", attempt));
                    ctx.record(SolveEvent::OrderRejected { attempt, timestamp: Utc::now() });
                    continue;
                }
                Err(e) => return Err(e),
            };
            ctx.record(SolveEvent::AttemptStarted {
                attempt,
                order: order.clone(),
                timestamp: Utc::now(),
            });

            let ordered_sources: Vec<VertexId> = order.iter().map(|&i| sources[i]).collect();
            let ordered_targets: Vec<VertexId> = order.iter().map(|&i| targets[i]).collect();
            let outcome = Reconciler::new(&mut ctx).repair(&ordered_sources, &ordered_targets, self.config.depth_budget)?;

            let conflicts = outcome.conflicts();
            ctx.record(SolveEvent::AttemptFinished { attempt, conflicts, timestamp: Utc::now() });
            if outcome.is_resolved() {
                let execution = outcome.into_execution().unpermuted(&order);
                let mut report = ctx.into_report();
                report.attempts_used = attempt;
                self.logger.info(&format!(
                    "run {}: solved {} agents in {} attempt(s), horizon {}, {} path searches",
                    report.run_id,
                    sources.len(),
                    attempt,
                    execution.len(),
                    report.path_queries
                ));
                return Ok(Solution { execution, report });
            }
            self.logger.info(&format!("attempt {}: {} conflicting steps remain", attempt, conflicts));
        }

        self.logger.error(&format!(
            "no conflict-free execution after {} attempts, {} without an agent order",
            self.config.attempts, rejected_orders
        ));
        Err(PlanningError::NoSolution {
            attempts: self.config.attempts,
            rejected_orders,
        })
    }

    fn validate_problem(&self, sources: &[VertexId], targets: &[VertexId]) -> PlanningResult<()> {
        let invalid = |reason: String| Err(PlanningError::InvalidInput { reason });
        if sources.is_empty() {
            return invalid("at least one agent is required".to_string());
        }
        if sources.len() != targets.len() {
            return invalid(format!("{} sources but {} targets", sources.len(), targets.len()));
        }
        let n = self.movement.vertex_count();
        if self.communication.vertex_count() != n {
            return invalid(format!(
                "movement graph has {} vertices, communication graph has {}",
                n,
                self.communication.vertex_count()
            ));
        }
        if let Some(&v) = sources.iter().chain(targets).find(|&&v| v >= n) {
            return invalid(format!("vertex {} is outside 0..{}", v, n));
        }
        Ok(())
    }
}
