use chrono::Utc;

use crate::common::PlanningResult;
use super::context::SearchContext;
use super::events::SolveEvent;
use super::execution::Execution;
use super::types::{Configuration, RepairStrategy, VertexId};
use super::waypoint::{best_neighbour, ranked_search};

/// Result of a repair call.
///
/// `BestEffort` is a degraded success: the depth budget ran out while the
/// execution still had conflicting time steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairOutcome {
    Resolved(Execution),
    BestEffort { execution: Execution, conflicts: usize },
}

impl RepairOutcome {
    pub fn execution(&self) -> &Execution {
        match self {
            RepairOutcome::Resolved(execution) => execution,
            RepairOutcome::BestEffort { execution, .. } => execution,
        }
    }

    pub fn into_execution(self) -> Execution {
        match self {
            RepairOutcome::Resolved(execution) => execution,
            RepairOutcome::BestEffort { execution, .. } => execution,
        }
    }

    pub fn conflicts(&self) -> usize {
        match self {
            RepairOutcome::Resolved(_) => 0,
            RepairOutcome::BestEffort { conflicts, .. } => *conflicts,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, RepairOutcome::Resolved(_))
    }
}

/// Divide-and-conquer repair of connectivity conflicts.
pub struct Reconciler<'c, 'a> {
    ctx: &'c mut SearchContext<'a>,
}

impl<'c, 'a> Reconciler<'c, 'a> {
    pub fn new(ctx: &'c mut SearchContext<'a>) -> Self {
        Self { ctx }
    }

    /// Plan `sources -> targets` and repair it.
    ///
    /// A conflict-free decoupled execution is returned as is. Otherwise one
    /// conflicting time step is rewritten into a middle configuration and
    /// both halves are repaired with `depth_budget - 1` before being joined.
    /// At depth 0 the decoupled execution is returned as best effort.
    pub fn repair(
        &mut self,
        sources: &[VertexId],
        targets: &[VertexId],
        depth_budget: u32,
    ) -> PlanningResult<RepairOutcome> {
        let analyzer = self.ctx.analyzer();
        let execution = self.ctx.build_execution(sources, targets)?;
        let conflicts = analyzer.count_conflicts(&execution);
        tracing::trace!(depth_budget, conflicts, len = execution.len(), "repair call");

        if conflicts == 0 {
            return Ok(RepairOutcome::Resolved(execution));
        }
        if depth_budget == 0 {
            return Ok(RepairOutcome::BestEffort { execution, conflicts });
        }

        let time = analyzer.pick_conflict_time(&execution);
        tracing::debug!(depth_budget, conflicts, time, "repairing conflict");
        self.ctx.record(SolveEvent::ConflictTimeChosen {
            depth: depth_budget,
            time,
            conflicts,
            timestamp: Utc::now(),
        });

        let middle = self.middle_configuration(sources, targets, &execution, time, depth_budget)?;

        let before = self.repair(sources, &middle, depth_budget - 1)?;
        let after = self.repair(&middle, targets, depth_budget - 1)?;
        let joined = before.execution().concat(after.execution())?;
        let conflicts = analyzer.count_conflicts(&joined);
        Ok(if conflicts == 0 {
            RepairOutcome::Resolved(joined)
        } else {
            RepairOutcome::BestEffort { execution: joined, conflicts }
        })
    }

    fn middle_configuration(
        &mut self,
        sources: &[VertexId],
        targets: &[VertexId],
        execution: &Execution,
        time: usize,
        depth: u32,
    ) -> PlanningResult<Configuration> {
        if self.ctx.config().strategy == RepairStrategy::RankedSearch {
            return Ok(match ranked_search(self.ctx, sources, targets)? {
                Some(placement) => placement.configuration,
                None => execution.configuration_at(time),
            });
        }

        let analyzer = self.ctx.analyzer();
        let mut middle: Configuration = Vec::with_capacity(sources.len());
        for agent in 0..sources.len() {
            let current = execution.vertex(agent, time);
            if analyzer.is_ordered_connected(agent, time, execution, &middle) {
                middle.push(current);
                continue;
            }
            let waypoint = best_neighbour(self.ctx, sources, targets, agent, time, &middle, current)?;
            let before = analyzer.count_conflicts(&execution.prefix_agents(agent + 1));
            if waypoint.vertex != current && analyzer.count_conflicts(&waypoint.execution) <= before {
                tracing::trace!(agent, from = current, to = waypoint.vertex, "waypoint replaced");
                self.ctx.record(SolveEvent::WaypointRepaired {
                    depth,
                    agent,
                    from: current,
                    to: waypoint.vertex,
                    timestamp: Utc::now(),
                });
                middle.push(waypoint.vertex);
            } else {
                middle.push(current);
            }
        }
        Ok(middle)
    }
}
