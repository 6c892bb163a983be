//! Replacement waypoints for agents that lose contact at a repaired time step.

use std::cmp::Reverse;
use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::common::{PlanningError, PlanningResult};
use super::context::SearchContext;
use super::execution::Execution;
use super::ports::Topology;
use super::types::{Configuration, RepairStrategy, VertexId};

/// Vertex chosen for one agent, with the spliced execution of agents `0..=agent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Waypoint {
    pub vertex: VertexId,
    pub execution: Execution,
}

/// Full configuration found by [`ranked_search`] and its spliced execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub configuration: Configuration,
    pub execution: Execution,
}

/// Communication neighbours of the fixed vertices plus the vertices
/// themselves, in discovery order and without duplicates.
pub fn candidate_pool<C: Topology + ?Sized>(communication: &C, fixed: &[VertexId]) -> Vec<VertexId> {
    let mut seen = HashSet::new();
    let mut pool = Vec::new();
    for &vertex in fixed {
        for v in communication.neighbors(vertex).into_iter().chain(std::iter::once(vertex)) {
            if seen.insert(v) {
                pool.push(v);
            }
        }
    }
    pool
}

/// Splice, swallowing `NoPath` so an unreachable candidate is simply skipped.
fn try_splice(
    ctx: &mut SearchContext<'_>,
    sources: &[VertexId],
    middle: &[VertexId],
    targets: &[VertexId],
) -> PlanningResult<Option<Execution>> {
    match ctx.splice(sources, middle, targets) {
        Ok(execution) => Ok(Some(execution)),
        Err(PlanningError::NoPath { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Greedy repair for agent `agent` at `time`.
///
/// Candidates come from the neighbourhood of the agents already fixed in
/// `middle`. A candidate `u` must be reachable from the agent's source and
/// must reach its target. Each feasible candidate is scored on the spliced
/// execution `sources -> middle + [u] -> targets` of agents `0..=agent`: it
/// may not add conflicts over the best so far, and among those the smallest
/// `(|time - dist(source, u)|, dist(u, target), execution length)` wins.
/// `dist` counts edges, not path vertices, so a candidate reached in exactly
/// `time` steps scores 0 on the first key.
/// Without a winner the agent keeps `current`, its vertex before repair.
pub fn best_neighbour(
    ctx: &mut SearchContext<'_>,
    sources: &[VertexId],
    targets: &[VertexId],
    agent: usize,
    time: usize,
    middle: &[VertexId],
    current: VertexId,
) -> PlanningResult<Waypoint> {
    let sources = &sources[..=agent];
    let targets = &targets[..=agent];
    let fixed = &middle[..agent];
    let analyzer = ctx.analyzer();

    let baseline = ctx.build_execution(sources, targets)?;
    let mut best_conflicts = analyzer.count_conflicts(&baseline);
    let mut best: Option<((usize, usize, usize), Waypoint)> = None;

    let pool = candidate_pool(ctx.communication(), fixed);
    let candidates: Vec<VertexId> = match ctx.config().strategy {
        RepairStrategy::GreedyExhaustive => pool,
        _ => (0..ctx.config().candidate_draws)
            .filter_map(|_| pool.choose(ctx.rng()).copied())
            .collect(),
    };

    for u in candidates {
        let Some(to_u) = ctx.distance(sources[agent], u)? else { continue };
        let Some(from_u) = ctx.distance(u, targets[agent])? else { continue };

        let mut trial = fixed.to_vec();
        trial.push(u);
        let Some(tested) = try_splice(ctx, sources, &trial, targets)? else { continue };

        let conflicts = analyzer.count_conflicts(&tested);
        if conflicts > best_conflicts {
            continue;
        }
        let key = (time.abs_diff(to_u), from_u, tested.len());
        if best.as_ref().map_or(true, |(best_key, _)| key < *best_key) {
            best_conflicts = conflicts;
            best = Some((key, Waypoint { vertex: u, execution: tested }));
        }
    }

    Ok(match best {
        Some((_, waypoint)) => waypoint,
        None => Waypoint { vertex: current, execution: baseline },
    })
}

/// Candidates for the next unplaced agent, best first.
///
/// Ranked by `(detour, -speculative)`: `detour` is the length of
/// `source -> v -> target`; `speculative` is 1 when the configuration made of
/// the placed agents, `v`, and uniformly random guesses for the remaining
/// agents is disconnected. Remaining ties go to the smaller vertex id.
fn ranked_candidates(
    ctx: &mut SearchContext<'_>,
    sources: &[VertexId],
    targets: &[VertexId],
    placed: &[VertexId],
) -> PlanningResult<Vec<VertexId>> {
    let agent = placed.len();
    let vertex_count = ctx.movement().vertex_count();
    let analyzer = ctx.analyzer();
    let pool = if placed.is_empty() {
        (0..vertex_count).collect()
    } else {
        candidate_pool(ctx.communication(), placed)
    };

    let mut ranked = Vec::with_capacity(pool.len());
    for v in pool {
        let Some(to_v) = ctx.distance(sources[agent], v)? else { continue };
        let Some(from_v) = ctx.distance(v, targets[agent])? else { continue };

        let mut guess = placed.to_vec();
        guess.push(v);
        for _ in (agent + 1)..sources.len() {
            guess.push(ctx.rng().gen_range(0..vertex_count));
        }
        let speculative = usize::from(!analyzer.is_connected(&guess));
        ranked.push((to_v + from_v, Reverse(speculative), v));
    }
    ranked.sort_unstable();
    Ok(ranked.into_iter().map(|(_, _, v)| v).collect())
}

/// Depth-first placement of every agent at the repaired time step.
///
/// Agents are placed in index order from their ranked candidates; a complete
/// placement is accepted when `sources -> placement -> targets` splices into a
/// conflict-free execution, otherwise the search backtracks. Runs on an
/// explicit stack and stops after `search_node_budget` placements.
pub fn ranked_search(
    ctx: &mut SearchContext<'_>,
    sources: &[VertexId],
    targets: &[VertexId],
) -> PlanningResult<Option<Placement>> {
    let agent_count = sources.len();
    if agent_count == 0 {
        return Ok(None);
    }
    let budget = ctx.config().search_node_budget;
    let analyzer = ctx.analyzer();

    let mut placed: Vec<VertexId> = Vec::with_capacity(agent_count);
    let mut stack = vec![ranked_candidates(ctx, sources, targets, &placed)?.into_iter()];
    let mut expanded = 0usize;

    while !stack.is_empty() {
        let depth = stack.len() - 1;
        let Some(vertex) = stack[depth].next() else {
            stack.pop();
            continue;
        };
        expanded += 1;
        if expanded > budget {
            tracing::debug!(budget, "ranked search budget exhausted");
            return Ok(None);
        }
        placed.truncate(depth);
        placed.push(vertex);

        if placed.len() < agent_count {
            let next = ranked_candidates(ctx, sources, targets, &placed)?;
            stack.push(next.into_iter());
            continue;
        }
        if let Some(execution) = try_splice(ctx, sources, &placed, targets)? {
            if analyzer.count_conflicts(&execution) == 0 {
                return Ok(Some(Placement { configuration: placed, execution }));
            }
        }
    }
    Ok(None)
}
