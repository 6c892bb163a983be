use std::collections::VecDeque;

use rand::Rng;

use crate::common::{PlanningError, PlanningResult};
use super::ports::Topology;
use super::types::VertexId;

/// Priority order for the agents of `configuration`.
///
/// A uniformly random root agent comes first; the others follow in the order a
/// breadth-first walk of the communication graph, started at the root's vertex,
/// discovers the vertices they occupy; only occupied vertices are expanded.
/// Agents sharing a vertex keep their index order. Fails with `NoOrder` when
/// some agent is never reached.
pub fn choose_order<C, R>(communication: &C, configuration: &[VertexId], rng: &mut R) -> PlanningResult<Vec<usize>>
where
    C: Topology + ?Sized,
    R: Rng + ?Sized,
{
    if configuration.is_empty() {
        return Err(PlanningError::NoOrder);
    }
    let root = rng.gen_range(0..configuration.len());
    let mut order = vec![root];
    let mut ordered = vec![false; configuration.len()];
    ordered[root] = true;

    let mut seen = vec![false; communication.vertex_count().max(configuration[root] + 1)];
    let mut queue = VecDeque::from([configuration[root]]);
    seen[configuration[root]] = true;

    while let Some(vertex) = queue.pop_front() {
        if order.len() == configuration.len() {
            break;
        }
        let mut occupied = false;
        for (agent, &at) in configuration.iter().enumerate() {
            if at != vertex {
                continue;
            }
            occupied = true;
            if !ordered[agent] {
                ordered[agent] = true;
                order.push(agent);
            }
        }
        // Empty vertices do not relay communication.
        if !occupied {
            continue;
        }
        for next in communication.neighbors(vertex) {
            if next < seen.len() && !seen[next] {
                seen[next] = true;
                queue.push_back(next);
            }
        }
    }

    if order.len() < configuration.len() {
        return Err(PlanningError::NoOrder);
    }
    Ok(order)
}
