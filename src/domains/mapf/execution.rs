use serde::{Deserialize, Serialize};

use crate::common::{PlanningError, PlanningResult};
use super::pathfinder::{shortest_path, PathOptions};
use super::ports::{SpatialTopology, Topology};
use super::types::{Configuration, VertexId};

/// One walk per agent, all of the same length `T + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    paths: Vec<Vec<VertexId>>,
}

impl Execution {
    /// Wrap per-agent walks that already share one non-zero length.
    pub fn from_paths(paths: Vec<Vec<VertexId>>) -> PlanningResult<Self> {
        let len = paths.first().map(Vec::len).unwrap_or(0);
        if len == 0 || paths.iter().any(|p| p.len() != len) {
            return Err(PlanningError::InvalidInput {
                reason: "execution paths must be non-empty and of equal length".to_string(),
            });
        }
        Ok(Self { paths })
    }

    /// Pad every walk with its last vertex up to the longest walk.
    /// Empty walks are not allowed.
    pub fn padded(mut paths: Vec<Vec<VertexId>>) -> PlanningResult<Self> {
        let max_len = paths.iter().map(Vec::len).max().unwrap_or(0);
        for path in paths.iter_mut() {
            let last = *path.last().ok_or_else(|| PlanningError::InvalidInput {
                reason: "cannot pad an empty path".to_string(),
            })?;
            path.resize(max_len, last);
        }
        Self::from_paths(paths)
    }

    pub fn agent_count(&self) -> usize {
        self.paths.len()
    }

    /// Number of configurations, `T + 1`.
    pub fn len(&self) -> usize {
        self.paths.first().map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn paths(&self) -> &[Vec<VertexId>] {
        &self.paths
    }

    pub fn path(&self, agent: usize) -> &[VertexId] {
        &self.paths[agent]
    }

    pub fn into_paths(self) -> Vec<Vec<VertexId>> {
        self.paths
    }

    pub fn vertex(&self, agent: usize, time: usize) -> VertexId {
        self.paths[agent][time]
    }

    pub fn configuration_at(&self, time: usize) -> Configuration {
        self.paths.iter().map(|p| p[time]).collect()
    }

    pub fn configurations(&self) -> impl Iterator<Item = Configuration> + '_ {
        (0..self.len()).map(move |t| self.configuration_at(t))
    }

    /// Walks of the first `count` agents.
    pub fn prefix_agents(&self, count: usize) -> Execution {
        Execution { paths: self.paths[..count.min(self.paths.len())].to_vec() }
    }

    /// Append `next` in time. The last configuration of `self` must equal the
    /// first configuration of `next`; it appears once in the result.
    pub fn concat(&self, next: &Execution) -> PlanningResult<Execution> {
        if self.agent_count() != next.agent_count() {
            return Err(PlanningError::InvalidInput {
                reason: format!(
                    "cannot concatenate executions of {} and {} agents",
                    self.agent_count(),
                    next.agent_count()
                ),
            });
        }
        let paths = self
            .paths
            .iter()
            .zip(next.paths.iter())
            .enumerate()
            .map(|(agent, (head, tail))| {
                if head.last() != tail.first() {
                    return Err(PlanningError::BoundaryMismatch { agent });
                }
                let mut joined = head.clone();
                joined.extend(tail.iter().skip(1));
                Ok(joined)
            })
            .collect::<PlanningResult<Vec<_>>>()?;
        Ok(Execution { paths })
    }

    /// Reindex agents: agent `k` of the result is agent `order[k]` of `self`.
    pub fn permuted(&self, order: &[usize]) -> Execution {
        Execution { paths: order.iter().map(|&i| self.paths[i].clone()).collect() }
    }

    /// Undo [`Execution::permuted`]: agent `order[k]` of the result is agent `k` of `self`.
    pub fn unpermuted(self, order: &[usize]) -> Execution {
        let mut slots: Vec<Vec<VertexId>> = vec![Vec::new(); self.paths.len()];
        for (k, path) in self.paths.into_iter().enumerate() {
            slots[order[k]] = path;
        }
        Execution { paths: slots }
    }

    /// Every step of every walk is a wait or a movement-graph edge.
    pub fn is_valid_walk<G: Topology + ?Sized>(&self, graph: &G) -> bool {
        self.paths.iter().all(|path| {
            path.windows(2)
                .all(|w| w[0] == w[1] || graph.are_connected(w[0], w[1]))
        })
    }
}

/// Decoupled execution: one independent shortest path per agent, padded so
/// agents wait at their targets. Any unreachable target aborts the build.
pub fn build_execution<G>(
    graph: &G,
    sources: &[VertexId],
    targets: &[VertexId],
    options: PathOptions,
) -> PlanningResult<Execution>
where
    G: SpatialTopology + ?Sized,
{
    assemble_execution(sources, targets, |s, d| shortest_path(graph, s, d, options))
}

/// Shared assembly loop; `find` resolves one `(source, target)` route.
pub(crate) fn assemble_execution<F>(
    sources: &[VertexId],
    targets: &[VertexId],
    mut find: F,
) -> PlanningResult<Execution>
where
    F: FnMut(VertexId, VertexId) -> PlanningResult<Option<Vec<VertexId>>>,
{
    if sources.len() != targets.len() || sources.is_empty() {
        return Err(PlanningError::InvalidInput {
            reason: format!(
                "expected matching non-empty sources and targets, got {} and {}",
                sources.len(),
                targets.len()
            ),
        });
    }
    let mut paths = Vec::with_capacity(sources.len());
    for (agent, (&source, &target)) in sources.iter().zip(targets).enumerate() {
        match find(source, target)? {
            Some(path) => paths.push(path),
            None => return Err(PlanningError::NoPath { agent, start: source, target }),
        }
    }
    Execution::padded(paths)
}
