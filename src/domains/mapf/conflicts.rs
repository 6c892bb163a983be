use super::execution::Execution;
use super::ports::Topology;
use super::types::VertexId;

/// Connectivity checks against the communication graph.
///
/// Connectivity is always rooted at agent 0: a configuration is connected
/// when every agent can be reached from agent 0 through agents that share a
/// vertex or sit on communication-linked vertices.
pub struct ConflictAnalyzer<'g, C: ?Sized> {
    communication: &'g C,
}

impl<'g, C: Topology + ?Sized> ConflictAnalyzer<'g, C> {
    pub fn new(communication: &'g C) -> Self {
        Self { communication }
    }

    fn linked(&self, u: VertexId, v: VertexId) -> bool {
        u == v || self.communication.are_connected(u, v)
    }

    pub fn is_connected(&self, configuration: &[VertexId]) -> bool {
        if configuration.is_empty() {
            return true;
        }
        let mut visited = vec![false; configuration.len()];
        let mut stack = vec![0];
        visited[0] = true;
        while let Some(x) = stack.pop() {
            for (agent, &vertex) in configuration.iter().enumerate() {
                if !visited[agent] && self.linked(configuration[x], vertex) {
                    visited[agent] = true;
                    stack.push(agent);
                }
            }
        }
        visited.into_iter().all(|v| v)
    }

    /// Time steps whose configuration is disconnected, in increasing order.
    pub fn conflict_times(&self, execution: &Execution) -> Vec<usize> {
        (0..execution.len())
            .filter(|&t| !self.is_connected(&execution.configuration_at(t)))
            .collect()
    }

    pub fn count_conflicts(&self, execution: &Execution) -> usize {
        execution
            .configurations()
            .filter(|config| !self.is_connected(config))
            .count()
    }

    fn conflicts_at(&self, execution: &Execution, time: usize) -> bool {
        !self.is_connected(&execution.configuration_at(time))
    }

    /// Conflicting time step closest to the middle of the execution.
    ///
    /// Probes `mid, mid+1, mid-1, mid+2, mid-2, ...` (with `mid = len / 2`),
    /// then time 0, then the last step when the length is odd. Falls back to
    /// `mid` when none of the probed steps conflicts.
    pub fn pick_conflict_time(&self, execution: &Execution) -> usize {
        let len = execution.len();
        let mid = len / 2;
        for offset in 0..mid {
            if self.conflicts_at(execution, mid + offset) {
                return mid + offset;
            }
            if self.conflicts_at(execution, mid - offset) {
                return mid - offset;
            }
        }
        if len > 0 && self.conflicts_at(execution, 0) {
            return 0;
        }
        if len % 2 == 1 && self.conflicts_at(execution, len - 1) {
            return len - 1;
        }
        mid
    }

    /// Whether agent `agent` at `time` is a communication neighbour of one of
    /// the agents already fixed in `middle` (those with a smaller index).
    /// Agent 0 is always ordered-connected.
    pub fn is_ordered_connected(
        &self,
        agent: usize,
        time: usize,
        execution: &Execution,
        middle: &[VertexId],
    ) -> bool {
        if agent == 0 {
            return true;
        }
        let vertex = execution.vertex(agent, time);
        middle
            .iter()
            .take(agent)
            .any(|&fixed| self.communication.are_connected(vertex, fixed))
    }
}
