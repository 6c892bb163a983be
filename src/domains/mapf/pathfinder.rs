//! Single-agent shortest paths over the movement graph.
//!
//! Both searches produce a [`Predecessors`] map that [`extract_path`] turns
//! into a vertex sequence. Edge costs are uniformly one.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use ordered_float::OrderedFloat;

use crate::common::{PlanningError, PlanningResult};
use super::ports::SpatialTopology;
use super::types::{PlanningAlgorithm, VertexId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathOptions {
    pub algorithm: PlanningAlgorithm,
    /// Reopen a closed vertex when a shorter route to it is found. Only needed
    /// when the Euclidean heuristic is not consistent for the embedding.
    pub reopen_closed: bool,
}

/// Predecessor of every vertex reached by a search rooted at `source`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predecessors {
    source: VertexId,
    pred: Vec<Option<VertexId>>,
}

impl Predecessors {
    pub fn new(source: VertexId, pred: Vec<Option<VertexId>>) -> Self {
        Self { source, pred }
    }

    pub fn source(&self) -> VertexId {
        self.source
    }

    pub fn get(&self, vertex: VertexId) -> Option<VertexId> {
        self.pred.get(vertex).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.pred.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pred.is_empty()
    }
}

/// Search a route from `source` to `dest`; `None` when `dest` is unreachable.
pub fn find_predecessors<G>(
    graph: &G,
    source: VertexId,
    dest: VertexId,
    options: PathOptions,
) -> Option<Predecessors>
where
    G: SpatialTopology + ?Sized,
{
    match options.algorithm {
        PlanningAlgorithm::AStar => astar(graph, source, dest, options.reopen_closed),
        PlanningAlgorithm::BreadthFirst => breadth_first(graph, source, dest),
    }
}

/// Shortest vertex sequence from `source` to `dest`, both endpoints included.
pub fn shortest_path<G>(
    graph: &G,
    source: VertexId,
    dest: VertexId,
    options: PathOptions,
) -> PlanningResult<Option<Vec<VertexId>>>
where
    G: SpatialTopology + ?Sized,
{
    match find_predecessors(graph, source, dest, options) {
        Some(pred) => extract_path(&pred, source, dest).map(Some),
        None => Ok(None),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierEntry {
    priority: OrderedFloat<f64>,
    vertex: VertexId,
    cost: usize,
}

/// A* with a Euclidean heuristic. Equal priorities pop the smaller vertex id first.
///
/// Without `reopen_closed` a vertex is final once popped, which is exact only
/// under a consistent heuristic.
pub fn astar<G>(graph: &G, source: VertexId, dest: VertexId, reopen_closed: bool) -> Option<Predecessors>
where
    G: SpatialTopology + ?Sized,
{
    let n = graph.vertex_count();
    if source >= n || dest >= n {
        return None;
    }
    let goal = graph.coordinates(dest);
    let heuristic = |v: VertexId| graph.coordinates(v).distance(&goal);

    let mut cost = vec![usize::MAX; n];
    let mut pred = vec![None; n];
    let mut closed = vec![false; n];
    let mut frontier = BinaryHeap::new();

    cost[source] = 0;
    frontier.push(Reverse(FrontierEntry {
        priority: OrderedFloat(heuristic(source)),
        vertex: source,
        cost: 0,
    }));

    while let Some(Reverse(entry)) = frontier.pop() {
        let x = entry.vertex;
        if closed[x] || entry.cost > cost[x] {
            continue;
        }
        closed[x] = true;
        if x == dest {
            return Some(Predecessors::new(source, pred));
        }
        let next_cost = cost[x] + 1;
        for v in graph.neighbors(x) {
            if closed[v] && !reopen_closed {
                continue;
            }
            if next_cost < cost[v] {
                cost[v] = next_cost;
                pred[v] = Some(x);
                closed[v] = false;
                frontier.push(Reverse(FrontierEntry {
                    priority: OrderedFloat(next_cost as f64 + heuristic(v)),
                    vertex: v,
                    cost: next_cost,
                }));
            }
        }
    }
    None
}

/// Unweighted breadth-first search; neighbours are expanded in ascending id order.
pub fn breadth_first<G>(graph: &G, source: VertexId, dest: VertexId) -> Option<Predecessors>
where
    G: SpatialTopology + ?Sized,
{
    let n = graph.vertex_count();
    if source >= n || dest >= n {
        return None;
    }
    let mut pred = vec![None; n];
    let mut seen = vec![false; n];
    let mut queue = VecDeque::from([source]);
    seen[source] = true;

    while let Some(x) = queue.pop_front() {
        if x == dest {
            return Some(Predecessors::new(source, pred));
        }
        for v in graph.neighbors(x) {
            if !seen[v] {
                seen[v] = true;
                pred[v] = Some(x);
                queue.push_back(v);
            }
        }
    }
    None
}

/// Walk the predecessor chain back from `dest` to `source`.
///
/// Fails with `MalformedPredecessors` when the chain breaks or loops instead
/// of reaching `source`.
pub fn extract_path(pred: &Predecessors, source: VertexId, dest: VertexId) -> PlanningResult<Vec<VertexId>> {
    let malformed = || PlanningError::MalformedPredecessors { start: source, target: dest };
    let mut path = vec![dest];
    let mut current = dest;
    while current != source {
        if path.len() > pred.len() {
            return Err(malformed());
        }
        current = pred.get(current).ok_or_else(malformed)?;
        path.push(current);
    }
    path.reverse();
    Ok(path)
}
