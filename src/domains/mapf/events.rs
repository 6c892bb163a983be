use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::DomainEvent;
use super::types::VertexId;

/// Trace of one solve call, in the order things happened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SolveEvent {
    AttemptStarted {
        attempt: u32,
        order: Vec<usize>,
        timestamp: DateTime<Utc>,
    },
    OrderRejected {
        attempt: u32,
        timestamp: DateTime<Utc>,
    },
    ConflictTimeChosen {
        depth: u32,
        time: usize,
        conflicts: usize,
        timestamp: DateTime<Utc>,
    },
    WaypointRepaired {
        depth: u32,
        agent: usize,
        from: VertexId,
        to: VertexId,
        timestamp: DateTime<Utc>,
    },
    AttemptFinished {
        attempt: u32,
        conflicts: usize,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent for SolveEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SolveEvent::AttemptStarted { .. } => "AttemptStarted",
            SolveEvent::OrderRejected { .. } => "OrderRejected",
            SolveEvent::ConflictTimeChosen { .. } => "ConflictTimeChosen",
            SolveEvent::WaypointRepaired { .. } => "WaypointRepaired",
            SolveEvent::AttemptFinished { .. } => "AttemptFinished",
        }
    }

    fn event_version(&self) -> u64 { 1 }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            SolveEvent::AttemptStarted { timestamp, .. } => *timestamp,
            SolveEvent::OrderRejected { timestamp, .. } => *timestamp,
            SolveEvent::ConflictTimeChosen { timestamp, .. } => *timestamp,
            SolveEvent::WaypointRepaired { timestamp, .. } => *timestamp,
            SolveEvent::AttemptFinished { timestamp, .. } => *timestamp,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport {
    pub run_id: Uuid,
    pub attempts_used: u32,
    /// Shortest-path searches actually run (cache hits excluded).
    pub path_queries: u64,
    pub events: Vec<SolveEvent>,
}

impl SolveReport {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            attempts_used: 0,
            path_queries: 0,
            events: Vec::new(),
        }
    }

    pub fn record(&mut self, event: SolveEvent) {
        self.events.push(event);
    }
}

impl Default for SolveReport {
    fn default() -> Self {
        Self::new()
    }
}
