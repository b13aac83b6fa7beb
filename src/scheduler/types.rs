/*!
 * Scheduler Types
 * Run levels, per-tick outcomes and run reports
 */

use super::admission::AdmissionStats;
use crate::core::types::{JobId, Tick};
use crate::process::{Priority, QueueError};
use crate::worker::WorkerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Dispatch operation result
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Errors that stop the simulation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Could not start job {job}: {source}")]
    Spawn {
        job: JobId,
        #[source]
        source: WorkerError,
    },

    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Run-level queues in strict precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunLevel {
    Realtime,
    First,
    Second,
    Third,
}

impl RunLevel {
    /// Highest precedence first
    pub const ALL: [RunLevel; 4] = [
        RunLevel::Realtime,
        RunLevel::First,
        RunLevel::Second,
        RunLevel::Third,
    ];

    /// Queue a freshly admitted job enters
    pub const fn for_priority(priority: Priority) -> Self {
        match priority {
            Priority::Realtime => RunLevel::Realtime,
            Priority::High => RunLevel::First,
            Priority::Normal => RunLevel::Second,
            Priority::Low => RunLevel::Third,
        }
    }

    /// Queue a job moves to after an unfinished slice. Realtime never moves.
    pub const fn demoted(self) -> Self {
        match self {
            RunLevel::Realtime => RunLevel::Realtime,
            RunLevel::First => RunLevel::Second,
            RunLevel::Second | RunLevel::Third => RunLevel::Third,
        }
    }

    #[inline]
    pub const fn is_realtime(self) -> bool {
        matches!(self, RunLevel::Realtime)
    }
}

impl fmt::Display for RunLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RunLevel::Realtime => write!(f, "realtime"),
            RunLevel::First => write!(f, "level-1"),
            RunLevel::Second => write!(f, "level-2"),
            RunLevel::Third => write!(f, "level-3"),
        }
    }
}

/// What happened to the dispatched job at the end of its slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "to", rename_all = "snake_case")]
pub enum Outcome {
    /// Realtime job keeps the CPU next tick
    Continued,
    /// Suspended and moved down a level
    Demoted(RunLevel),
    /// Suspended and sent to the back of the lowest level
    Rotated,
    /// Finished; worker terminated and resources released
    Retired,
}

/// The single job advanced in a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dispatched {
    pub job: JobId,
    pub level: RunLevel,
    /// Set when this tick started the job's worker
    pub started: bool,
    pub remaining: u32,
    pub outcome: Outcome,
}

/// Everything that happened in one tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub tick: Tick,
    pub arrived: Vec<JobId>,
    pub admitted: Vec<(JobId, RunLevel)>,
    pub discarded: Vec<JobId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispatched: Option<Dispatched>,
}

/// A job that ran to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RetiredJob {
    pub job: JobId,
    /// Clock value at the end of the job's last tick
    pub completed_at: Tick,
}

/// Summary of a complete run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    pub ticks: Tick,
    pub retired: Vec<RetiredJob>,
    pub discarded: Vec<JobId>,
    pub admission: AdmissionStats,
}

impl SimulationReport {
    pub fn completed_at(&self, job: JobId) -> Option<Tick> {
        self.retired
            .iter()
            .find(|retired| retired.job == job)
            .map(|retired| retired.completed_at)
    }
}
