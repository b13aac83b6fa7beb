/*!
 * Worker Types
 * Control signals, acknowledged states and errors of the worker protocol
 */

use crate::core::types::{JobId, WorkerId};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Worker operation result
pub type WorkerResult<T> = Result<T, WorkerError>;

/// Worker errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkerError {
    #[error("Failed to start worker for job {job}: {reason}")]
    SpawnFailed { job: JobId, reason: String },

    #[error("Failed to deliver {signal} to worker {worker}: {reason}")]
    SignalFailed {
        worker: WorkerId,
        signal: ControlSignal,
        reason: String,
    },

    #[error("Timed out waiting for worker {0} to change state")]
    WaitTimeout(WorkerId),

    #[error("Wait on worker {worker} failed: {reason}")]
    WaitFailed { worker: WorkerId, reason: String },
}

/// Asynchronous control signals understood by a worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlSignal {
    /// Stop consuming CPU until resumed
    Suspend,
    /// Continue after a suspend
    Resume,
    /// Exit
    Terminate,
}

impl fmt::Display for ControlSignal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ControlSignal::Suspend => write!(f, "suspend"),
            ControlSignal::Resume => write!(f, "resume"),
            ControlSignal::Terminate => write!(f, "terminate"),
        }
    }
}

/// State change reported by `Worker::wait`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatus {
    Stopped,
    Exited,
}

/// Control events observed by an in-process worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerEventKind {
    Started,
    Suspended,
    Resumed,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerEvent {
    pub worker: WorkerId,
    pub job: JobId,
    pub kind: WorkerEventKind,
}
