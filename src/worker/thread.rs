/*!
 * In-Process Workers
 *
 * A worker is a thread driven by a command channel and acknowledging state
 * changes on a status channel. Same contract as the process workers, without
 * depending on OS signal semantics.
 */

use super::traits::{Worker, WorkerLauncher};
use super::types::{
    ControlSignal, WorkerError, WorkerEvent, WorkerEventKind, WorkerResult, WorkerStatus,
};
use crate::core::limits::ACK_TIMEOUT;
use crate::core::types::{JobId, WorkerId};
use crate::process::Job;
use flume::{Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::debug;

type EventLog = Arc<Mutex<Vec<WorkerEvent>>>;

/// Launches thread-backed workers and records every control event they observe
#[derive(Debug, Clone)]
pub struct ThreadLauncher {
    next_id: WorkerId,
    ack_timeout: Duration,
    events: EventLog,
}

impl Default for ThreadLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadLauncher {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ack_timeout: ACK_TIMEOUT,
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_ack_timeout(mut self, timeout: Duration) -> Self {
        self.ack_timeout = timeout;
        self
    }

    /// Snapshot of all events so far, in the order workers observed them
    pub fn events(&self) -> Vec<WorkerEvent> {
        self.events.lock().clone()
    }

    /// Events observed by the worker of one job
    pub fn events_for(&self, job: JobId) -> Vec<WorkerEventKind> {
        self.events
            .lock()
            .iter()
            .filter(|event| event.job == job)
            .map(|event| event.kind)
            .collect()
    }
}

impl WorkerLauncher for ThreadLauncher {
    fn launch(&mut self, job: &Job) -> WorkerResult<Box<dyn Worker>> {
        let id = self.next_id;
        let job_id = job.id;
        let (command_tx, command_rx) = flume::unbounded();
        let (status_tx, status_rx) = flume::unbounded();
        let events = Arc::clone(&self.events);

        let handle = thread::Builder::new()
            .name(format!("worker-{}", job_id))
            .spawn(move || run_worker(id, job_id, command_rx, status_tx, events))
            .map_err(|e| WorkerError::SpawnFailed {
                job: job_id,
                reason: e.to_string(),
            })?;

        self.next_id += 1;
        debug!(job = job_id, worker = id, "Spawned worker thread");

        Ok(Box::new(ThreadWorker {
            id,
            commands: command_tx,
            status: status_rx,
            handle: Some(handle),
            ack_timeout: self.ack_timeout,
        }))
    }
}

fn run_worker(
    id: WorkerId,
    job: JobId,
    commands: Receiver<ControlSignal>,
    status: Sender<WorkerStatus>,
    events: EventLog,
) {
    let record = |kind| {
        events.lock().push(WorkerEvent {
            worker: id,
            job,
            kind,
        })
    };
    record(WorkerEventKind::Started);

    for signal in commands.iter() {
        match signal {
            ControlSignal::Suspend => {
                record(WorkerEventKind::Suspended);
                if status.send(WorkerStatus::Stopped).is_err() {
                    break;
                }
            }
            ControlSignal::Resume => record(WorkerEventKind::Resumed),
            ControlSignal::Terminate => {
                record(WorkerEventKind::Terminated);
                let _ = status.send(WorkerStatus::Exited);
                return;
            }
        }
    }
}

/// Handle to a worker thread
#[derive(Debug)]
pub struct ThreadWorker {
    id: WorkerId,
    commands: Sender<ControlSignal>,
    status: Receiver<WorkerStatus>,
    handle: Option<JoinHandle<()>>,
    ack_timeout: Duration,
}

impl Worker for ThreadWorker {
    fn id(&self) -> WorkerId {
        self.id
    }

    fn signal(&mut self, signal: ControlSignal) -> WorkerResult<()> {
        self.commands
            .send(signal)
            .map_err(|_| WorkerError::SignalFailed {
                worker: self.id,
                signal,
                reason: "worker has exited".to_string(),
            })
    }

    fn wait(&mut self) -> WorkerResult<WorkerStatus> {
        match self.status.recv_timeout(self.ack_timeout) {
            Ok(WorkerStatus::Exited) | Err(RecvTimeoutError::Disconnected) => {
                if let Some(handle) = self.handle.take() {
                    let _ = handle.join();
                }
                Ok(WorkerStatus::Exited)
            }
            Ok(status) => Ok(status),
            Err(RecvTimeoutError::Timeout) => Err(WorkerError::WaitTimeout(self.id)),
        }
    }
}

impl Drop for ThreadWorker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.commands.send(ControlSignal::Terminate);
            let _ = handle.join();
        }
    }
}
