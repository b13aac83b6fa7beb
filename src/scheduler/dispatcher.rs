/*!
 * Dispatcher
 *
 * Advances at most one job per tick: the head of the highest-precedence
 * non-empty run level. Starts or resumes its worker, lets it run for one tick,
 * then retires, demotes, rotates or keeps it.
 */

use super::queues::QueueSet;
use super::types::{DispatchError, DispatchResult, Dispatched, Outcome, RunLevel};
use crate::core::types::JobId;
use crate::resources::ResourcePool;
use crate::worker::{ControlSignal, Worker, WorkerLauncher, WorkerStatus};
use std::collections::HashMap;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Scheduling and worker control for the run-level queues
pub struct Dispatcher<L: WorkerLauncher> {
    launcher: L,
    workers: HashMap<JobId, Box<dyn Worker>>,
    tick: Duration,
}

impl<L: WorkerLauncher> Dispatcher<L> {
    pub fn new(launcher: L, tick: Duration) -> Self {
        info!(tick = ?tick, "Dispatcher initialized");
        Self {
            launcher,
            workers: HashMap::new(),
            tick,
        }
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Number of workers started and not yet retired
    pub fn live_workers(&self) -> usize {
        self.workers.len()
    }

    /// Run one tick. Returns `None` on an idle tick.
    ///
    /// A worker that cannot be started is fatal; signal and wait failures on an
    /// existing worker are logged and tolerated.
    pub fn dispatch(
        &mut self,
        queues: &mut QueueSet,
        pool: &mut ResourcePool,
    ) -> DispatchResult<Option<Dispatched>> {
        let Some(level) = queues.highest_ready() else {
            self.run_slice();
            return Ok(None);
        };
        let Some(job) = queues.run_level_mut(level).peek_front_mut() else {
            return Ok(None);
        };
        let job_id = job.id;

        let started = !job.is_started();
        if started {
            let worker = self
                .launcher
                .launch(job)
                .map_err(|source| DispatchError::Spawn {
                    job: job_id,
                    source,
                })?;
            job.worker = Some(worker.id());
            info!(
                job = job_id,
                worker = worker.id(),
                %level,
                priority = %job.priority,
                remaining = job.remaining,
                memory_offset = ?job.memory_offset(),
                memory = job.requirements.memory,
                devices = %job.requirements.devices,
                "A new process was started"
            );
            self.workers.insert(job_id, worker);
        } else if !level.is_realtime() {
            debug!(job = job_id, "Resuming worker");
            self.signal(job_id, ControlSignal::Resume);
        }

        self.run_slice();
        job.run_tick();
        let remaining = job.remaining;
        info!(job = job_id, %level, remaining, "Time left in process");

        let outcome = if remaining == 0 {
            let mut job = queues.run_level_mut(level).dequeue_front()?;
            self.terminate(job_id);
            if let Some(reservation) = job.take_reservation() {
                pool.release(reservation);
            }
            info!(job = job_id, "Job ran to completion");
            Outcome::Retired
        } else if level.is_realtime() {
            Outcome::Continued
        } else {
            self.suspend(job_id);
            let job = queues.run_level_mut(level).dequeue_front()?;
            let target = level.demoted();
            queues.run_level_mut(target).enqueue(job);
            if target == level {
                debug!(job = job_id, %level, "Job rotated");
                Outcome::Rotated
            } else {
                debug!(job = job_id, from = %level, to = %target, "Job demoted");
                Outcome::Demoted(target)
            }
        };

        Ok(Some(Dispatched {
            job: job_id,
            level,
            started,
            remaining,
            outcome,
        }))
    }

    /// Let the active worker execute for one tick
    fn run_slice(&self) {
        if !self.tick.is_zero() {
            thread::sleep(self.tick);
        }
    }

    fn signal(&mut self, job: JobId, signal: ControlSignal) -> bool {
        let Some(worker) = self.workers.get_mut(&job) else {
            warn!(job, %signal, "No worker for job");
            return false;
        };
        match worker.signal(signal) {
            Ok(()) => true,
            Err(e) => {
                warn!(job, error = %e, "Signal not delivered");
                false
            }
        }
    }

    fn suspend(&mut self, job: JobId) {
        if !self.signal(job, ControlSignal::Suspend) {
            return;
        }
        let Some(worker) = self.workers.get_mut(&job) else {
            return;
        };
        match worker.wait() {
            Ok(WorkerStatus::Stopped) => debug!(job, "Worker suspended"),
            Ok(WorkerStatus::Exited) => warn!(job, "Worker exited while being suspended"),
            Err(e) => warn!(job, error = %e, "Worker did not acknowledge suspend"),
        }
    }

    fn terminate(&mut self, job: JobId) {
        if !self.signal(job, ControlSignal::Terminate) {
            self.workers.remove(&job);
            return;
        }
        // Dropping the handle reaps or kills whatever is left of the worker
        let Some(mut worker) = self.workers.remove(&job) else {
            return;
        };
        match worker.wait() {
            Ok(WorkerStatus::Exited) => debug!(job, "Worker terminated"),
            Ok(WorkerStatus::Stopped) => warn!(job, "Worker stopped instead of exiting"),
            Err(e) => warn!(job, error = %e, "Worker did not acknowledge terminate"),
        }
    }
}
