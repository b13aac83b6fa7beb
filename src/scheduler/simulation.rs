/*!
 * Simulation
 *
 * Owns the clock and drives admission then dispatch once per tick until all
 * six queues have drained.
 */

use super::admission::AdmissionController;
use super::dispatcher::Dispatcher;
use super::queues::QueueSet;
use super::types::{DispatchResult, Outcome, RetiredJob, SimulationReport, TickReport};
use crate::core::config::DispatcherConfig;
use crate::core::types::{JobId, Tick};
use crate::process::Job;
use crate::resources::ResourcePool;
use crate::worker::WorkerLauncher;
use tracing::{debug, info, instrument};

/// One dispatcher run over a fixed job list
pub struct Simulation<L: WorkerLauncher> {
    clock: Tick,
    queues: QueueSet,
    pool: ResourcePool,
    admission: AdmissionController,
    dispatcher: Dispatcher<L>,
    retired: Vec<RetiredJob>,
    discarded: Vec<JobId>,
}

impl<L: WorkerLauncher> Simulation<L> {
    /// Jobs must already be in arrival order (as produced by the loader)
    pub fn new(jobs: Vec<Job>, config: &DispatcherConfig, launcher: L) -> Self {
        info!(jobs = jobs.len(), "Simulation initialized");
        Self {
            clock: 0,
            queues: QueueSet::with_jobs(jobs),
            pool: ResourcePool::from_config(config),
            admission: AdmissionController::new(),
            dispatcher: Dispatcher::new(launcher, config.tick),
            retired: Vec::new(),
            discarded: Vec::new(),
        }
    }

    pub fn clock(&self) -> Tick {
        self.clock
    }

    pub fn queues(&self) -> &QueueSet {
        &self.queues
    }

    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    pub fn launcher(&self) -> &L {
        self.dispatcher.launcher()
    }

    pub fn retired(&self) -> &[RetiredJob] {
        &self.retired
    }

    pub fn discarded(&self) -> &[JobId] {
        &self.discarded
    }

    /// True once every queue is empty
    pub fn is_complete(&self) -> bool {
        self.queues.all_empty()
    }

    /// Advance the clock by one tick: arrivals, admission, dispatch
    #[instrument(level = "debug", skip_all, fields(tick = self.clock))]
    pub fn step(&mut self) -> DispatchResult<TickReport> {
        let tick = self.clock;
        info!(tick, "DISPATCHER TIME: {} SECONDS", tick);
        self.pool.report();

        let arrived = self.admission.admit_arrivals(&mut self.queues, tick);
        let pass = self.admission.admit_pending(&mut self.queues, &mut self.pool);
        self.discarded.extend(pass.discarded.iter().copied());
        self.queues.dump();

        let dispatched = self.dispatcher.dispatch(&mut self.queues, &mut self.pool)?;
        self.clock += 1;

        if let Some(dispatched) = dispatched.filter(|d| d.outcome == Outcome::Retired) {
            self.retired.push(RetiredJob {
                job: dispatched.job,
                completed_at: self.clock,
            });
        }
        if dispatched.is_none() {
            debug!(tick, queued = self.queues.total_len(), "Idle tick");
        }

        Ok(TickReport {
            tick,
            arrived,
            admitted: pass.admitted,
            discarded: pass.discarded,
            dispatched,
        })
    }

    /// Step until all queues drain. Only a worker spawn failure stops early.
    pub fn run(&mut self) -> DispatchResult<SimulationReport> {
        while !self.is_complete() {
            self.step()?;
        }

        let admission = self.admission.stats();
        info!(
            ticks = self.clock,
            retired = self.retired.len(),
            discarded = self.discarded.len(),
            retries = admission.retries,
            "All jobs ran to completion. Terminating dispatcher..."
        );
        Ok(self.report())
    }

    /// Report of the run so far
    pub fn report(&self) -> SimulationReport {
        SimulationReport {
            ticks: self.clock,
            retired: self.retired.clone(),
            discarded: self.discarded.clone(),
            admission: self.admission.stats(),
        }
    }
}
