/*!
 * Admission Controller
 *
 * Runs before dispatch on every tick: moves arrived jobs out of the incoming
 * queue, then gives each pending user job one reservation attempt.
 */

use super::queues::QueueSet;
use super::types::RunLevel;
use crate::core::types::{JobId, Tick};
use crate::resources::{MemoryScope, ResourcePool};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Result of one resource-admission pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdmissionPass {
    pub admitted: Vec<(JobId, RunLevel)>,
    pub discarded: Vec<JobId>,
    /// Jobs rotated to retry next tick
    pub waiting: usize,
}

/// Running totals across a simulation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AdmissionStats {
    pub arrived: u64,
    pub admitted: u64,
    pub discarded: u64,
    pub retries: u64,
}

/// Arrival and resource admission for user and realtime jobs
#[derive(Debug, Clone, Default)]
pub struct AdmissionController {
    stats: AdmissionStats,
}

impl AdmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> AdmissionStats {
        self.stats
    }

    /// Move every job whose arrival tick has come from incoming to the
    /// realtime queue or the pending-admission queue, in arrival order
    pub fn admit_arrivals(&mut self, queues: &mut QueueSet, clock: Tick) -> Vec<JobId> {
        let mut arrived = Vec::new();

        while queues
            .incoming
            .peek_front()
            .is_some_and(|job| job.arrival <= clock)
        {
            let Ok(job) = queues.incoming.dequeue_front() else {
                break;
            };
            arrived.push(job.id);

            if job.priority.is_realtime() {
                info!(job = job.id, tick = clock, "A new realtime job has arrived");
                queues.run_level_mut(RunLevel::Realtime).enqueue(job);
            } else {
                info!(job = job.id, tick = clock, priority = %job.priority, "A new user job has arrived");
                queues.pending.enqueue(job);
            }
        }

        self.stats.arrived += arrived.len() as u64;
        arrived
    }

    /// Give every job pending at the start of the pass exactly one attempt:
    /// discard if it can never fit, admit if it fits now, otherwise rotate
    pub fn admit_pending(&mut self, queues: &mut QueueSet, pool: &mut ResourcePool) -> AdmissionPass {
        let mut pass = AdmissionPass::default();
        let attempts = queues.pending.len();

        for _ in 0..attempts {
            let Some(job) = queues.pending.peek_front() else {
                break;
            };
            let requirements = job.requirements;

            if !pool.is_satisfiable(&requirements, MemoryScope::User) {
                let Ok(job) = queues.pending.dequeue_front() else {
                    break;
                };
                warn!(
                    job = job.id,
                    memory = requirements.memory,
                    devices = %requirements.devices,
                    "Job demand exceeds system capacity, discarding"
                );
                pass.discarded.push(job.id);
                continue;
            }

            if pool.check(&requirements, MemoryScope::User) {
                let Ok(mut job) = queues.pending.dequeue_front() else {
                    break;
                };
                match pool.reserve(&requirements, MemoryScope::User) {
                    Ok(reservation) => {
                        let level = RunLevel::for_priority(job.priority);
                        info!(
                            job = job.id,
                            %level,
                            offset = reservation.offset(),
                            memory = reservation.length(),
                            devices = %reservation.devices(),
                            "Allocated resources to a user job"
                        );
                        job.attach_reservation(reservation);
                        pass.admitted.push((job.id, level));
                        queues.run_level_mut(level).enqueue(job);
                    }
                    Err(e) => {
                        warn!(job = job.id, error = %e, "Reservation failed after check");
                        queues.pending.enqueue(job);
                        pass.waiting += 1;
                    }
                }
                continue;
            }

            debug!(job = job.id, "A user job is waiting on resources");
            if queues.pending.rotate().is_err() {
                break;
            }
            pass.waiting += 1;
        }

        self.stats.admitted += pass.admitted.len() as u64;
        self.stats.discarded += pass.discarded.len() as u64;
        self.stats.retries += pass.waiting as u64;
        pass
    }
}
