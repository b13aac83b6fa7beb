/*!
 * Queue Set
 * The six job queues of the dispatcher
 */

use super::types::RunLevel;
use crate::process::{Job, JobQueue};
use crate::monitoring::dump_queue;

/// Incoming, pending-admission, realtime and three user run-level queues
#[derive(Debug)]
pub struct QueueSet {
    /// Jobs not yet arrived, in arrival order
    pub incoming: JobQueue,
    /// Arrived user jobs waiting for resources
    pub pending: JobQueue,
    realtime: JobQueue,
    first: JobQueue,
    second: JobQueue,
    third: JobQueue,
}

impl Default for QueueSet {
    fn default() -> Self {
        Self::new()
    }
}

impl QueueSet {
    pub fn new() -> Self {
        Self {
            incoming: JobQueue::new("incoming"),
            pending: JobQueue::new("pending"),
            realtime: JobQueue::new("realtime"),
            first: JobQueue::new("level-1"),
            second: JobQueue::new("level-2"),
            third: JobQueue::new("level-3"),
        }
    }

    /// Queue set with `jobs` loaded into the incoming queue
    pub fn with_jobs(jobs: impl IntoIterator<Item = Job>) -> Self {
        let mut queues = Self::new();
        queues.incoming.extend(jobs);
        queues
    }

    pub fn run_level(&self, level: RunLevel) -> &JobQueue {
        match level {
            RunLevel::Realtime => &self.realtime,
            RunLevel::First => &self.first,
            RunLevel::Second => &self.second,
            RunLevel::Third => &self.third,
        }
    }

    pub fn run_level_mut(&mut self, level: RunLevel) -> &mut JobQueue {
        match level {
            RunLevel::Realtime => &mut self.realtime,
            RunLevel::First => &mut self.first,
            RunLevel::Second => &mut self.second,
            RunLevel::Third => &mut self.third,
        }
    }

    /// First non-empty run level in precedence order
    pub fn highest_ready(&self) -> Option<RunLevel> {
        RunLevel::ALL
            .into_iter()
            .find(|&level| !self.run_level(level).is_empty())
    }

    fn all(&self) -> [&JobQueue; 6] {
        [
            &self.incoming,
            &self.pending,
            &self.realtime,
            &self.first,
            &self.second,
            &self.third,
        ]
    }

    /// True once every queue has drained
    pub fn all_empty(&self) -> bool {
        self.all().iter().all(|queue| queue.is_empty())
    }

    /// Number of jobs across all six queues
    pub fn total_len(&self) -> usize {
        self.all().iter().map(|queue| queue.len()).sum()
    }

    /// Every queued job, queue by queue
    pub fn jobs(&self) -> impl Iterator<Item = &Job> {
        self.all().into_iter().flat_map(|queue| queue.iter())
    }

    /// Log the contents of every non-empty queue (debug level)
    pub fn dump(&self) {
        for queue in self.all() {
            if !queue.is_empty() {
                dump_queue(queue);
            }
        }
    }
}
