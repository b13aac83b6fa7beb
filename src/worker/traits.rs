/*!
 * Worker Traits
 * Seams between the dispatcher and whatever executes a job
 */

use super::types::{ControlSignal, WorkerResult, WorkerStatus};
use crate::core::types::WorkerId;
use crate::process::Job;

/// A started worker, controlled by signals
pub trait Worker: Send {
    /// Handle recorded on the job
    fn id(&self) -> WorkerId;

    /// Deliver a control signal without waiting for it to take effect
    fn signal(&mut self, signal: ControlSignal) -> WorkerResult<()>;

    /// Block (bounded) until the worker reports a stop or an exit
    fn wait(&mut self) -> WorkerResult<WorkerStatus>;
}

/// Starts workers for jobs on their first dispatch
pub trait WorkerLauncher {
    fn launch(&mut self, job: &Job) -> WorkerResult<Box<dyn Worker>>;
}

impl<L: WorkerLauncher + ?Sized> WorkerLauncher for Box<L> {
    fn launch(&mut self, job: &Job) -> WorkerResult<Box<dyn Worker>> {
        (**self).launch(job)
    }
}
