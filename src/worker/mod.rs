/*!
 * Worker Module
 * Execution backends for dispatched jobs
 */

#[cfg(unix)]
pub mod os;
pub mod thread;
pub mod traits;
pub mod types;

// Re-export for convenience
#[cfg(unix)]
pub use os::{OsLauncher, OsWorker};
pub use thread::{ThreadLauncher, ThreadWorker};
pub use traits::{Worker, WorkerLauncher};
pub use types::{
    ControlSignal, WorkerError, WorkerEvent, WorkerEventKind, WorkerResult, WorkerStatus,
};
