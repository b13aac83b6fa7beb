/*!
 * Process Module
 * Job records, job queues and the job-file loader
 */

pub mod loader;
pub mod queue;
pub mod types;

// Re-export for convenience
pub use loader::{load_file, parse_jobs, LoaderError, LoaderResult};
pub use queue::{JobQueue, QueueError, QueueResult};
pub use types::{InvalidPriority, Job, Priority};
