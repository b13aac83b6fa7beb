/*!
 * MLFQ Dispatcher Library
 * Discrete-time dispatcher simulation with multilevel feedback scheduling
 */

pub mod core;
pub mod monitoring;
pub mod process;
pub mod resources;
pub mod scheduler;
pub mod worker;

// Re-exports
pub use crate::core::{DispatcherConfig, DispatcherError, DispatcherResult};
pub use monitoring::init_tracing;
pub use process::{load_file, parse_jobs, Job, JobQueue, Priority};
pub use resources::{Devices, MemoryScope, Requirements, ResourcePool};
pub use scheduler::{RunLevel, Simulation, SimulationReport};
pub use worker::{ThreadLauncher, Worker, WorkerLauncher};
#[cfg(unix)]
pub use worker::OsLauncher;
