/*!
 * Scheduler Module
 * Admission, multilevel feedback dispatch and the simulation clock
 */

pub mod admission;
pub mod dispatcher;
pub mod queues;
pub mod simulation;
pub mod types;

// Re-export public API
pub use admission::{AdmissionController, AdmissionPass, AdmissionStats};
pub use dispatcher::Dispatcher;
pub use queues::QueueSet;
pub use simulation::Simulation;
pub use types::{
    DispatchError, DispatchResult, Dispatched, Outcome, RetiredJob, RunLevel, SimulationReport,
    TickReport,
};
