/*!
 * Worker Tests
 * Control protocol for thread-backed and process-backed workers
 */

use mlfq_dispatcher::process::{Job, Priority};
use mlfq_dispatcher::worker::{
    ControlSignal, ThreadLauncher, WorkerError, WorkerEventKind, WorkerLauncher, WorkerStatus,
};
use mlfq_dispatcher::Requirements;
use pretty_assertions::assert_eq;
use std::time::Duration;

fn job(id: u32) -> Job {
    Job::new(id, 0, Priority::High, 3, Requirements::default())
}

#[test]
fn test_thread_worker_protocol() {
    let mut launcher = ThreadLauncher::new();
    let mut worker = launcher.launch(&job(4)).unwrap();
    assert_eq!(worker.id(), 1);

    worker.signal(ControlSignal::Suspend).unwrap();
    assert_eq!(worker.wait().unwrap(), WorkerStatus::Stopped);
    worker.signal(ControlSignal::Resume).unwrap();
    worker.signal(ControlSignal::Terminate).unwrap();
    assert_eq!(worker.wait().unwrap(), WorkerStatus::Exited);

    use WorkerEventKind::*;
    assert_eq!(launcher.events_for(4), vec![Started, Suspended, Resumed, Terminated]);

    // Signals after exit are reported, not swallowed
    assert!(matches!(
        worker.signal(ControlSignal::Resume),
        Err(WorkerError::SignalFailed { .. })
    ));
}

#[test]
fn test_thread_worker_ids_are_unique() {
    let mut launcher = ThreadLauncher::new();
    let a = launcher.launch(&job(0)).unwrap();
    let b = launcher.launch(&job(1)).unwrap();
    assert_ne!(a.id(), b.id());
}

#[test]
fn test_thread_worker_wait_times_out_without_signal() {
    let mut launcher = ThreadLauncher::new().with_ack_timeout(Duration::from_millis(20));
    let mut worker = launcher.launch(&job(0)).unwrap();

    let id = worker.id();
    assert_eq!(worker.wait().unwrap_err(), WorkerError::WaitTimeout(id));
}

#[test]
fn test_dropped_thread_worker_terminates() {
    let mut launcher = ThreadLauncher::new();
    let worker = launcher.launch(&job(9)).unwrap();
    drop(worker);

    assert_eq!(
        launcher.events_for(9),
        vec![WorkerEventKind::Started, WorkerEventKind::Terminated]
    );
}

#[cfg(unix)]
mod os {
    use super::job;
    use mlfq_dispatcher::worker::os::WORKER_BIN_ENV;
    use mlfq_dispatcher::worker::{ControlSignal, WorkerError, WorkerLauncher, WorkerStatus};
    use mlfq_dispatcher::OsLauncher;
    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use std::path::PathBuf;

    #[test]
    fn test_os_worker_suspend_resume_terminate() {
        let mut launcher = OsLauncher::new("sleep").with_args(vec!["30".to_string()]);
        let mut worker = launcher.launch(&job(0)).unwrap();
        assert!(worker.id() > 0);

        worker.signal(ControlSignal::Suspend).unwrap();
        assert_eq!(worker.wait().unwrap(), WorkerStatus::Stopped);

        worker.signal(ControlSignal::Resume).unwrap();
        worker.signal(ControlSignal::Terminate).unwrap();
        assert_eq!(worker.wait().unwrap(), WorkerStatus::Exited);
        assert_eq!(worker.wait().unwrap(), WorkerStatus::Exited);
    }

    #[test]
    fn test_os_spawn_failure() {
        let mut launcher = OsLauncher::new("/definitely/not/a/worker");
        let err = launcher.launch(&job(3)).err().unwrap();
        assert!(matches!(err, WorkerError::SpawnFailed { job: 3, .. }));
    }

    #[test]
    #[serial]
    fn test_worker_program_from_env() {
        std::env::set_var(WORKER_BIN_ENV, "/opt/worker");
        let launcher = OsLauncher::from_env();
        std::env::remove_var(WORKER_BIN_ENV);
        assert_eq!(launcher.program(), &PathBuf::from("/opt/worker"));
    }

    #[test]
    #[serial]
    fn test_worker_program_defaults_to_sibling() {
        std::env::remove_var(WORKER_BIN_ENV);
        let launcher = OsLauncher::from_env();
        assert!(launcher.program().ends_with("worker"));
    }
}
