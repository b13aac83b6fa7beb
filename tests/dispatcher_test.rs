/*!
 * Dispatcher Tests
 * Run-level precedence, demotion, retirement and worker control sequences
 */

use mlfq_dispatcher::process::{Job, Priority};
use mlfq_dispatcher::scheduler::{
    AdmissionController, DispatchError, Dispatcher, Outcome, QueueSet, RunLevel,
};
use mlfq_dispatcher::worker::{
    ThreadLauncher, Worker, WorkerError, WorkerEventKind, WorkerLauncher, WorkerResult,
};
use mlfq_dispatcher::{Devices, ResourcePool};
use mockall::mock;
use pretty_assertions::assert_eq;
use std::time::Duration;

mock! {
    pub Launcher {}
    impl WorkerLauncher for Launcher {
        fn launch(&mut self, job: &Job) -> WorkerResult<Box<dyn Worker>>;
    }
}

struct Harness {
    queues: QueueSet,
    pool: ResourcePool,
    admission: AdmissionController,
    dispatcher: Dispatcher<ThreadLauncher>,
}

impl Harness {
    fn new(jobs: Vec<Job>) -> Self {
        let mut harness = Self {
            queues: QueueSet::with_jobs(jobs),
            pool: ResourcePool::new(1024, 960, Devices::new(2, 1, 1, 2)),
            admission: AdmissionController::new(),
            dispatcher: Dispatcher::new(ThreadLauncher::new(), Duration::ZERO),
        };
        harness
            .admission
            .admit_arrivals(&mut harness.queues, 0);
        harness
            .admission
            .admit_pending(&mut harness.queues, &mut harness.pool);
        harness
    }

    fn tick(&mut self) -> Option<(u32, RunLevel, Outcome)> {
        self.dispatcher
            .dispatch(&mut self.queues, &mut self.pool)
            .unwrap()
            .map(|d| (d.job, d.level, d.outcome))
    }
}

#[test]
fn test_user_job_walks_down_the_levels() {
    let mut harness = Harness::new(vec![Job::with_devices(
        0,
        0,
        Priority::High,
        5,
        32,
        Devices::new(1, 0, 0, 0),
    )]);

    assert_eq!(harness.tick(), Some((0, RunLevel::First, Outcome::Demoted(RunLevel::Second))));
    assert_eq!(harness.tick(), Some((0, RunLevel::Second, Outcome::Demoted(RunLevel::Third))));
    assert_eq!(harness.tick(), Some((0, RunLevel::Third, Outcome::Rotated)));
    assert_eq!(harness.tick(), Some((0, RunLevel::Third, Outcome::Rotated)));
    assert_eq!(harness.tick(), Some((0, RunLevel::Third, Outcome::Retired)));
    assert_eq!(harness.tick(), None);

    use WorkerEventKind::*;
    assert_eq!(
        harness.dispatcher.launcher().events_for(0),
        vec![
            Started, Suspended, Resumed, Suspended, Resumed, Suspended, Resumed, Suspended,
            Resumed, Terminated
        ]
    );
    assert_eq!(harness.dispatcher.live_workers(), 0);
}

#[test]
fn test_retirement_releases_resources() {
    let mut harness = Harness::new(vec![Job::with_devices(
        0,
        0,
        Priority::Normal,
        1,
        128,
        Devices::new(2, 1, 1, 2),
    )]);
    assert_eq!(harness.pool.memory().occupied(), 128);
    assert_eq!(harness.pool.devices().available(), Devices::NONE);

    assert_eq!(harness.tick(), Some((0, RunLevel::Second, Outcome::Retired)));
    assert_eq!(harness.pool.memory().occupied(), 0);
    assert_eq!(harness.pool.devices().available(), Devices::new(2, 1, 1, 2));
    assert!(harness.queues.all_empty());
}

#[test]
fn test_realtime_never_suspended() {
    let mut harness = Harness::new(vec![
        Job::with_devices(0, 0, Priority::High, 1, 0, Devices::NONE),
        Job::with_devices(1, 0, Priority::Realtime, 3, 0, Devices::NONE),
    ]);

    assert_eq!(harness.tick(), Some((1, RunLevel::Realtime, Outcome::Continued)));
    assert_eq!(harness.tick(), Some((1, RunLevel::Realtime, Outcome::Continued)));
    assert_eq!(harness.tick(), Some((1, RunLevel::Realtime, Outcome::Retired)));
    assert_eq!(harness.tick(), Some((0, RunLevel::First, Outcome::Retired)));

    use WorkerEventKind::*;
    let launcher = harness.dispatcher.launcher();
    assert_eq!(launcher.events_for(1), vec![Started, Terminated]);
    assert_eq!(launcher.events_for(0), vec![Started, Terminated]);
}

#[test]
fn test_precedence_across_levels() {
    let mut harness = Harness::new(vec![
        Job::with_devices(0, 0, Priority::Low, 1, 0, Devices::NONE),
        Job::with_devices(1, 0, Priority::Normal, 1, 0, Devices::NONE),
        Job::with_devices(2, 0, Priority::High, 1, 0, Devices::NONE),
    ]);

    let order: Vec<u32> = std::iter::from_fn(|| harness.tick().map(|(job, _, _)| job)).collect();
    assert_eq!(order, vec![2, 1, 0]);
}

#[test]
fn test_round_robin_at_lowest_level() {
    let mut harness = Harness::new(vec![
        Job::with_devices(0, 0, Priority::Low, 2, 0, Devices::NONE),
        Job::with_devices(1, 0, Priority::Low, 2, 0, Devices::NONE),
    ]);

    assert_eq!(harness.tick(), Some((0, RunLevel::Third, Outcome::Rotated)));
    assert_eq!(harness.tick(), Some((1, RunLevel::Third, Outcome::Rotated)));
    assert_eq!(harness.tick(), Some((0, RunLevel::Third, Outcome::Retired)));
    assert_eq!(harness.tick(), Some((1, RunLevel::Third, Outcome::Retired)));
}

#[test]
fn test_worker_id_recorded_on_first_run() {
    let mut harness = Harness::new(vec![Job::with_devices(
        0,
        0,
        Priority::High,
        3,
        0,
        Devices::NONE,
    )]);
    harness.tick();

    let job = harness.queues.run_level(RunLevel::Second).peek_front().unwrap();
    assert!(job.is_started());
    assert_eq!(job.remaining, 2);
}

#[test]
fn test_spawn_failure_is_fatal() {
    let mut launcher = MockLauncher::new();
    launcher.expect_launch().times(1).returning(|job| {
        Err(WorkerError::SpawnFailed {
            job: job.id,
            reason: "no such file".to_string(),
        })
    });

    let mut queues = QueueSet::with_jobs(vec![Job::with_devices(
        7,
        0,
        Priority::Realtime,
        2,
        0,
        Devices::NONE,
    )]);
    let mut pool = ResourcePool::new(1024, 960, Devices::new(2, 1, 1, 2));
    AdmissionController::new().admit_arrivals(&mut queues, 0);

    let mut dispatcher = Dispatcher::new(launcher, Duration::ZERO);
    let err = dispatcher.dispatch(&mut queues, &mut pool).unwrap_err();
    assert!(matches!(err, DispatchError::Spawn { job: 7, .. }));

    // The job was not advanced
    let head = queues.run_level(RunLevel::Realtime).peek_front().unwrap();
    assert_eq!(head.remaining, 2);
    assert!(!head.is_started());
}
