/*!
 * OS Process Workers
 *
 * Each job is backed by a spawned child process. Suspend, resume and terminate
 * map to SIGTSTP, SIGCONT and SIGINT; waiting uses waitpid(WUNTRACED) so both
 * stops and exits are observed.
 */

use super::traits::{Worker, WorkerLauncher};
use super::types::{ControlSignal, WorkerError, WorkerResult, WorkerStatus};
use crate::core::limits::ACK_TIMEOUT;
use crate::core::types::WorkerId;
use crate::process::Job;
use nix::errno::Errno;
use nix::sys::signal::{kill, Signal as UnixSignal};
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid as NixPid;
use std::env;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Environment variable carrying the job id into the worker
pub const JOB_ID_ENV: &str = "DISPATCHER_JOB_ID";
/// Environment variable carrying the job priority into the worker
pub const JOB_PRIORITY_ENV: &str = "DISPATCHER_JOB_PRIORITY";
/// Environment variable overriding the worker program
pub const WORKER_BIN_ENV: &str = "DISPATCHER_WORKER_BIN";

const WAIT_POLL: Duration = Duration::from_millis(5);

/// Spawns one child process per job
#[derive(Debug, Clone)]
pub struct OsLauncher {
    program: PathBuf,
    args: Vec<String>,
    ack_timeout: Duration,
}

impl OsLauncher {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            ack_timeout: ACK_TIMEOUT,
        }
    }

    /// Worker program from `DISPATCHER_WORKER_BIN`, else the `worker` binary
    /// installed next to the running executable
    pub fn from_env() -> Self {
        if let Some(program) = env::var_os(WORKER_BIN_ENV) {
            return Self::new(program);
        }
        let sibling = env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("worker")));
        Self::new(sibling.unwrap_or_else(|| PathBuf::from("./worker")))
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_ack_timeout(mut self, timeout: Duration) -> Self {
        self.ack_timeout = timeout;
        self
    }

    pub fn program(&self) -> &PathBuf {
        &self.program
    }
}

impl WorkerLauncher for OsLauncher {
    fn launch(&mut self, job: &Job) -> WorkerResult<Box<dyn Worker>> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .env(JOB_ID_ENV, job.id.to_string())
            .env(JOB_PRIORITY_ENV, job.priority.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| WorkerError::SpawnFailed {
                job: job.id,
                reason: format!("{}: {}", self.program.display(), e),
            })?;

        let pid = child.id();
        info!(job = job.id, os_pid = pid, program = %self.program.display(), "Spawned worker process");

        Ok(Box::new(OsWorker {
            child,
            pid,
            exited: false,
            ack_timeout: self.ack_timeout,
        }))
    }
}

/// A running worker process
#[derive(Debug)]
pub struct OsWorker {
    child: Child,
    pid: WorkerId,
    exited: bool,
    ack_timeout: Duration,
}

impl OsWorker {
    fn nix_pid(&self) -> NixPid {
        NixPid::from_raw(self.pid as i32)
    }

    fn unix_signal(signal: ControlSignal) -> UnixSignal {
        match signal {
            ControlSignal::Suspend => UnixSignal::SIGTSTP,
            ControlSignal::Resume => UnixSignal::SIGCONT,
            ControlSignal::Terminate => UnixSignal::SIGINT,
        }
    }
}

impl Worker for OsWorker {
    fn id(&self) -> WorkerId {
        self.pid
    }

    fn signal(&mut self, signal: ControlSignal) -> WorkerResult<()> {
        kill(self.nix_pid(), Self::unix_signal(signal)).map_err(|e| WorkerError::SignalFailed {
            worker: self.pid,
            signal,
            reason: e.to_string(),
        })?;
        debug!(os_pid = self.pid, %signal, "Signal delivered");
        Ok(())
    }

    fn wait(&mut self) -> WorkerResult<WorkerStatus> {
        if self.exited {
            return Ok(WorkerStatus::Exited);
        }

        let deadline = Instant::now() + self.ack_timeout;
        let flags = WaitPidFlag::WUNTRACED | WaitPidFlag::WNOHANG;
        loop {
            match waitpid(self.nix_pid(), Some(flags)) {
                Ok(WaitStatus::Stopped(..)) => return Ok(WorkerStatus::Stopped),
                Ok(WaitStatus::Exited(..)) | Ok(WaitStatus::Signaled(..)) => {
                    self.exited = true;
                    return Ok(WorkerStatus::Exited);
                }
                Ok(_) | Err(Errno::EINTR) => {}
                Err(Errno::ECHILD) => {
                    self.exited = true;
                    return Ok(WorkerStatus::Exited);
                }
                Err(e) => {
                    return Err(WorkerError::WaitFailed {
                        worker: self.pid,
                        reason: e.to_string(),
                    })
                }
            }

            if Instant::now() >= deadline {
                return Err(WorkerError::WaitTimeout(self.pid));
            }
            thread::sleep(WAIT_POLL);
        }
    }
}

impl Drop for OsWorker {
    fn drop(&mut self) {
        if self.exited {
            return;
        }
        // Killed outright: a stopped child would otherwise linger
        if let Err(e) = self.child.kill() {
            warn!(os_pid = self.pid, error = %e, "Failed to kill worker on drop");
            return;
        }
        let _ = self.child.wait();
    }
}
