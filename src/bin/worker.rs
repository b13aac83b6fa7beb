/*!
 * Worker Process
 *
 * Stand-in for a job's CPU work. Runs until the dispatcher terminates it;
 * SIGTSTP / SIGCONT / SIGINT keep their default actions (stop, continue,
 * exit), which is the whole control contract. Exits on its own if the
 * dispatcher that started it goes away.
 */

use log::{debug, info};
use std::thread;
use std::time::Duration;

const BEAT: Duration = Duration::from_secs(1);

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let job = std::env::var("DISPATCHER_JOB_ID").unwrap_or_else(|_| "?".to_string());
    let pid = std::process::id();
    let parent = parent_pid();
    info!("Worker {} for job {} has started executing", pid, job);

    loop {
        thread::sleep(BEAT);
        if parent_pid() != parent {
            info!("Worker {} lost its dispatcher, exiting", pid);
            return;
        }
        debug!("Worker {} is doing some processing...", pid);
    }
}

#[cfg(unix)]
fn parent_pid() -> i32 {
    nix::unistd::getppid().as_raw()
}

#[cfg(not(unix))]
fn parent_pid() -> i32 {
    0
}
