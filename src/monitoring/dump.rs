/*!
 * Status Dumps
 * Human-readable queue listings at debug level
 */

use crate::process::JobQueue;
use std::fmt::Write;
use tracing::debug;

/// Render a queue as a table, one job per row
pub fn format_queue(queue: &JobQueue) -> String {
    let mut out = format!("{} CONTENTS\n", queue.name().to_uppercase());
    out.push_str("JOB  PID    ARRIVAL  REMAINING  MEM   RESOURCES(P,S,M,C)\n");
    for job in queue.iter() {
        let pid = job
            .worker
            .map(|pid| pid.to_string())
            .unwrap_or_else(|| "-".to_string());
        // Writing into a String cannot fail
        let _ = writeln!(
            out,
            "{:<4} {:<6} {:<8} {:<10} {:<5} {}",
            job.id, pid, job.arrival, job.remaining, job.requirements.memory, job.requirements.devices
        );
    }
    out
}

pub fn dump_queue(queue: &JobQueue) {
    debug!(queue = queue.name(), len = queue.len(), "\n{}", format_queue(queue));
}
