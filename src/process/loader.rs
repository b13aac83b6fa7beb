/*!
 * Job File Loader
 *
 * One job per line, eight comma-separated unsigned integers:
 * arrival, priority, burst, memory, printers, scanners, modems, drives.
 */

use super::types::{InvalidPriority, Job, Priority};
use crate::core::types::JobId;
use crate::resources::{Devices, Requirements};
use miette::Diagnostic;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Loader operation result
pub type LoaderResult<T> = Result<T, LoaderError>;

const FIELDS: [&str; 8] = [
    "arrival", "priority", "burst", "memory", "printers", "scanners", "modems", "drives",
];

#[derive(Error, Debug, Diagnostic)]
pub enum LoaderError {
    #[error("Could not open job file {path}: {source}")]
    #[diagnostic(
        code(dispatcher::input::unreadable),
        help("Check that the path exists and is readable.")
    )]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Line {line}: expected {} fields, found {found}", FIELDS.len())]
    #[diagnostic(
        code(dispatcher::input::field_count),
        help("Each line needs 8 comma-separated integers: arrival, priority (0-3), burst, memory, printers, scanners, modems, drives.")
    )]
    FieldCount { line: usize, found: usize },

    #[error("Line {line}: field '{field}' is not an unsigned integer: '{value}'")]
    #[diagnostic(
        code(dispatcher::input::invalid_field),
        help("Each line needs 8 comma-separated integers: arrival, priority (0-3), burst, memory, printers, scanners, modems, drives.")
    )]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Line {line}: {source}")]
    #[diagnostic(
        code(dispatcher::input::invalid_priority),
        help("Priority 0 is realtime; 1, 2 and 3 are user levels.")
    )]
    InvalidPriority {
        line: usize,
        #[source]
        source: InvalidPriority,
    },
}

/// Read and parse a job file
pub fn load_file(path: impl AsRef<Path>, max_jobs: usize) -> LoaderResult<Vec<Job>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoaderError::Unreadable {
        path: path.display().to_string(),
        source,
    })?;
    let jobs = parse_jobs(&text, max_jobs)?;
    info!(path = %path.display(), jobs = jobs.len(), "Job file loaded");
    Ok(jobs)
}

/// Parse job lines, keeping at most `max_jobs`, ordered by arrival
pub fn parse_jobs(text: &str, max_jobs: usize) -> LoaderResult<Vec<Job>> {
    let mut jobs = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        if jobs.len() == max_jobs {
            debug!(max_jobs, "job limit reached, ignoring remaining lines");
            break;
        }
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let id = jobs.len() as JobId;
        jobs.push(parse_line(id, index + 1, line)?);
    }

    // Stable: equal arrivals keep file order
    jobs.sort_by_key(|job| job.arrival);
    Ok(jobs)
}

fn parse_line(id: JobId, line: usize, text: &str) -> LoaderResult<Job> {
    let raw: Vec<&str> = text.split(',').map(str::trim).collect();
    if raw.len() != FIELDS.len() {
        return Err(LoaderError::FieldCount {
            line,
            found: raw.len(),
        });
    }

    let mut values = [0u32; 8];
    for (slot, (value, field)) in values.iter_mut().zip(raw.iter().zip(FIELDS)) {
        *slot = value.parse().map_err(|_| LoaderError::InvalidField {
            line,
            field,
            value: value.to_string(),
        })?;
    }

    let [arrival, priority, burst, memory, printers, scanners, modems, drives] = values;
    let priority =
        Priority::try_from(priority).map_err(|source| LoaderError::InvalidPriority { line, source })?;

    Ok(Job::new(
        id,
        u64::from(arrival),
        priority,
        burst,
        Requirements::new(
            memory as usize,
            Devices::new(printers, scanners, modems, drives),
        ),
    ))
}
