/*!
 * Job File Loader Tests
 */

use mlfq_dispatcher::process::{load_file, parse_jobs, LoaderError, Priority};
use miette::Diagnostic;
use mlfq_dispatcher::{Devices, DispatcherConfig, DispatcherError};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_file_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "0, 0, 3, 64, 0, 0, 0, 0").unwrap();
    writeln!(file, "1, 2, 5, 128, 1, 0, 1, 2").unwrap();

    let jobs = load_file(file.path(), 1000).unwrap();
    assert_eq!(jobs.len(), 2);

    assert_eq!(jobs[0].priority, Priority::Realtime);
    assert_eq!(jobs[0].burst, 3);
    assert_eq!(jobs[1].id, 1);
    assert_eq!(jobs[1].arrival, 1);
    assert_eq!(jobs[1].requirements.memory, 128);
    assert_eq!(jobs[1].requirements.devices, Devices::new(1, 0, 1, 2));
    assert!(jobs.iter().all(|job| job.worker.is_none()));
}

#[test]
fn test_missing_file() {
    let err = load_file("/definitely/not/here.txt", 1000).unwrap_err();
    assert!(matches!(err, LoaderError::Unreadable { .. }));
}

fn code_and_help(err: &dyn Diagnostic) -> (String, String) {
    (
        err.code().map(|code| code.to_string()).unwrap_or_default(),
        err.help().map(|help| help.to_string()).unwrap_or_default(),
    )
}

#[test]
fn test_unreadable_file_diagnostic() {
    let err = DispatcherError::from(load_file("/definitely/not/here.txt", 1000).unwrap_err());
    let (code, help) = code_and_help(&err);
    assert_eq!(code, "dispatcher::input::unreadable");
    assert!(help.contains("readable"));
    assert!(!help.contains("comma-separated"));
}

#[test]
fn test_malformed_line_diagnostic() {
    let err = DispatcherError::from(parse_jobs("0, 1, 2\n", 1000).unwrap_err());
    let (code, help) = code_and_help(&err);
    assert_eq!(code, "dispatcher::input::field_count");
    assert!(help.contains("8 comma-separated integers"));

    let err = parse_jobs("0, 7, 1, 0, 0, 0, 0, 0\n", 1000).unwrap_err();
    assert_eq!(code_and_help(&err).0, "dispatcher::input::invalid_priority");
}

#[test]
fn test_load_file_respects_configured_cap() {
    let mut file = NamedTempFile::new().unwrap();
    for arrival in 0..4 {
        writeln!(file, "{}, 1, 1, 0, 0, 0, 0, 0", arrival).unwrap();
    }

    let config = DispatcherConfig::new().with_max_jobs(2);
    let jobs = load_file(file.path(), config.max_jobs).unwrap();
    assert_eq!(jobs.iter().map(|job| job.arrival).collect::<Vec<_>>(), vec![0, 1]);
}

#[test]
fn test_truncates_at_job_limit() {
    let text = "0,1,1,0,0,0,0,0\n".repeat(5);
    let jobs = parse_jobs(&text, 3).unwrap();
    assert_eq!(jobs.len(), 3);
}

#[test]
fn test_blank_lines_skipped() {
    let text = "\n0,1,1,0,0,0,0,0\n\n   \n2,3,1,0,0,0,0,0\n";
    let jobs = parse_jobs(text, 1000).unwrap();
    let ids: Vec<u32> = jobs.iter().map(|job| job.id).collect();
    assert_eq!(ids, vec![0, 1]);
}

#[test]
fn test_sorted_by_arrival_stable() {
    let text = "4,1,1,0,0,0,0,0\n0,2,1,0,0,0,0,0\n4,3,1,0,0,0,0,0\n0,0,1,0,0,0,0,0\n";
    let jobs = parse_jobs(text, 1000).unwrap();
    let order: Vec<(u64, u32)> = jobs.iter().map(|job| (job.arrival, job.id)).collect();
    assert_eq!(order, vec![(0, 1), (0, 3), (4, 0), (4, 2)]);
}

#[test]
fn test_wrong_field_count() {
    let err = parse_jobs("0,1,1,0,0,0,0\n", 1000).unwrap_err();
    assert!(matches!(err, LoaderError::FieldCount { line: 1, found: 7 }));
}

#[test]
fn test_invalid_priority() {
    let err = parse_jobs("0,1,1,0,0,0,0,0\n0,4,1,0,0,0,0,0\n", 1000).unwrap_err();
    assert!(matches!(err, LoaderError::InvalidPriority { line: 2, .. }));
}

#[test]
fn test_non_numeric_field() {
    let err = parse_jobs("0,1,x,0,0,0,0,0\n", 1000).unwrap_err();
    match err {
        LoaderError::InvalidField { field, value, .. } => {
            assert_eq!(field, "burst");
            assert_eq!(value, "x");
        }
        other => panic!("unexpected error: {}", other),
    }
}
