/*!
 * MLFQ Dispatcher - Main Entry Point
 *
 * Usage: dispatcher <job-file>
 *
 * Runs every job in the file to completion under the multilevel feedback
 * policy, backing each job with a worker process.
 */

use mlfq_dispatcher::{
    init_tracing, load_file, DispatcherConfig, DispatcherError, Simulation, SimulationReport,
};
use tracing::info;

/// Environment variable enabling a JSON run report on stdout
const REPORT_JSON_ENV: &str = "DISPATCHER_REPORT_JSON";

fn main() -> miette::Result<()> {
    init_tracing();

    let path = std::env::args_os()
        .nth(1)
        .ok_or(DispatcherError::MissingArgument)?;

    let config = DispatcherConfig::default();
    let jobs = load_file(&path, config.max_jobs).map_err(DispatcherError::from)?;
    info!("Read and stored all jobs in dispatch list");

    let report = run(jobs, &config)?;

    let want_json = std::env::var(REPORT_JSON_ENV)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);
    if want_json {
        let json = serde_json::to_string_pretty(&report).map_err(DispatcherError::from)?;
        println!("{}", json);
    }

    Ok(())
}

#[cfg(unix)]
fn run(
    jobs: Vec<mlfq_dispatcher::Job>,
    config: &DispatcherConfig,
) -> Result<SimulationReport, DispatcherError> {
    let launcher = mlfq_dispatcher::OsLauncher::from_env();
    info!(worker = %launcher.program().display(), "Using process workers");
    Ok(Simulation::new(jobs, config, launcher).run()?)
}

#[cfg(not(unix))]
fn run(
    jobs: Vec<mlfq_dispatcher::Job>,
    config: &DispatcherConfig,
) -> Result<SimulationReport, DispatcherError> {
    tracing::warn!("Process signals unavailable on this platform, using thread workers");
    let launcher = mlfq_dispatcher::ThreadLauncher::new();
    Ok(Simulation::new(jobs, config, launcher).run()?)
}
