/*!
 * Error Types
 * Top-level dispatcher errors with miette diagnostics
 */

use crate::process::LoaderError;
use crate::scheduler::DispatchError;
use miette::Diagnostic;
use thiserror::Error;

/// Errors reported to the user by the `dispatcher` binary
#[derive(Error, Debug, Diagnostic)]
pub enum DispatcherError {
    #[error("Dispatch list not found")]
    #[diagnostic(
        code(dispatcher::missing_argument),
        help("Usage: dispatcher <job-file>")
    )]
    MissingArgument,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Input(#[from] LoaderError),

    #[error(transparent)]
    #[diagnostic(
        code(dispatcher::aborted),
        help("Check that the worker program exists and is executable (DISPATCHER_WORKER_BIN).")
    )]
    Dispatch(#[from] DispatchError),

    #[error("Failed to write report: {0}")]
    #[diagnostic(code(dispatcher::report))]
    Report(#[from] serde_json::Error),
}

/// Result type of the dispatcher binary
pub type DispatcherResult<T> = Result<T, DispatcherError>;
