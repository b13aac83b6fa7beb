/*!
 * Monitoring
 * Tracing setup and status dumps
 */

mod dump;
mod tracer;

pub use dump::{dump_queue, format_queue};
pub use tracer::{init_tracing, try_init_tracing, TraceFormat, TRACE_JSON_ENV};
