/*!
 * Monitoring
 * Tracing setup and device statistics
 */

mod stats;
mod tracer;

pub use stats::{DeviceStats, StatsSnapshot};
pub use tracer::{init_tracing, ENV_TRACE_JSON};
