/*!
 * ringdev
 * Two device endpoints over one shared, capacity-bounded ring buffer
 */

pub mod admission;
pub mod buffer;
pub mod control;
pub mod core;
pub mod device;
pub mod monitoring;

// Re-exports
pub use crate::admission::{AccessMode, EndpointStats};
pub use crate::buffer::{Fault, SharedBuffer, UserSink, UserSource};
pub use crate::control::{ControlChannel, ControlCommand, ControlReply};
pub use crate::core::{DeviceConfig, DeviceError, DeviceResult, Direction, EndpointId};
pub use crate::device::{DeviceSet, Interrupter, OpenOptions, Session};
pub use crate::monitoring::{init_tracing, StatsSnapshot};
