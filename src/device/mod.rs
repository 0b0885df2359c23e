/*!
 * Device Module
 * Session layer: open, close, read, write and control on an endpoint
 */

pub mod options;
pub mod session;
pub mod set;

// Re-export public API
pub use options::OpenOptions;
pub use session::{Interrupter, Session};
pub use set::DeviceSet;
