/*!
 * Control Module
 * Resize, space queries and reader-cap get/set
 */

pub mod channel;
pub mod command;

// Re-export public API
pub use channel::ControlChannel;
pub use command::{codes, ControlCommand, ControlReply};
