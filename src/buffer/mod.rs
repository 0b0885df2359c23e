/*!
 * Buffer Module
 * Ring buffer engine shared by all endpoints
 */

pub mod ring;
pub mod shared;
pub mod user;

// Re-export public API
pub use ring::Ring;
pub use shared::SharedBuffer;
pub use user::{Fault, UserSink, UserSource};
