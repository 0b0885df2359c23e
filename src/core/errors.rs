/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::limits::errno;
use super::types::EndpointId;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use thiserror::Error;

/// Direction of a data transfer, used in error context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Read,
    Write,
}

impl Direction {
    /// Buffer state that blocks a transfer in this direction
    pub const fn blocked_state(&self) -> &'static str {
        match self {
            Direction::Read => "empty",
            Direction::Write => "full",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Read => f.write_str("read"),
            Direction::Write => f.write_str("write"),
        }
    }
}

/// Unified device error type with miette diagnostics
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(rename_all = "snake_case", tag = "error", content = "details")]
pub enum DeviceError {
    #[error("Endpoint {endpoint} already has a writer")]
    #[diagnostic(
        code(device::busy),
        help("Only one writing session may be open per endpoint. Close the existing writer or open the other endpoint.")
    )]
    Busy { endpoint: EndpointId },

    #[error("Endpoint {endpoint} has too many readers: {readers}/{max_readers}")]
    #[diagnostic(
        code(device::too_many_readers),
        help("Close a reading session or raise the reader cap with set_max_readers.")
    )]
    TooManyReaders {
        endpoint: EndpointId,
        readers: usize,
        max_readers: i64,
    },

    #[error("Operation would block: buffer {}", .0.blocked_state())]
    #[diagnostic(
        code(device::would_block),
        help("The session is in non-blocking mode. Retry later or open in blocking mode.")
    )]
    WouldBlock(Direction),

    #[error("Operation interrupted")]
    #[diagnostic(
        code(device::interrupted),
        help("The wait was cancelled by an interrupt. The buffer was not modified; the call may be retried.")
    )]
    Interrupted,

    #[error("Invalid argument: {0}")]
    #[diagnostic(code(device::invalid_argument))]
    InvalidArgument(String),

    #[error("Out of memory: could not allocate {requested} bytes")]
    #[diagnostic(
        code(device::out_of_memory),
        help("The buffer was left at its previous size. Request a smaller capacity.")
    )]
    OutOfMemory { requested: usize },

    #[error("Bad caller buffer: {0}")]
    #[diagnostic(
        code(device::fault),
        help("The caller's buffer could not be accessed. No bytes were consumed or produced.")
    )]
    Fault(String),

    #[error("Unsupported control command: {code}")]
    #[diagnostic(code(device::unsupported))]
    Unsupported { code: u32 },

    #[error("No such endpoint: {endpoint} (device has {count})")]
    #[diagnostic(code(device::no_such_endpoint))]
    NoSuchEndpoint { endpoint: EndpointId, count: usize },

    #[error("Session not open for {0}")]
    #[diagnostic(
        code(device::bad_descriptor),
        help("Open the session with the matching access mode.")
    )]
    BadDescriptor(Direction),

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(device::configuration),
        help("Review the device configuration parameters.")
    )]
    Configuration(String),
}

impl DeviceError {
    /// Create an invalid argument error
    #[inline]
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a configuration error
    #[inline]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Errno the character-device driver reports for this error
    #[must_use]
    pub const fn errno(&self) -> i32 {
        match self {
            Self::Busy { .. } => errno::EBUSY,
            Self::TooManyReaders { .. } => errno::EMFILE,
            Self::WouldBlock(_) => errno::EAGAIN,
            Self::Interrupted => errno::ERESTARTSYS,
            Self::InvalidArgument(_) | Self::Configuration(_) => errno::EINVAL,
            Self::OutOfMemory { .. } => errno::ENOMEM,
            Self::Fault(_) => errno::EFAULT,
            Self::Unsupported { .. } => errno::ENOTTY,
            Self::NoSuchEndpoint { .. } => errno::ENXIO,
            Self::BadDescriptor(_) => errno::EBADF,
        }
    }

    /// True for errors that leave the session usable and may succeed on retry
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::WouldBlock(_) | Self::Interrupted)
    }
}

impl From<DeviceError> for io::Error {
    fn from(err: DeviceError) -> Self {
        let kind = match &err {
            DeviceError::WouldBlock(_) => io::ErrorKind::WouldBlock,
            DeviceError::Interrupted => io::ErrorKind::Interrupted,
            DeviceError::InvalidArgument(_) | DeviceError::Configuration(_) => {
                io::ErrorKind::InvalidInput
            }
            DeviceError::OutOfMemory { .. } => io::ErrorKind::OutOfMemory,
            DeviceError::Unsupported { .. } => io::ErrorKind::Unsupported,
            DeviceError::NoSuchEndpoint { .. } => io::ErrorKind::NotFound,
            DeviceError::BadDescriptor(_) => io::ErrorKind::PermissionDenied,
            DeviceError::Busy { .. }
            | DeviceError::TooManyReaders { .. }
            | DeviceError::Fault(_) => io::ErrorKind::Other,
        };
        io::Error::new(kind, err)
    }
}
