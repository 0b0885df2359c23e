/*!
 * Open Options
 * Builder for the access mode and blocking behaviour of a new session
 */

use crate::admission::AccessMode;
use crate::core::errors::DeviceError;
use crate::core::types::DeviceResult;

/// Options for `DeviceSet::open`, in the style of `std::fs::OpenOptions`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenOptions {
    read: bool,
    write: bool,
    nonblocking: bool,
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_only() -> Self {
        Self::new().read(true)
    }

    pub fn write_only() -> Self {
        Self::new().write(true)
    }

    pub fn read_write() -> Self {
        Self::new().read(true).write(true)
    }

    pub fn read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }

    pub fn write(mut self, write: bool) -> Self {
        self.write = write;
        self
    }

    /// Fail with `WouldBlock` instead of waiting
    pub fn nonblocking(mut self, nonblocking: bool) -> Self {
        self.nonblocking = nonblocking;
        self
    }

    #[inline]
    pub fn is_nonblocking(&self) -> bool {
        self.nonblocking
    }

    /// Resolve the access mode these options request
    pub fn mode(&self) -> DeviceResult<AccessMode> {
        AccessMode::from_flags(self.read, self.write).ok_or_else(|| {
            DeviceError::invalid_argument("session must be opened for reading, writing or both")
        })
    }
}

impl From<AccessMode> for OpenOptions {
    fn from(mode: AccessMode) -> Self {
        Self::new().read(mode.can_read()).write(mode.can_write())
    }
}
