/*!
 * Access Modes
 * The mode a session was opened with, carried until close
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Session access mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    ReadOnly,
    WriteOnly,
    ReadWrite,
}

impl AccessMode {
    /// Resolve a mode from requested capabilities; `None` if neither is set
    #[inline]
    #[must_use]
    pub const fn from_flags(read: bool, write: bool) -> Option<Self> {
        match (read, write) {
            (true, false) => Some(Self::ReadOnly),
            (false, true) => Some(Self::WriteOnly),
            (true, true) => Some(Self::ReadWrite),
            (false, false) => None,
        }
    }

    /// Check if the mode allows reading
    ///
    /// # Performance
    /// Hot path - checked on every read
    #[inline(always)]
    #[must_use]
    pub const fn can_read(&self) -> bool {
        matches!(self, Self::ReadOnly | Self::ReadWrite)
    }

    /// Check if the mode allows writing
    ///
    /// # Performance
    /// Hot path - checked on every write
    #[inline(always)]
    #[must_use]
    pub const fn can_write(&self) -> bool {
        matches!(self, Self::WriteOnly | Self::ReadWrite)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ReadOnly => "read_only",
            Self::WriteOnly => "write_only",
            Self::ReadWrite => "read_write",
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
