/*!
 * Endpoint Counters
 * Per-endpoint reader/writer accounting and the reader cap
 */

use super::mode::AccessMode;
use super::types::EndpointStats;
use crate::core::errors::DeviceError;
use crate::core::limits::MAX_WRITERS_PER_ENDPOINT;
use crate::core::types::{DeviceResult, EndpointId};

/// Admission state of one endpoint
///
/// Not synchronized; lives in the `SharedBuffer` state under its lock.
#[derive(Debug, Clone)]
pub struct Endpoint {
    id: EndpointId,
    readers: usize,
    writers: usize,
    max_readers: i64,
}

impl Endpoint {
    pub fn new(id: EndpointId, max_readers: i64) -> Self {
        Self {
            id,
            readers: 0,
            writers: 0,
            max_readers,
        }
    }

    #[inline]
    pub fn id(&self) -> EndpointId {
        self.id
    }

    #[inline]
    pub fn readers(&self) -> usize {
        self.readers
    }

    #[inline]
    pub fn writers(&self) -> usize {
        self.writers
    }

    #[inline]
    pub fn max_readers(&self) -> i64 {
        self.max_readers
    }

    /// Replace the reader cap. Already-admitted readers are not evicted.
    #[inline]
    pub fn set_max_readers(&mut self, max_readers: i64) {
        self.max_readers = max_readers;
    }

    fn writer_busy(&self) -> bool {
        self.writers >= MAX_WRITERS_PER_ENDPOINT
    }

    fn readers_full(&self) -> bool {
        i64::try_from(self.readers).unwrap_or(i64::MAX) >= self.max_readers
    }

    /// Admit a session opened with `mode`
    ///
    /// The writer check runs before the reader check, so a read-write open
    /// against an endpoint with both limits hit reports `Busy`.
    pub fn admit(&mut self, mode: AccessMode) -> DeviceResult<()> {
        if mode.can_write() && self.writer_busy() {
            return Err(DeviceError::Busy { endpoint: self.id });
        }
        if mode.can_read() && self.readers_full() {
            return Err(DeviceError::TooManyReaders {
                endpoint: self.id,
                readers: self.readers,
                max_readers: self.max_readers,
            });
        }

        if mode.can_write() {
            self.writers += 1;
        }
        if mode.can_read() {
            self.readers += 1;
        }
        Ok(())
    }

    /// Release a session admitted with `mode`
    pub fn release(&mut self, mode: AccessMode) {
        if mode.can_write() {
            self.writers = self.writers.saturating_sub(1);
        }
        if mode.can_read() {
            self.readers = self.readers.saturating_sub(1);
        }
    }

    pub fn stats(&self) -> EndpointStats {
        EndpointStats {
            id: self.id,
            readers: self.readers,
            writers: self.writers,
            max_readers: self.max_readers,
        }
    }
}
