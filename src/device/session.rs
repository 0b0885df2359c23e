/*!
 * Sessions
 * One open handle bound to an endpoint and an access mode
 */

use crate::admission::AccessMode;
use crate::buffer::{SharedBuffer, UserSink, UserSource};
use crate::control::ControlChannel;
use crate::core::errors::Direction;
use crate::core::errors::DeviceError;
use crate::core::sync::InterruptSignal;
use crate::core::types::{DeviceResult, EndpointId, Size};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

/// An open handle on one endpoint
///
/// The admission slot taken at open is returned exactly once, by `close` or
/// on drop, using the mode recorded here.
pub struct Session {
    shared: Arc<SharedBuffer>,
    endpoint: EndpointId,
    mode: AccessMode,
    nonblocking: AtomicBool,
    signal: Arc<InterruptSignal>,
    released: bool,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("endpoint", &self.endpoint)
            .field("mode", &self.mode)
            .field("nonblocking", &self.is_nonblocking())
            .field("interrupt_pending", &self.signal.is_pending())
            .finish()
    }
}

impl Session {
    /// Wrap an already admitted slot
    pub(super) fn new(
        shared: Arc<SharedBuffer>,
        endpoint: EndpointId,
        mode: AccessMode,
        nonblocking: bool,
    ) -> Self {
        Self {
            shared,
            endpoint,
            mode,
            nonblocking: AtomicBool::new(nonblocking),
            signal: Arc::new(InterruptSignal::new()),
            released: false,
        }
    }

    #[inline]
    pub fn endpoint(&self) -> EndpointId {
        self.endpoint
    }

    #[inline]
    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    #[inline]
    pub fn is_nonblocking(&self) -> bool {
        self.nonblocking.load(Ordering::Relaxed)
    }

    /// Switch between blocking and non-blocking transfers
    pub fn set_nonblocking(&self, nonblocking: bool) {
        self.nonblocking.store(nonblocking, Ordering::Relaxed);
    }

    #[inline]
    fn blocking(&self) -> bool {
        !self.is_nonblocking()
    }

    /// Read up to `max_len` bytes
    pub fn read(&self, max_len: Size) -> DeviceResult<Vec<u8>> {
        if !self.mode.can_read() {
            return Err(DeviceError::BadDescriptor(Direction::Read));
        }
        let mut buf = vec![0u8; max_len.min(self.shared.capacity())];
        let read = self.read_into(&mut buf)?;
        buf.truncate(read);
        Ok(buf)
    }

    /// Read into a caller buffer, returning the number of bytes filled
    pub fn read_into<S: UserSink + ?Sized>(&self, dst: &mut S) -> DeviceResult<Size> {
        if !self.mode.can_read() {
            return Err(DeviceError::BadDescriptor(Direction::Read));
        }
        self.shared.read(dst, self.blocking(), &self.signal)
    }

    /// Write as much of `data` as fits, returning the number of bytes taken
    pub fn write(&self, data: &[u8]) -> DeviceResult<Size> {
        self.write_from(data)
    }

    /// Write from a caller buffer
    pub fn write_from<S: UserSource + ?Sized>(&self, src: &S) -> DeviceResult<Size> {
        if !self.mode.can_write() {
            return Err(DeviceError::BadDescriptor(Direction::Write));
        }
        self.shared.write(src, self.blocking(), &self.signal)
    }

    /// Control channel for this session's endpoint
    pub fn control(&self) -> ControlChannel {
        ControlChannel::from_admitted(Arc::clone(&self.shared), self.endpoint)
    }

    /// Handle that can cancel this session's blocking waits from another thread
    pub fn interrupter(&self) -> Interrupter {
        Interrupter {
            signal: Arc::clone(&self.signal),
            shared: Arc::clone(&self.shared),
        }
    }

    /// Close the session, returning its admission slot
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.shared.release(self.endpoint, self.mode);
        info!(
            endpoint = self.endpoint,
            mode = %self.mode,
            "Session closed"
        );
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.release();
    }
}

/// Convert for the `std::io` impls
///
/// `Interrupted` becomes `ErrorKind::Other` with the `DeviceError` inside:
/// std helpers such as `read_exact` and `write_all` retry
/// `ErrorKind::Interrupted`, and the retry would block again once the
/// signal has been consumed.
fn io_error(err: DeviceError) -> io::Error {
    match err {
        DeviceError::Interrupted => io::Error::new(io::ErrorKind::Other, err),
        err => io::Error::from(err),
    }
}

impl io::Read for Session {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read_into(buf).map_err(io_error)
    }
}

impl io::Write for Session {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_from(buf).map_err(io_error)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Cancels blocking waits of one session
///
/// An interrupt stays pending until a wait observes it, so raising one while
/// the session is idle cancels its next blocking wait.
#[derive(Clone)]
pub struct Interrupter {
    signal: Arc<InterruptSignal>,
    shared: Arc<SharedBuffer>,
}

impl std::fmt::Debug for Interrupter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interrupter")
            .field("pending", &self.signal.is_pending())
            .finish()
    }
}

impl Interrupter {
    /// Cancel the session's current blocking wait, or its next one
    ///
    /// A wait that completed just before this call does not consume the
    /// interrupt, so it cancels the next wait the session parks in, even an
    /// unrelated one. Call `clear` to drop a stale interrupt first.
    pub fn interrupt(&self) {
        self.signal.raise();
        self.shared.wake_all();
    }

    /// Discard a pending interrupt that no wait has observed yet
    #[inline]
    pub fn clear(&self) {
        self.signal.clear();
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.signal.is_pending()
    }
}
