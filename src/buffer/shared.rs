/*!
 * Shared Buffer
 * The single monitor behind every endpoint: ring storage, admission table,
 * one lock and the readable/writable wait queues
 */

use super::ring::Ring;
use super::user::{UserSink, UserSource};
use crate::admission::{AccessMode, AdmissionController, EndpointStats};
use crate::core::config::DeviceConfig;
use crate::core::errors::{DeviceError, Direction};
use crate::core::limits::LOCK_POLL_INTERVAL;
use crate::core::sync::InterruptSignal;
use crate::core::types::{DeviceResult, EndpointId, Size};
use crate::monitoring::{DeviceStats, StatsSnapshot};
use parking_lot::{Condvar, Mutex, MutexGuard};
use tracing::{debug, info, trace, warn};

/// State guarded by the buffer lock
#[derive(Debug)]
struct SharedState {
    ring: Ring,
    admission: AdmissionController,
}

/// Shared ring buffer monitor
///
/// Writes through any endpoint are visible to reads through any endpoint.
///
/// # Locking
/// - One mutex covers storage, cursors and every endpoint counter
/// - Blocking transfers wait on `readable`/`writable`, which release the
///   mutex while parked and re-check a freshly computed predicate on wake
/// - Wakeups are issued after the mutex is released
pub struct SharedBuffer {
    state: Mutex<SharedState>,
    /// Signalled when bytes are written ("non-empty")
    readable: Condvar,
    /// Signalled when bytes are read ("non-full")
    writable: Condvar,
    wake_on_resize: bool,
    stats: DeviceStats,
}

impl std::fmt::Debug for SharedBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedBuffer")
            .field("state", &*self.state.lock())
            .field("wake_on_resize", &self.wake_on_resize)
            .finish()
    }
}

impl SharedBuffer {
    pub fn new(config: &DeviceConfig) -> DeviceResult<Self> {
        config.validate()?;
        let ring = Ring::with_capacity(config.buffer_capacity)?;

        Ok(Self {
            state: Mutex::new(SharedState {
                ring,
                admission: AdmissionController::new(
                    config.endpoint_count,
                    config.default_max_readers,
                ),
            }),
            readable: Condvar::new(),
            writable: Condvar::new(),
            wake_on_resize: config.wake_on_resize,
            stats: DeviceStats::new(),
        })
    }

    /// Acquire the lock, giving up if `signal` is raised while contended
    fn lock_interruptible(
        &self,
        signal: &InterruptSignal,
    ) -> DeviceResult<MutexGuard<'_, SharedState>> {
        if let Some(guard) = self.state.try_lock() {
            return Ok(guard);
        }

        loop {
            if signal.take() {
                self.stats.inc_interrupted();
                return Err(DeviceError::Interrupted);
            }
            if let Some(guard) = self.state.try_lock_for(LOCK_POLL_INTERVAL) {
                return Ok(guard);
            }
        }
    }

    /// Park on `queue` unless an interrupt is pending
    ///
    /// The predicate is always re-evaluated by the caller after this returns.
    fn wait_on(
        &self,
        queue: &Condvar,
        state: &mut MutexGuard<'_, SharedState>,
        signal: &InterruptSignal,
    ) -> DeviceResult<()> {
        if signal.take() {
            self.stats.inc_interrupted();
            return Err(DeviceError::Interrupted);
        }
        queue.wait(state);
        Ok(())
    }

    /// Write as many bytes of `src` as fit
    ///
    /// Blocks while the ring is full unless `blocking` is false. Returns the
    /// number of bytes written, which may be less than `src.len()`.
    pub fn write<S: UserSource + ?Sized>(
        &self,
        src: &S,
        blocking: bool,
        signal: &InterruptSignal,
    ) -> DeviceResult<Size> {
        let mut state = self.lock_interruptible(signal)?;

        while state.ring.free() == 0 {
            if !blocking {
                self.stats.inc_would_block();
                return Err(DeviceError::WouldBlock(Direction::Write));
            }
            trace!(capacity = state.ring.capacity(), "Writer waiting for space");
            self.wait_on(&self.writable, &mut state, signal)?;
        }

        let written = state.ring.push_from(src)?;
        let used = state.ring.used();
        drop(state);

        self.readable.notify_all();
        self.stats.record_write(written);
        debug!(
            requested = src.len(),
            written, used, "Shared buffer write"
        );
        Ok(written)
    }

    /// Read as many buffered bytes as fit in `dst`
    ///
    /// Blocks while the ring is empty unless `blocking` is false. Returns the
    /// number of bytes read, which may be less than `dst.len()`.
    pub fn read<S: UserSink + ?Sized>(
        &self,
        dst: &mut S,
        blocking: bool,
        signal: &InterruptSignal,
    ) -> DeviceResult<Size> {
        let mut state = self.lock_interruptible(signal)?;

        while state.ring.is_empty() {
            if !blocking {
                self.stats.inc_would_block();
                return Err(DeviceError::WouldBlock(Direction::Read));
            }
            trace!(capacity = state.ring.capacity(), "Reader waiting for data");
            self.wait_on(&self.readable, &mut state, signal)?;
        }

        let read = state.ring.pop_into(dst)?;
        let used = state.ring.used();
        drop(state);

        self.writable.notify_all();
        self.stats.record_read(read);
        debug!(requested = dst.len(), read, used, "Shared buffer read");
        Ok(read)
    }

    /// Replace the storage with a fresh zeroed ring of `new_capacity` bytes
    ///
    /// Buffered bytes are discarded. Validation and allocation happen before
    /// the lock is taken, so failures leave the old ring untouched.
    pub fn resize(&self, new_capacity: Size) -> DeviceResult<()> {
        let storage = Ring::allocate(new_capacity).map_err(|e| {
            warn!(new_capacity, error = %e, "Shared buffer resize rejected");
            e
        })?;

        let mut state = self.state.lock();
        let old_capacity = state.ring.capacity();
        let discarded = state.ring.used();
        let old_storage = state.ring.replace(storage);
        drop(state);
        drop(old_storage);

        self.stats.inc_resizes();
        info!(
            old_capacity,
            new_capacity, discarded, "Shared buffer resized"
        );

        if self.wake_on_resize {
            self.wake_all();
        }
        Ok(())
    }

    /// Wake every parked reader and writer so they re-check their predicate
    ///
    /// Takes the lock once first: a waiter that has checked its predicate is
    /// then guaranteed to be parked before the notification is sent.
    pub fn wake_all(&self) {
        drop(self.state.lock());
        self.readable.notify_all();
        self.writable.notify_all();
    }

    pub fn capacity(&self) -> Size {
        self.state.lock().ring.capacity()
    }

    pub fn free_space(&self) -> Size {
        self.state.lock().ring.free()
    }

    pub fn used_space(&self) -> Size {
        self.state.lock().ring.used()
    }

    pub fn endpoint_count(&self) -> usize {
        self.state.lock().admission.len()
    }

    pub fn check_endpoint(&self, endpoint: EndpointId) -> DeviceResult<()> {
        self.state.lock().admission.check(endpoint)
    }

    /// Admit a new session on `endpoint`
    pub fn admit(&self, endpoint: EndpointId, mode: AccessMode) -> DeviceResult<()> {
        let result = self.state.lock().admission.admit(endpoint, mode);
        if let Err(ref e) = result {
            self.stats.inc_admissions_denied();
            warn!(endpoint, mode = %mode, error = %e, "Session admission denied");
        }
        result
    }

    /// Release a session admitted with exactly `mode`
    pub fn release(&self, endpoint: EndpointId, mode: AccessMode) {
        self.state.lock().admission.release(endpoint, mode);
    }

    pub fn max_readers(&self, endpoint: EndpointId) -> DeviceResult<i64> {
        self.state.lock().admission.max_readers(endpoint)
    }

    pub fn set_max_readers(&self, endpoint: EndpointId, max_readers: i64) -> DeviceResult<()> {
        self.state
            .lock()
            .admission
            .set_max_readers(endpoint, max_readers)?;
        info!(endpoint, max_readers, "Reader cap updated");
        Ok(())
    }

    pub fn endpoint_stats(&self, endpoint: EndpointId) -> DeviceResult<EndpointStats> {
        self.state.lock().admission.stats(endpoint)
    }

    pub fn all_endpoint_stats(&self) -> Vec<EndpointStats> {
        self.state.lock().admission.all_stats()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}
