/*!
 * Lock-Free Device Statistics
 * Atomic counters updated on the transfer and control paths
 */

use crate::core::serde::is_zero_u64;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic device statistics
///
/// # Performance
/// - Cache-line aligned to prevent false sharing with the buffer lock
/// - All operations use relaxed ordering; snapshots are best-effort
#[repr(C, align(64))]
#[derive(Debug, Default)]
pub struct DeviceStats {
    bytes_written: AtomicU64,
    bytes_read: AtomicU64,
    writes: AtomicU64,
    reads: AtomicU64,
    would_block: AtomicU64,
    interrupted: AtomicU64,
    resizes: AtomicU64,
    admissions_denied: AtomicU64,
}

impl DeviceStats {
    #[inline]
    pub const fn new() -> Self {
        Self {
            bytes_written: AtomicU64::new(0),
            bytes_read: AtomicU64::new(0),
            writes: AtomicU64::new(0),
            reads: AtomicU64::new(0),
            would_block: AtomicU64::new(0),
            interrupted: AtomicU64::new(0),
            resizes: AtomicU64::new(0),
            admissions_denied: AtomicU64::new(0),
        }
    }

    /// Record a completed write
    ///
    /// # Performance
    /// Hot path - called on every successful write
    #[inline(always)]
    pub fn record_write(&self, bytes: usize) {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    /// Record a completed read
    ///
    /// # Performance
    /// Hot path - called on every successful read
    #[inline(always)]
    pub fn record_read(&self, bytes: usize) {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.bytes_read.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_would_block(&self) {
        self.would_block.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_interrupted(&self) {
        self.interrupted.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_resizes(&self) {
        self.resizes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_admissions_denied(&self) {
        self.admissions_denied.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of current statistics
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
            bytes_read: self.bytes_read.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            reads: self.reads.load(Ordering::Relaxed),
            would_block: self.would_block.load(Ordering::Relaxed),
            interrupted: self.interrupted.load(Ordering::Relaxed),
            resizes: self.resizes.load(Ordering::Relaxed),
            admissions_denied: self.admissions_denied.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time device statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct StatsSnapshot {
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub bytes_written: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub bytes_read: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub writes: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub reads: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub would_block: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub interrupted: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub resizes: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub admissions_denied: u64,
}

impl StatsSnapshot {
    /// Bytes written but not yet read, as seen by the counters
    ///
    /// Resizes discard buffered bytes without reading them, so this is an
    /// upper bound on what the buffer holds.
    pub fn in_flight(&self) -> u64 {
        self.bytes_written.saturating_sub(self.bytes_read)
    }
}
