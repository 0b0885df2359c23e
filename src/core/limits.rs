/*!
 * Device Limits and Constants
 *
 * Centralized location for buffer, endpoint and admission defaults.
 * Values marked [COMPAT] match the character-device driver this crate models.
 */

use std::time::Duration;

// =============================================================================
// BUFFER LIMITS
// =============================================================================

/// Default shared ring capacity (1KB)
/// [COMPAT] One slot stays unused, so 1023 bytes are writable
pub const DEFAULT_BUFFER_CAPACITY: usize = 1024;

/// Smallest capacity accepted by resize
/// [COMPAT] Requests below this fail with `InvalidArgument`
pub const MIN_BUFFER_CAPACITY: usize = 5;

// =============================================================================
// ENDPOINT LIMITS
// =============================================================================

/// Number of endpoints sharing the one ring
/// [COMPAT] Two device nodes
pub const DEFAULT_ENDPOINT_COUNT: usize = 2;

/// Readers admitted per endpoint until reconfigured
pub const DEFAULT_MAX_READERS: i64 = 1;

/// Writers admitted per endpoint (not configurable)
pub const MAX_WRITERS_PER_ENDPOINT: usize = 1;

// =============================================================================
// SYNCHRONIZATION
// =============================================================================

/// Slice used while polling a contended lock for pending interrupts
/// [PERF] Short enough that `interrupt()` is observed promptly
pub const LOCK_POLL_INTERVAL: Duration = Duration::from_millis(10);

// =============================================================================
// ERRNO VALUES
// =============================================================================

/// Linux errno values reported by `DeviceError::errno`
pub mod errno {
    pub const ENXIO: i32 = 6;
    pub const EBADF: i32 = 9;
    pub const EAGAIN: i32 = 11;
    pub const ENOMEM: i32 = 12;
    pub const EFAULT: i32 = 14;
    pub const EBUSY: i32 = 16;
    pub const EINVAL: i32 = 22;
    pub const EMFILE: i32 = 24;
    pub const ENOTTY: i32 = 25;
    /// Kernel-internal restart code returned by interrupted waits
    pub const ERESTARTSYS: i32 = 512;
}
