/*!
 * Device Set
 * The endpoints of one device and the buffer they share
 */

use super::options::OpenOptions;
use super::session::Session;
use crate::admission::EndpointStats;
use crate::buffer::SharedBuffer;
use crate::control::ControlChannel;
use crate::core::config::DeviceConfig;
use crate::core::types::{DeviceResult, EndpointId, Size};
use crate::monitoring::StatsSnapshot;
use std::sync::Arc;
use tracing::info;

/// A set of endpoints over one shared ring buffer
///
/// Cloning is cheap and yields another handle to the same device. The buffer
/// is released when the last handle and the last session are dropped.
#[derive(Debug, Clone)]
pub struct DeviceSet {
    shared: Arc<SharedBuffer>,
    config: DeviceConfig,
}

impl DeviceSet {
    pub fn new(config: DeviceConfig) -> DeviceResult<Self> {
        let shared = Arc::new(SharedBuffer::new(&config)?);
        info!(
            endpoints = config.endpoint_count,
            capacity = config.buffer_capacity,
            max_readers = config.default_max_readers,
            wake_on_resize = config.wake_on_resize,
            "Device set initialized"
        );
        Ok(Self { shared, config })
    }

    /// Two endpoints, a 1024-byte buffer and one reader per endpoint
    pub fn with_defaults() -> DeviceResult<Self> {
        Self::new(DeviceConfig::default())
    }

    /// Configuration this set was created with
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn endpoint_count(&self) -> usize {
        self.shared.endpoint_count()
    }

    /// Open a session on `endpoint`
    ///
    /// Fails with `Busy` or `TooManyReaders` when the endpoint's admission
    /// limits are reached. No retry is attempted.
    pub fn open(&self, endpoint: EndpointId, options: OpenOptions) -> DeviceResult<Session> {
        let mode = options.mode()?;
        self.shared.admit(endpoint, mode)?;

        info!(
            endpoint,
            mode = %mode,
            nonblocking = options.is_nonblocking(),
            "Session opened"
        );
        Ok(Session::new(
            Arc::clone(&self.shared),
            endpoint,
            mode,
            options.is_nonblocking(),
        ))
    }

    /// Control channel for `endpoint`, without holding a session
    pub fn control(&self, endpoint: EndpointId) -> DeviceResult<ControlChannel> {
        ControlChannel::new(Arc::clone(&self.shared), endpoint)
    }

    pub fn capacity(&self) -> Size {
        self.shared.capacity()
    }

    pub fn used_space(&self) -> Size {
        self.shared.used_space()
    }

    pub fn free_space(&self) -> Size {
        self.shared.free_space()
    }

    pub fn endpoint_stats(&self, endpoint: EndpointId) -> DeviceResult<EndpointStats> {
        self.shared.endpoint_stats(endpoint)
    }

    pub fn all_endpoint_stats(&self) -> Vec<EndpointStats> {
        self.shared.all_endpoint_stats()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.shared.stats()
    }
}
