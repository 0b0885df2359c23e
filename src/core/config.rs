/*!
 * Device Configuration
 *
 * Initialization parameters for a device set, loadable from JSON or the
 * environment.
 */

use super::errors::DeviceError;
use super::limits::{
    DEFAULT_BUFFER_CAPACITY, DEFAULT_ENDPOINT_COUNT, DEFAULT_MAX_READERS, MIN_BUFFER_CAPACITY,
};
use super::types::{DeviceResult, Size};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Environment variable overriding the initial buffer capacity
pub const ENV_BUFFER_SIZE: &str = "RINGDEV_BUFFER_SIZE";
/// Environment variable overriding the endpoint count
pub const ENV_DEVICE_COUNT: &str = "RINGDEV_DEVICE_COUNT";
/// Environment variable overriding the initial reader cap of every endpoint
pub const ENV_MAX_READERS: &str = "RINGDEV_MAX_READERS";
/// Environment variable toggling the post-resize broadcast
pub const ENV_WAKE_ON_RESIZE: &str = "RINGDEV_WAKE_ON_RESIZE";

/// Device set configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct DeviceConfig {
    /// Initial ring capacity in bytes (one slot is reserved)
    pub buffer_capacity: Size,
    /// Number of endpoints sharing the ring
    pub endpoint_count: usize,
    /// Initial reader cap for every endpoint
    pub default_max_readers: i64,
    /// Broadcast both wait queues after a resize so sleepers re-check
    /// against the new buffer. `false` keeps sleepers parked until the next
    /// unrelated transfer.
    pub wake_on_resize: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            endpoint_count: DEFAULT_ENDPOINT_COUNT,
            default_max_readers: DEFAULT_MAX_READERS,
            wake_on_resize: true,
        }
    }
}

impl DeviceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buffer_capacity(mut self, capacity: Size) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    pub fn with_endpoint_count(mut self, count: usize) -> Self {
        self.endpoint_count = count;
        self
    }

    pub fn with_default_max_readers(mut self, max_readers: i64) -> Self {
        self.default_max_readers = max_readers;
        self
    }

    pub fn with_wake_on_resize(mut self, wake: bool) -> Self {
        self.wake_on_resize = wake;
        self
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> DeviceResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DeviceError::configuration(format!("invalid JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from defaults overridden by `RINGDEV_*` variables
    pub fn from_env() -> DeviceResult<Self> {
        let mut config = Self::default();

        if let Some(capacity) = env_var::<Size>(ENV_BUFFER_SIZE)? {
            config.buffer_capacity = capacity;
        }
        if let Some(count) = env_var::<usize>(ENV_DEVICE_COUNT)? {
            config.endpoint_count = count;
        }
        if let Some(max_readers) = env_var::<i64>(ENV_MAX_READERS)? {
            config.default_max_readers = max_readers;
        }
        if let Ok(raw) = std::env::var(ENV_WAKE_ON_RESIZE) {
            config.wake_on_resize = parse_flag(ENV_WAKE_ON_RESIZE, &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DeviceResult<()> {
        if self.buffer_capacity < MIN_BUFFER_CAPACITY {
            return Err(DeviceError::configuration(format!(
                "buffer_capacity {} is below the minimum of {}",
                self.buffer_capacity, MIN_BUFFER_CAPACITY
            )));
        }
        if self.endpoint_count == 0 {
            return Err(DeviceError::configuration(
                "endpoint_count must be at least 1",
            ));
        }
        Ok(())
    }
}

fn env_var<T: FromStr>(name: &str) -> DeviceResult<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| DeviceError::configuration(format!("{}={:?}: {}", name, raw, e))),
        Err(_) => Ok(None),
    }
}

fn parse_flag(name: &str, raw: &str) -> DeviceResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(DeviceError::configuration(format!(
            "{}={:?}: expected a boolean",
            name, other
        ))),
    }
}
