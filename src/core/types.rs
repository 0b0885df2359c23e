/*!
 * Core Types
 * Common types used across the device
 */

/// Endpoint (device node) index, `0..endpoint_count`
pub type EndpointId = usize;

/// Size type for buffer operations
pub type Size = usize;

/// Common result type for device operations
pub type DeviceResult<T> = Result<T, super::errors::DeviceError>;
