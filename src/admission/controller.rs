/*!
 * Admission Controller
 * Endpoint table guarding session entry and exit
 */

use super::endpoint::Endpoint;
use super::mode::AccessMode;
use super::types::EndpointStats;
use crate::core::errors::DeviceError;
use crate::core::types::{DeviceResult, EndpointId};

/// Fixed table of endpoints, indexed by `EndpointId`
///
/// Callers hold the shared buffer lock for every method that takes
/// `&mut self`.
#[derive(Debug, Clone)]
pub struct AdmissionController {
    endpoints: Vec<Endpoint>,
}

impl AdmissionController {
    pub fn new(endpoint_count: usize, default_max_readers: i64) -> Self {
        Self {
            endpoints: (0..endpoint_count)
                .map(|id| Endpoint::new(id, default_max_readers))
                .collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Fail with `NoSuchEndpoint` unless `endpoint` is in the table
    pub fn check(&self, endpoint: EndpointId) -> DeviceResult<()> {
        self.get(endpoint).map(|_| ())
    }

    pub fn get(&self, endpoint: EndpointId) -> DeviceResult<&Endpoint> {
        let count = self.endpoints.len();
        self.endpoints
            .get(endpoint)
            .ok_or(DeviceError::NoSuchEndpoint { endpoint, count })
    }

    fn get_mut(&mut self, endpoint: EndpointId) -> DeviceResult<&mut Endpoint> {
        let count = self.endpoints.len();
        self.endpoints
            .get_mut(endpoint)
            .ok_or(DeviceError::NoSuchEndpoint { endpoint, count })
    }

    pub fn admit(&mut self, endpoint: EndpointId, mode: AccessMode) -> DeviceResult<()> {
        self.get_mut(endpoint)?.admit(mode)
    }

    /// Release a previously admitted session; unknown endpoints are ignored
    pub fn release(&mut self, endpoint: EndpointId, mode: AccessMode) {
        if let Ok(ep) = self.get_mut(endpoint) {
            ep.release(mode);
        }
    }

    pub fn max_readers(&self, endpoint: EndpointId) -> DeviceResult<i64> {
        Ok(self.get(endpoint)?.max_readers())
    }

    pub fn set_max_readers(&mut self, endpoint: EndpointId, max_readers: i64) -> DeviceResult<()> {
        self.get_mut(endpoint)?.set_max_readers(max_readers);
        Ok(())
    }

    pub fn stats(&self, endpoint: EndpointId) -> DeviceResult<EndpointStats> {
        Ok(self.get(endpoint)?.stats())
    }

    pub fn all_stats(&self) -> Vec<EndpointStats> {
        self.endpoints.iter().map(Endpoint::stats).collect()
    }
}
