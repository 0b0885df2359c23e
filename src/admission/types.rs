/*!
 * Admission Types
 */

use crate::core::types::EndpointId;
use serde::{Deserialize, Serialize};

/// Snapshot of one endpoint's admission counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EndpointStats {
    pub id: EndpointId,
    pub readers: usize,
    pub writers: usize,
    pub max_readers: i64,
}
