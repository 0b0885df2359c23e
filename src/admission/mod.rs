/*!
 * Admission Module
 * Per-endpoint reader/writer limits applied at session open and close
 */

pub mod controller;
pub mod endpoint;
pub mod mode;
pub mod types;

// Re-export public API
pub use controller::AdmissionController;
pub use endpoint::Endpoint;
pub use mode::AccessMode;
pub use types::EndpointStats;
