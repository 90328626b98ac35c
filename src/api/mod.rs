// Remote orphanage service: wire types, HTTP plumbing and the service seam

pub mod client;
pub mod errors;
pub mod service;
pub mod types;

pub use client::RateLimitedHttpClient;
pub use errors::ApiError;
pub use service::{HttpOrphanageService, OrphanageService};
pub use types::{ImageRef, OrphanageRecord, OrphanageSummary};

#[cfg(any(test, feature = "testing"))]
pub use service::MockOrphanageService;
