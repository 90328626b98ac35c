// Orphanage directory client
// Browse orphanages on a map, inspect one, and register new ones with photos

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod location;
pub mod observability;
pub mod photos;
pub mod submission;
pub mod telemetry;
pub mod views;

// Re-export key types for easy access
pub use api::{
    ApiError, HttpOrphanageService, OrphanageRecord, OrphanageService, OrphanageSummary,
    RateLimitedHttpClient,
};
pub use config::{config, OrphanagesConfig};
pub use errors::OrphanageError;
pub use location::{FixedLocation, LocationPicker, Position};
pub use observability::{api_metrics, ApiMetrics, OperationTimer};
pub use photos::{ImageHandle, PermissionStatus, PhotoLibrary, QueuedPhotoLibrary};
pub use submission::{
    DraftField, OrphanageDraft, OrphanageSubmissionWorkflow, SubmissionPayload, SubmissionState,
    SubmitOutcome,
};
pub use telemetry::{generate_correlation_id, init_telemetry};
pub use views::{OrphanageDetailView, OrphanageListing, ViewState};
