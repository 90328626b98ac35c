// Orphanage creation: draft editing, payload assembly and the submission lifecycle

pub mod draft;
pub mod lifecycle;
pub mod payload;
pub mod workflow;

pub use draft::{DraftField, OrphanageDraft};
pub use lifecycle::{SubmissionEvent, SubmissionLifecycle, SubmissionState};
pub use payload::{ImagePart, SubmissionPayload, IMAGE_CONTENT_TYPE, IMAGE_FIELD};
pub use workflow::{OrphanageSubmissionWorkflow, SubmitOutcome};
