use thiserror::Error;

use crate::api::ApiError;

pub const SUBMISSION_FAILED_MESSAGE: &str = "An error occurred. Try again.";
pub const PERMISSION_DENIED_MESSAGE: &str =
    "Ops! Precisamos de acesso à sua galeria para fazer isso...";

/// Failures surfaced to whoever drives the workflow or renders a view.
/// Display yields the message meant for the end user.
#[derive(Debug, Error)]
pub enum OrphanageError {
    #[error("{}", SUBMISSION_FAILED_MESSAGE)]
    SubmissionFailed {
        #[source]
        source: ApiError,
    },
    #[error("{}", PERMISSION_DENIED_MESSAGE)]
    PermissionDenied,
    #[error("Não foi possível carregar os orfanatos: {source}")]
    Fetch {
        #[source]
        source: ApiError,
    },
}

impl OrphanageError {
    /// Whether the user can fix this by trying again
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, OrphanageError::PermissionDenied)
    }
}
