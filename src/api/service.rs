use async_trait::async_trait;
use tracing::{info, instrument};

use crate::api::client::RateLimitedHttpClient;
use crate::api::errors::ApiError;
use crate::api::types::{OrphanageRecord, OrphanageSummary};
use crate::submission::SubmissionPayload;

/// The remote orphanage REST service as seen by the workflow and the views
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait OrphanageService: Send + Sync {
    /// GET /orphanages
    async fn fetch_listing(&self) -> Result<Vec<OrphanageSummary>, ApiError>;

    /// GET /orphanages/{id}
    async fn fetch_detail(&self, id: u64) -> Result<OrphanageRecord, ApiError>;

    /// POST /orphanages as multipart; only the status matters
    async fn create(&self, payload: SubmissionPayload) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpOrphanageService {
    client: RateLimitedHttpClient,
}

impl HttpOrphanageService {
    pub fn new(client: RateLimitedHttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrphanageService for HttpOrphanageService {
    #[instrument(skip(self))]
    async fn fetch_listing(&self) -> Result<Vec<OrphanageSummary>, ApiError> {
        let orphanages: Vec<OrphanageSummary> = self.client.get_json("orphanages").await?;
        info!(count = orphanages.len(), "Fetched orphanage listing");
        Ok(orphanages)
    }

    #[instrument(skip(self))]
    async fn fetch_detail(&self, id: u64) -> Result<OrphanageRecord, ApiError> {
        self.client.get_json(&format!("orphanages/{id}")).await
    }

    #[instrument(skip_all, fields(images = payload.image_count()))]
    async fn create(&self, payload: SubmissionPayload) -> Result<(), ApiError> {
        let form = payload.into_form().await?;
        self.client.post_multipart("orphanages", form).await?;
        info!("Orphanage accepted by server");
        Ok(())
    }
}
