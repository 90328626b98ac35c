use statig::prelude::*;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn, Instrument};

use crate::api::OrphanageService;
use crate::errors::OrphanageError;
use crate::location::{LocationPicker, Position};
use crate::observability::{api_metrics, OperationTimer};
use crate::photos::{ImageHandle, PermissionStatus, PhotoLibrary};
use crate::submission::draft::{DraftField, OrphanageDraft};
use crate::submission::lifecycle::{
    current_state, SubmissionEvent, SubmissionLifecycle, SubmissionState,
};
use crate::submission::payload::SubmissionPayload;
use crate::telemetry::{create_submission_span, generate_correlation_id};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The server accepted the orphanage; the caller should return to the listing
    Submitted,
    /// Another submit is in flight, nothing was sent
    AlreadySubmitting,
    /// This draft was already accepted, nothing was sent
    AlreadySubmitted,
}

struct Session {
    machine: StateMachine<SubmissionLifecycle>,
    draft: OrphanageDraft,
    attempt: u64,
}

impl Session {
    /// Return `attempt` to idle if it is still the one in flight
    fn abandon(&mut self, attempt: u64) -> bool {
        if self.attempt != attempt || current_state(&self.machine) != SubmissionState::Submitting {
            return false;
        }
        self.machine.handle(&SubmissionEvent::Cancel);
        self.attempt += 1;
        info!(attempt, "Submission abandoned");
        true
    }
}

/// Armed while a create request is awaited. Dropping it armed abandons the attempt.
struct InFlight {
    session: Arc<Mutex<Session>>,
    attempt: u64,
    armed: bool,
}

impl InFlight {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let attempt = self.attempt;
        match self.session.try_lock() {
            Ok(mut session) => {
                session.abandon(attempt);
            }
            Err(_) => match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    let session = Arc::clone(&self.session);
                    handle.spawn(async move {
                        session.lock().await.abandon(attempt);
                    });
                }
                Err(_) => warn!(attempt, "No runtime to abandon the dropped submission on"),
            },
        }
    }
}

/// Drives one orphanage from an empty draft to an accepted or failed submission.
///
/// Methods take `&self` so a view can share the workflow; at most one create
/// request is in flight at any time.
pub struct OrphanageSubmissionWorkflow {
    service: Arc<dyn OrphanageService>,
    session: Arc<Mutex<Session>>,
}

impl OrphanageSubmissionWorkflow {
    pub fn new(service: Arc<dyn OrphanageService>, position: Position) -> Self {
        Self {
            service,
            session: Arc::new(Mutex::new(Session {
                machine: SubmissionLifecycle::new().state_machine(),
                draft: OrphanageDraft::new(position),
                attempt: 0,
            })),
        }
    }

    /// Ask the picker for a position and open a workflow for it.
    /// `None` when the user did not pick a point.
    pub async fn start(
        service: Arc<dyn OrphanageService>,
        picker: &dyn LocationPicker,
    ) -> Option<Self> {
        let position = picker.pick().await?;
        debug!(
            latitude = position.latitude,
            longitude = position.longitude,
            "Position selected"
        );
        Some(Self::new(service, position))
    }

    pub async fn state(&self) -> SubmissionState {
        current_state(&self.session.lock().await.machine)
    }

    pub async fn draft(&self) -> OrphanageDraft {
        self.session.lock().await.draft.clone()
    }

    pub async fn update_field(&self, field: DraftField) {
        self.session.lock().await.draft.apply(field);
    }

    pub async fn add_image(&self, handle: ImageHandle) {
        let mut session = self.session.lock().await;
        session.draft.push_image(handle);
        debug!(images = session.draft.images().len(), "Image added to draft");
    }

    /// Ask the photo library for one image and append it to the draft.
    /// Returns `Ok(None)` when the user cancels the picker.
    pub async fn pick_image(
        &self,
        library: &dyn PhotoLibrary,
    ) -> Result<Option<ImageHandle>, OrphanageError> {
        if library.request_permission().await == PermissionStatus::Denied {
            warn!("Photo library permission denied");
            return Err(OrphanageError::PermissionDenied);
        }

        let Some(handle) = library.select_image().await else {
            debug!("Image selection cancelled");
            return Ok(None);
        };

        self.add_image(handle.clone()).await;
        Ok(Some(handle))
    }

    /// Send the current draft to the service.
    ///
    /// The draft is kept on failure so it can be edited and submitted again.
    /// Dropping the returned future before it completes abandons the attempt.
    pub async fn submit(&self) -> Result<SubmitOutcome, OrphanageError> {
        let (payload, in_flight, name) = {
            let mut session = self.session.lock().await;
            match current_state(&session.machine) {
                SubmissionState::Submitting => {
                    debug!("Submission already in flight");
                    return Ok(SubmitOutcome::AlreadySubmitting);
                }
                SubmissionState::Succeeded => return Ok(SubmitOutcome::AlreadySubmitted),
                SubmissionState::Idle | SubmissionState::Failed => {}
            }

            session.machine.handle(&SubmissionEvent::Submit);
            session.attempt += 1;
            info!(attempt = session.attempt, "Submitting orphanage");
            let in_flight = InFlight {
                session: Arc::clone(&self.session),
                attempt: session.attempt,
                armed: true,
            };
            (
                SubmissionPayload::from_draft(&session.draft),
                in_flight,
                session.draft.name.clone(),
            )
        };
        let attempt = in_flight.attempt;

        let correlation_id = generate_correlation_id();
        let span = create_submission_span(&name, &correlation_id);
        let timer = OperationTimer::new("orphanage_submission");
        let result = self.service.create(payload).instrument(span).await;
        timer.finish();
        api_metrics().record_submission(result.is_ok());

        let mut session = self.session.lock().await;
        in_flight.disarm();
        let current = session.attempt == attempt
            && current_state(&session.machine) == SubmissionState::Submitting;

        match result {
            Ok(()) => {
                // The server holds the orphanage now, whichever attempt carried it
                if !current {
                    info!(attempt, "Abandoned submission was accepted");
                }
                session.machine.handle(&SubmissionEvent::Accepted);
                info!(%correlation_id, attempt, "Orphanage submitted");
                Ok(SubmitOutcome::Submitted)
            }
            Err(source) => {
                if current {
                    session.machine.handle(&SubmissionEvent::Rejected);
                }
                warn!(%correlation_id, attempt, error = %source, "Orphanage submission failed");
                Err(OrphanageError::SubmissionFailed { source })
            }
        }
    }

    /// Abandon an in-flight submission, e.g. when its view goes away.
    /// A late failure for the abandoned attempt no longer moves the state;
    /// a late acceptance still marks the orphanage as submitted.
    pub async fn cancel(&self) -> bool {
        let mut session = self.session.lock().await;
        let attempt = session.attempt;
        session.abandon(attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockOrphanageService};
    use crate::api::{OrphanageRecord, OrphanageSummary};
    use crate::photos::QueuedPhotoLibrary;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Notify;

    fn position() -> Position {
        Position::new(-21.687, -51.073)
    }

    fn server_error() -> ApiError {
        ApiError::Status {
            status: 500,
            url: "http://localhost:3333/orphanages".to_string(),
        }
    }

    struct DeniedLibrary;

    #[async_trait]
    impl PhotoLibrary for DeniedLibrary {
        async fn request_permission(&self) -> PermissionStatus {
            PermissionStatus::Denied
        }

        async fn select_image(&self) -> Option<ImageHandle> {
            panic!("selection must not be attempted without permission")
        }
    }

    /// Holds every create request until the gate is opened.
    /// The first `failures` requests are rejected.
    #[derive(Default)]
    struct GatedService {
        gate: Notify,
        calls: AtomicUsize,
        failures: usize,
        names: std::sync::Mutex<Vec<String>>,
    }

    #[async_trait]
    impl OrphanageService for GatedService {
        async fn fetch_listing(&self) -> Result<Vec<OrphanageSummary>, ApiError> {
            Ok(Vec::new())
        }

        async fn fetch_detail(&self, _id: u64) -> Result<OrphanageRecord, ApiError> {
            Err(server_error())
        }

        async fn create(&self, payload: SubmissionPayload) -> Result<(), ApiError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            self.names
                .lock()
                .unwrap()
                .push(payload.field("name").unwrap_or_default().to_string());
            self.gate.notified().await;
            if call < self.failures {
                Err(server_error())
            } else {
                Ok(())
            }
        }
    }

    async fn wait_until_submitting(workflow: &OrphanageSubmissionWorkflow) {
        while workflow.state().await != SubmissionState::Submitting {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_successful_submission() {
        let mut service = MockOrphanageService::new();
        service
            .expect_create()
            .withf(|payload| {
                payload.field("name") == Some("Lar Feliz")
                    && payload.field("open_on_weekends") == Some("true")
                    && payload.field("latitude") == Some("-21.687")
                    && payload.field("longitude") == Some("-51.073")
                    && payload.image_count() == 0
            })
            .times(1)
            .returning(|_| Ok(()));

        let workflow = OrphanageSubmissionWorkflow::new(Arc::new(service), position());
        workflow
            .update_field(DraftField::Name("Lar Feliz".to_string()))
            .await;

        assert_eq!(workflow.submit().await.unwrap(), SubmitOutcome::Submitted);
        assert_eq!(workflow.state().await, SubmissionState::Succeeded);
        assert_eq!(
            workflow.submit().await.unwrap(),
            SubmitOutcome::AlreadySubmitted
        );
    }

    #[tokio::test]
    async fn test_failure_keeps_draft_for_resubmission() {
        let mut service = MockOrphanageService::new();
        let mut seq = mockall::Sequence::new();
        service
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(server_error()));
        service
            .expect_create()
            .withf(|payload| payload.field("about") == Some("Casa acolhedora"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let workflow = OrphanageSubmissionWorkflow::new(Arc::new(service), position());
        workflow
            .update_field(DraftField::Name("Lar Feliz".to_string()))
            .await;
        let before = workflow.draft().await;

        let err = workflow.submit().await.unwrap_err();
        assert_eq!(err.to_string(), "An error occurred. Try again.");
        assert_eq!(workflow.state().await, SubmissionState::Failed);
        assert_eq!(workflow.draft().await, before);

        workflow
            .update_field(DraftField::About("Casa acolhedora".to_string()))
            .await;
        assert_eq!(workflow.submit().await.unwrap(), SubmitOutcome::Submitted);
        assert_eq!(workflow.state().await, SubmissionState::Succeeded);
    }

    #[tokio::test]
    async fn test_permission_denied_leaves_images_untouched() {
        let workflow =
            OrphanageSubmissionWorkflow::new(Arc::new(MockOrphanageService::new()), position());

        let err = workflow.pick_image(&DeniedLibrary).await.unwrap_err();
        assert!(matches!(err, OrphanageError::PermissionDenied));
        assert!(workflow.draft().await.images().is_empty());
        assert_eq!(workflow.state().await, SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_cancelled_selection_adds_nothing() {
        let workflow =
            OrphanageSubmissionWorkflow::new(Arc::new(MockOrphanageService::new()), position());
        let library = QueuedPhotoLibrary::new(["first.jpg"]);

        assert_eq!(
            workflow.pick_image(&library).await.unwrap(),
            Some(ImageHandle::new("first.jpg"))
        );
        assert_eq!(workflow.pick_image(&library).await.unwrap(), None);
        assert_eq!(workflow.draft().await.images().len(), 1);
    }

    #[tokio::test]
    async fn test_images_sent_in_selection_order() {
        let mut service = MockOrphanageService::new();
        service
            .expect_create()
            .withf(|payload| {
                let names: Vec<_> = payload
                    .images()
                    .iter()
                    .map(|p| (p.file_name.clone(), p.handle.clone()))
                    .collect();
                names
                    == vec![
                        ("image_0.jpg".to_string(), ImageHandle::new("h1")),
                        ("image_1.jpg".to_string(), ImageHandle::new("h2")),
                        ("image_2.jpg".to_string(), ImageHandle::new("h3")),
                    ]
            })
            .times(1)
            .returning(|_| Ok(()));

        let workflow = OrphanageSubmissionWorkflow::new(Arc::new(service), position());
        for handle in ["h1", "h2", "h3"] {
            workflow.add_image(ImageHandle::new(handle)).await;
        }

        assert_eq!(workflow.submit().await.unwrap(), SubmitOutcome::Submitted);
    }

    #[tokio::test]
    async fn test_second_submit_is_noop_while_in_flight() {
        let service = Arc::new(GatedService::default());
        let workflow = OrphanageSubmissionWorkflow::new(service.clone(), position());

        let (first, second) = tokio::join!(workflow.submit(), async {
            wait_until_submitting(&workflow).await;
            let second = workflow.submit().await;
            service.gate.notify_one();
            second
        });

        assert_eq!(first.unwrap(), SubmitOutcome::Submitted);
        assert_eq!(second.unwrap(), SubmitOutcome::AlreadySubmitting);
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        assert_eq!(workflow.state().await, SubmissionState::Succeeded);
    }

    #[tokio::test]
    async fn test_late_acceptance_after_cancel_blocks_resubmission() {
        let service = Arc::new(GatedService::default());
        let workflow = OrphanageSubmissionWorkflow::new(service.clone(), position());

        let (submitted, cancelled) = tokio::join!(workflow.submit(), async {
            wait_until_submitting(&workflow).await;
            let cancelled = workflow.cancel().await;
            assert_eq!(workflow.state().await, SubmissionState::Idle);
            service.gate.notify_one();
            cancelled
        });

        assert!(cancelled);
        assert_eq!(submitted.unwrap(), SubmitOutcome::Submitted);
        assert_eq!(workflow.state().await, SubmissionState::Succeeded);
        assert_eq!(
            workflow.submit().await.unwrap(),
            SubmitOutcome::AlreadySubmitted
        );
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_late_failure_after_cancel_keeps_idle() {
        let service = Arc::new(GatedService {
            failures: 1,
            ..Default::default()
        });
        let workflow = OrphanageSubmissionWorkflow::new(service.clone(), position());

        let (submitted, _) = tokio::join!(workflow.submit(), async {
            wait_until_submitting(&workflow).await;
            assert!(workflow.cancel().await);
            service.gate.notify_one();
        });

        assert!(submitted.is_err());
        assert_eq!(workflow.state().await, SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_dropped_submit_returns_to_idle() {
        let service = Arc::new(GatedService::default());
        let workflow = OrphanageSubmissionWorkflow::new(service.clone(), position());

        let dropped = tokio::time::timeout(Duration::from_millis(50), workflow.submit()).await;
        assert!(dropped.is_err());
        assert_eq!(workflow.state().await, SubmissionState::Idle);

        service.gate.notify_one();
        assert_eq!(workflow.submit().await.unwrap(), SubmitOutcome::Submitted);
        assert_eq!(workflow.state().await, SubmissionState::Succeeded);
        assert_eq!(service.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_edits_in_flight_only_reach_the_next_attempt() {
        let service = Arc::new(GatedService {
            failures: 1,
            ..Default::default()
        });
        let workflow = OrphanageSubmissionWorkflow::new(service.clone(), position());
        workflow
            .update_field(DraftField::Name("Lar Feliz".to_string()))
            .await;

        let (first, _) = tokio::join!(workflow.submit(), async {
            wait_until_submitting(&workflow).await;
            workflow
                .update_field(DraftField::Name("Lar Feliz II".to_string()))
                .await;
            service.gate.notify_one();
        });

        assert!(first.is_err());
        assert_eq!(workflow.state().await, SubmissionState::Failed);
        assert_eq!(workflow.draft().await.name, "Lar Feliz II");

        service.gate.notify_one();
        assert_eq!(workflow.submit().await.unwrap(), SubmitOutcome::Submitted);
        assert_eq!(
            *service.names.lock().unwrap(),
            vec!["Lar Feliz".to_string(), "Lar Feliz II".to_string()]
        );
    }

    #[tokio::test]
    async fn test_cancel_only_applies_while_submitting() {
        let workflow =
            OrphanageSubmissionWorkflow::new(Arc::new(MockOrphanageService::new()), position());
        assert!(!workflow.cancel().await);
        assert_eq!(workflow.state().await, SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_start_uses_picked_position() {
        let picker = crate::location::FixedLocation(position());
        let workflow =
            OrphanageSubmissionWorkflow::start(Arc::new(MockOrphanageService::new()), &picker)
                .await
                .unwrap();
        assert_eq!(workflow.draft().await.position(), position());
    }
}
