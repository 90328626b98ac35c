use std::sync::Arc;
use tracing::warn;

use crate::api::{OrphanageRecord, OrphanageService};
use crate::errors::OrphanageError;
use crate::views::ViewState;

pub fn weekend_label(open_on_weekends: bool) -> &'static str {
    if open_on_weekends {
        "Atendemos aos fins de semana"
    } else {
        "Não atendemos aos fins de semana"
    }
}

/// Google Maps route to the orphanage
pub fn directions_url(record: &OrphanageRecord) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}",
        record.latitude, record.longitude
    )
}

/// Detail screen for a single orphanage, loaded once per id
pub struct OrphanageDetailView {
    service: Arc<dyn OrphanageService>,
    id: u64,
    state: ViewState<OrphanageRecord>,
}

impl OrphanageDetailView {
    pub fn new(service: Arc<dyn OrphanageService>, id: u64) -> Self {
        Self {
            service,
            id,
            state: ViewState::Loading,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> &ViewState<OrphanageRecord> {
        &self.state
    }

    pub fn record(&self) -> Option<&OrphanageRecord> {
        self.state.data()
    }

    /// Fetch the record unless it is already loaded
    pub async fn load(&mut self) -> Result<(), OrphanageError> {
        if self.state.is_loaded() {
            return Ok(());
        }

        match self.service.fetch_detail(self.id).await {
            Ok(record) => {
                self.state = ViewState::Loaded(record);
                Ok(())
            }
            Err(source) => {
                warn!(id = self.id, error = %source, "Failed to load orphanage");
                let err = OrphanageError::Fetch { source };
                self.state = ViewState::Failed(err.to_string());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ImageRef, MockOrphanageService};

    fn record() -> OrphanageRecord {
        OrphanageRecord {
            id: 3,
            name: "Lar Feliz".to_string(),
            latitude: -21.687,
            longitude: -51.073,
            about: "Abrigo".to_string(),
            instructions: "Venha visitar".to_string(),
            opening_hours: "8h às 18h".to_string(),
            open_on_weekends: true,
            images: vec![ImageRef {
                id: 1,
                url: "http://localhost:3333/uploads/1.jpg".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_detail_loads_once() {
        let mut service = MockOrphanageService::new();
        service
            .expect_fetch_detail()
            .with(mockall::predicate::eq(3))
            .times(1)
            .returning(|_| Ok(record()));

        let mut view = OrphanageDetailView::new(Arc::new(service), 3);
        assert!(!view.state().is_loaded());

        view.load().await.unwrap();
        view.load().await.unwrap();
        assert!(view.state().is_loaded());
        assert_eq!(view.record().unwrap().name, "Lar Feliz");
        assert_eq!(view.record().unwrap().images.len(), 1);
    }

    #[tokio::test]
    async fn test_detail_failure_becomes_view_error() {
        let mut service = MockOrphanageService::new();
        service.expect_fetch_detail().returning(|_| {
            Err(ApiError::Status {
                status: 404,
                url: "http://localhost:3333/orphanages/9".to_string(),
            })
        });

        let mut view = OrphanageDetailView::new(Arc::new(service), 9);
        let err = view.load().await.unwrap_err();
        assert!(err.is_recoverable());
        assert!(view.state().error().unwrap().contains("404"));
    }

    #[test]
    fn test_weekend_labels() {
        assert_eq!(weekend_label(true), "Atendemos aos fins de semana");
        assert_eq!(weekend_label(false), "Não atendemos aos fins de semana");
    }

    #[test]
    fn test_directions_url() {
        assert_eq!(
            directions_url(&record()),
            "https://www.google.com/maps/dir/?api=1&destination=-21.687,-51.073"
        );
    }
}
