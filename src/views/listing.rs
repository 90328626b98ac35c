use std::sync::Arc;
use tracing::warn;

use crate::api::{OrphanageService, OrphanageSummary};
use crate::config::MapConfig;
use crate::errors::OrphanageError;
use crate::location::Position;
use crate::views::ViewState;

/// Area the map opens on before any marker is shown
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRegion {
    pub center: Position,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl From<&MapConfig> for MapRegion {
    fn from(map: &MapConfig) -> Self {
        Self {
            center: Position::new(map.initial_latitude, map.initial_longitude),
            latitude_delta: map.region_delta,
            longitude_delta: map.region_delta,
        }
    }
}

pub fn footer_text(count: usize) -> String {
    format!("{count} orfanatos encontrados")
}

/// Map screen listing every orphanage. Refetched each time it gains focus.
pub struct OrphanageListing {
    service: Arc<dyn OrphanageService>,
    region: MapRegion,
    state: ViewState<Vec<OrphanageSummary>>,
}

impl OrphanageListing {
    pub fn new(service: Arc<dyn OrphanageService>, region: MapRegion) -> Self {
        Self {
            service,
            region,
            state: ViewState::Loading,
        }
    }

    pub fn region(&self) -> MapRegion {
        self.region
    }

    pub fn state(&self) -> &ViewState<Vec<OrphanageSummary>> {
        &self.state
    }

    /// Fetch the listing again; on failure the view keeps a retryable error
    pub async fn refresh(&mut self) -> Result<(), OrphanageError> {
        match self.service.fetch_listing().await {
            Ok(orphanages) => {
                self.state = ViewState::Loaded(orphanages);
                Ok(())
            }
            Err(source) => {
                warn!(error = %source, "Failed to load orphanage listing");
                let err = OrphanageError::Fetch { source };
                self.state = ViewState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Markers to draw; empty until the listing has loaded
    pub fn markers(&self) -> &[OrphanageSummary] {
        self.state.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn footer(&self) -> String {
        footer_text(self.markers().len())
    }

    pub fn find(&self, id: u64) -> Option<&OrphanageSummary> {
        self.markers().iter().find(|o| o.id == id)
    }
}
