use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A point on the map picked for a new orphanage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Produces the position a new orphanage will be registered at.
/// Returns `None` when the user backs out without choosing a point.
#[async_trait]
pub trait LocationPicker: Send + Sync {
    async fn pick(&self) -> Option<Position>;
}

/// Picker that hands back a position known up front (CLI flags, tests)
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Position);

#[async_trait]
impl LocationPicker for FixedLocation {
    async fn pick(&self) -> Option<Position> {
        Some(self.0)
    }
}
