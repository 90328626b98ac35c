use serde::{Deserialize, Serialize};

use crate::location::Position;

/// Photo of an orphanage as stored by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub id: u64,
    pub url: String,
}

/// Map marker shape returned by the listing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrphanageSummary {
    pub id: u64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl OrphanageSummary {
    pub fn position(&self) -> Position {
        Position::new(self.latitude, self.longitude)
    }
}

/// Full server-confirmed orphanage, never mutated locally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrphanageRecord {
    pub id: u64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub opening_hours: String,
    pub open_on_weekends: bool,
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

impl OrphanageRecord {
    pub fn position(&self) -> Position {
        Position::new(self.latitude, self.longitude)
    }
}
