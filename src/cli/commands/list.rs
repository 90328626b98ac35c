use anyhow::Result;
use std::sync::Arc;

use crate::api::OrphanageService;
use crate::views::{MapRegion, OrphanageListing};

pub struct ListCommand {
    service: Arc<dyn OrphanageService>,
    region: MapRegion,
}

impl ListCommand {
    pub fn new(service: Arc<dyn OrphanageService>, region: MapRegion) -> Self {
        Self { service, region }
    }

    pub async fn execute(&self) -> Result<()> {
        let mut listing = OrphanageListing::new(self.service.clone(), self.region);

        if let Err(e) = listing.refresh().await {
            println!("❌ {e}");
            println!("   💡 Run 'orphanages list' again once the server is reachable");
            return Err(e.into());
        }

        let region = listing.region();
        println!(
            "🗺️  Map centred on {}, {} (±{})",
            region.center.latitude, region.center.longitude, region.latitude_delta
        );
        println!();

        for orphanage in listing.markers() {
            println!(
                "📍 #{} {} ({}, {})",
                orphanage.id, orphanage.name, orphanage.latitude, orphanage.longitude
            );
        }

        if !listing.markers().is_empty() {
            println!();
        }
        println!("{}", listing.footer());
        Ok(())
    }
}
