use anyhow::Result;
use std::sync::Arc;

use crate::api::OrphanageService;
use crate::views::{directions_url, weekend_label, OrphanageDetailView};

pub struct ShowCommand {
    view: OrphanageDetailView,
    directions_only: bool,
}

impl ShowCommand {
    pub fn new(service: Arc<dyn OrphanageService>, id: u64) -> Self {
        Self {
            view: OrphanageDetailView::new(service, id),
            directions_only: false,
        }
    }

    pub fn with_directions_only(mut self, directions_only: bool) -> Self {
        self.directions_only = directions_only;
        self
    }

    pub async fn execute(&mut self) -> Result<()> {
        if let Err(e) = self.view.load().await {
            println!("❌ {e}");
            return Err(e.into());
        }
        let Some(orphanage) = self.view.record() else {
            return Ok(());
        };

        if self.directions_only {
            println!("{}", directions_url(orphanage));
            return Ok(());
        }

        println!("🏠 {}", orphanage.name);
        if !orphanage.about.is_empty() {
            println!("   {}", orphanage.about);
        }
        println!();

        for image in &orphanage.images {
            println!("🖼️  {}", image.url);
        }
        if !orphanage.images.is_empty() {
            println!();
        }

        println!("📍 {}, {}", orphanage.latitude, orphanage.longitude);
        println!("🧭 Ver rotas no Google Maps: {}", directions_url(orphanage));
        println!();

        println!("Instruções para visita");
        println!("   {}", orphanage.instructions);
        println!("🕒 {}", orphanage.opening_hours);
        println!("ℹ️  {}", weekend_label(orphanage.open_on_weekends));
        Ok(())
    }
}
