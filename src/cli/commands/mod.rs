use anyhow::Result;
use std::sync::Arc;

use crate::api::{HttpOrphanageService, OrphanageService, RateLimitedHttpClient};
use crate::config::OrphanagesConfig;

pub mod config;
pub mod create;
pub mod list;
pub mod show;

/// Build the HTTP-backed service every command talks to
pub fn connect(settings: &OrphanagesConfig) -> Result<Arc<dyn OrphanageService>> {
    let client = RateLimitedHttpClient::new(&settings.api)?;
    tracing::debug!(base_url = %client.base_url(), "Connecting to orphanage API");
    Ok(Arc::new(HttpOrphanageService::new(client)))
}

pub fn show_usage() -> Result<()> {
    println!("🏠 Orphanages - directory of orphanages near you");
    println!();
    println!("To get started:");
    println!("  🗺️  orphanages list              # See every registered orphanage");
    println!("  🔎 orphanages show <id>         # Details of one orphanage");
    println!("  🧭 orphanages directions <id>   # Route link on Google Maps");
    println!("  ➕ orphanages create ...        # Register a new orphanage");
    println!();
    println!("💡 Point ORPHANAGES_API__BASE_URL at your server or create orphanages.toml");
    Ok(())
}
