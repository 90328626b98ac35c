use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use crate::api::OrphanageService;
use crate::location::{FixedLocation, Position};
use crate::photos::QueuedPhotoLibrary;
use crate::submission::{DraftField, OrphanageSubmissionWorkflow, SubmitOutcome};
use crate::views::{MapRegion, OrphanageListing};

/// Everything the user typed into the registration form
#[derive(Debug, Clone)]
pub struct CreateArgs {
    pub position: Position,
    pub name: String,
    pub about: String,
    pub instructions: String,
    pub opening_hours: String,
    pub open_on_weekends: bool,
    pub images: Vec<PathBuf>,
}

pub struct CreateCommand {
    service: Arc<dyn OrphanageService>,
    region: MapRegion,
    args: CreateArgs,
}

impl CreateCommand {
    pub fn new(service: Arc<dyn OrphanageService>, region: MapRegion, args: CreateArgs) -> Self {
        Self {
            service,
            region,
            args,
        }
    }

    pub async fn execute(&self) -> Result<()> {
        let picker = FixedLocation(self.args.position);
        let Some(workflow) = OrphanageSubmissionWorkflow::start(self.service.clone(), &picker).await
        else {
            println!("❌ No position selected");
            return Ok(());
        };

        workflow.update_field(DraftField::Name(self.args.name.clone())).await;
        workflow.update_field(DraftField::About(self.args.about.clone())).await;
        workflow
            .update_field(DraftField::Instructions(self.args.instructions.clone()))
            .await;
        workflow
            .update_field(DraftField::OpeningHours(self.args.opening_hours.clone()))
            .await;
        workflow
            .update_field(DraftField::OpenOnWeekends(self.args.open_on_weekends))
            .await;

        let library = QueuedPhotoLibrary::new(self.args.images.iter().cloned());
        loop {
            match workflow.pick_image(&library).await {
                Ok(Some(handle)) => println!("🖼️  Attached {}", handle.path().display()),
                Ok(None) => break,
                Err(e) => {
                    println!("❌ {e}");
                    return Err(e.into());
                }
            }
        }

        println!("📤 Sending {}...", self.args.name);
        match workflow.submit().await {
            Ok(SubmitOutcome::Submitted) => {
                println!("✅ Orphanage registered");
                println!();
                // Back to the map, as the app does after a successful registration
                let mut listing = OrphanageListing::new(self.service.clone(), self.region);
                match listing.refresh().await {
                    Ok(()) => println!("{}", listing.footer()),
                    Err(e) => println!("⚠️  {e}"),
                }
                Ok(())
            }
            Ok(other) => {
                tracing::debug!(?other, "Submit had nothing to do");
                println!("ℹ️  Nothing was sent");
                Ok(())
            }
            Err(e) => {
                println!("❌ {e}");
                Err(e.into())
            }
        }
    }
}
