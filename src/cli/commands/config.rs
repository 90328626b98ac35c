use anyhow::Result;
use std::path::PathBuf;

use crate::config::OrphanagesConfig;

pub struct ConfigCommand {
    pub output: Option<PathBuf>,
}

impl ConfigCommand {
    pub fn new(output: Option<PathBuf>) -> Self {
        Self { output }
    }

    pub fn execute(&self, settings: &OrphanagesConfig) -> Result<()> {
        match &self.output {
            Some(path) => {
                settings.save_to_file(path)?;
                println!("💾 Configuration written to {}", path.display());
            }
            None => print!("{}", toml::to_string_pretty(settings)?),
        }
        Ok(())
    }
}
