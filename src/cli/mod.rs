use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

#[derive(Parser)]
#[command(name = "orphanages")]
#[command(about = "Browse and register orphanages from the command line")]
#[command(long_about = "Lists the orphanages known to the directory service, shows the details of one \
                       of them, and registers new orphanages together with their photos. Start with \
                       'orphanages list' to see what is already registered.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every registered orphanage as map markers
    List,
    /// Show everything known about one orphanage
    Show {
        /// Orphanage id as shown by 'list'
        id: u64,
    },
    /// Print a Google Maps route link to an orphanage
    Directions {
        /// Orphanage id as shown by 'list'
        id: u64,
    },
    /// Register a new orphanage at the given position
    Create {
        /// Latitude of the orphanage
        #[arg(long, allow_negative_numbers = true)]
        latitude: f64,
        /// Longitude of the orphanage
        #[arg(long, allow_negative_numbers = true)]
        longitude: f64,
        /// Orphanage name
        #[arg(long)]
        name: String,
        /// Free text about the orphanage
        #[arg(long, default_value = "")]
        about: String,
        /// Visiting instructions
        #[arg(long, default_value = "")]
        instructions: String,
        /// Visiting hours
        #[arg(long, default_value = "")]
        opening_hours: String,
        /// The orphanage does not receive visits on weekends
        #[arg(long)]
        closed_on_weekends: bool,
        /// Photo to attach; repeat for several photos, sent in the given order
        #[arg(long = "image", value_name = "PATH")]
        images: Vec<PathBuf>,
    },
    /// Print the effective configuration as TOML
    Config {
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}
