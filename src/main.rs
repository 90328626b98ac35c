use anyhow::Result;
use clap::Parser;

use orphanages::cli::commands::config::ConfigCommand;
use orphanages::cli::commands::create::{CreateArgs, CreateCommand};
use orphanages::cli::commands::list::ListCommand;
use orphanages::cli::commands::show::ShowCommand;
use orphanages::cli::commands::{connect, show_usage};
use orphanages::cli::{Cli, Commands};
use orphanages::views::MapRegion;
use orphanages::{api_metrics, config, init_telemetry, Position};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = config()?;
    init_telemetry(&settings.observability)?;

    let region = MapRegion::from(&settings.map);

    let result = match cli.command {
        // No subcommand: explain what the tool can do
        None => show_usage(),
        Some(Commands::List) => tokio::runtime::Runtime::new()?.block_on(async {
            ListCommand::new(connect(settings)?, region).execute().await
        }),
        Some(Commands::Show { id }) => tokio::runtime::Runtime::new()?.block_on(async {
            ShowCommand::new(connect(settings)?, id).execute().await
        }),
        Some(Commands::Directions { id }) => tokio::runtime::Runtime::new()?.block_on(async {
            ShowCommand::new(connect(settings)?, id)
                .with_directions_only(true)
                .execute()
                .await
        }),
        Some(Commands::Create {
            latitude,
            longitude,
            name,
            about,
            instructions,
            opening_hours,
            closed_on_weekends,
            images,
        }) => {
            let args = CreateArgs {
                position: Position::new(latitude, longitude),
                name,
                about,
                instructions,
                opening_hours,
                open_on_weekends: !closed_on_weekends,
                images,
            };
            tokio::runtime::Runtime::new()?.block_on(async {
                CreateCommand::new(connect(settings)?, region, args)
                    .execute()
                    .await
            })
        }
        Some(Commands::Config { output }) => ConfigCommand::new(output).execute(settings),
    };

    if settings.observability.metrics_enabled {
        api_metrics().log_stats();
    }
    result
}
