use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for the orphanage directory client
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrphanagesConfig {
    /// Remote API settings
    pub api: ApiConfig,
    /// Observability settings
    pub observability: ObservabilityConfig,
    /// Map defaults used by the listing view
    pub map: MapConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the orphanage REST service
    pub base_url: String,
    /// Per-request timeout
    pub timeout_seconds: u64,
    /// Rate limiting settings
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Sustained requests per second
    pub requests_per_second: u32,
    /// Burst capacity
    pub burst_capacity: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
    /// Emit JSON log lines instead of human readable output
    pub json_logs: bool,
    /// Log API usage counters on exit
    pub metrics_enabled: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MapConfig {
    /// Initial map centre latitude
    pub initial_latitude: f64,
    /// Initial map centre longitude
    pub initial_longitude: f64,
    /// Span of the initial region in degrees
    pub region_delta: f64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 5,
            burst_capacity: 10,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_latitude: -21.687,
            initial_longitude: -51.073,
            region_delta: 0.008,
        }
    }
}

impl Default for OrphanagesConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:3333".to_string(),
                timeout_seconds: 30,
                rate_limit: RateLimitConfig::default(),
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
                json_logs: false,
                metrics_enabled: true,
            },
            map: MapConfig::default(),
        }
    }
}

impl OrphanagesConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration files (orphanages.toml, .orphanages-rc)
    /// 3. Environment variables (prefixed with ORPHANAGES_)
    pub fn load() -> Result<Self> {
        let defaults = Config::try_from(&OrphanagesConfig::default())?;
        let mut builder = Config::builder().add_source(defaults);

        if Path::new("orphanages.toml").exists() {
            builder = builder.add_source(File::with_name("orphanages"));
        }

        if Path::new(".orphanages-rc").exists() {
            builder = builder.add_source(
                File::with_name(".orphanages-rc").format(config::FileFormat::Toml),
            );
        }

        // ORPHANAGES_API__BASE_URL -> api.base_url
        builder = builder.add_source(
            Environment::with_prefix("ORPHANAGES")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let orphanages_config: OrphanagesConfig = config.try_deserialize()?;

        Ok(orphanages_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<OrphanagesConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        let _ = OrphanagesConfig::load_env_file();
        OrphanagesConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static OrphanagesConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}
