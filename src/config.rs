use figment::providers::Env;
use figment::providers::Format;
use figment::providers::Yaml;
use figment::Figment;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

#[derive(Deserialize, Debug)]
pub struct ConfigV1 {
    pub bind_address: String,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

pub fn load_config() -> ConfigV1 {
    let figment = Figment::new()
        .merge(Yaml::file("./config.yaml"))
        .merge(Env::prefixed("APP_EXPORTER_"));

    let config = figment.extract::<Config>();

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };

    match config {
        Config::ConfigV1(c) => c,
    }

    // handle configuration migration between versions here when necessary
}

// --- Subconfigs

/// LoggingConfig controls how we initialize tracing/logging.
#[derive(Deserialize, Debug)]
pub struct LoggingConfig {
    pub level: String,  // e.g. "info", "debug", "warn"
    pub format: String, // e.g. "json", "console"
}

/// Timing knobs for the synthetic load generator.
#[derive(Deserialize, Debug, Clone)]
pub struct SimulationConfig {
    pub enabled: bool,
    pub active_users_interval_secs: u64,
    pub database_connections_interval_secs: u64,
    pub business_transactions_interval_secs: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            enabled: true,
            active_users_interval_secs: 5,
            database_connections_interval_secs: 10,
            business_transactions_interval_secs: 15,
        }
    }
}
