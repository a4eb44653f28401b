use std::sync::Arc;

use app_exporter::config::load_config;
use app_exporter::startup;
use app_exporter::utils::logger::init_logging;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = load_config();
    init_logging(&config.logging);

    info!("Configuration loaded, starting exporter");

    if let Err(e) = startup::run(Arc::new(config)).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
