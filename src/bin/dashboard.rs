//! Dashboard Binary - Deribit order-book viewer
//!
//! Usage:
//!   ./dashboard                                        # built-in defaults
//!   DASHBOARD_CONFIG_PATH=config/dashboard.yaml ./dashboard

use anyhow::Result;
use deribit_dashboard::app::{self, Dashboard};
use deribit_dashboard::bin_common::{init_tracing_with_level, load_config_from_env, ConfigType};
use deribit_dashboard::config::DashboardConfig;
use deribit_dashboard::panels::{DataSlot, FontHandle};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Load config
    let config_path = load_config_from_env(ConfigType::Dashboard);
    let config = DashboardConfig::load_or_default(&config_path)?;

    // Initialize logging
    init_tracing_with_level(&config.log_level);
    config.log();

    // Font is required before any window exists
    let font = config.load_font()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("deribit-feed")
        .build()?;

    let slot = DataSlot::new();
    let initial = config.initial_instrument().to_string();

    let client = runtime.block_on(
        deribit::builder()
            .url(config.feed.endpoint.clone())
            .poll_interval(config.feed.poll_interval())
            .open(&initial, Arc::new(slot.clone())),
    );
    let client = match client {
        Ok(client) => {
            info!("Polling {} every {:?}", initial, config.feed.poll_interval());
            Some(Arc::new(client))
        }
        Err(e) => {
            error!("Failed to connect to Deribit: {}", e);
            None
        }
    };

    let shell = Dashboard::new(&config, FontHandle::default(), slot, client.clone());
    let result = app::run(&config, font, shell);

    if let Some(client) = client {
        client.close();
        let drained = runtime.block_on(tokio::time::timeout(SHUTDOWN_TIMEOUT, client.closed()));
        if drained.is_err() {
            warn!("Market-data tasks did not stop within {:?}", SHUTDOWN_TIMEOUT);
        }
        info!("Session totals: {:?}", client.metrics());
    }
    runtime.shutdown_timeout(SHUTDOWN_TIMEOUT);

    info!("Dashboard stopped");
    result
}
