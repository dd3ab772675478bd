//! Deribit Order-Book Dashboard - Main Library
//!
//! ## Architecture
//!
//! - **deribit**: market-data client (re-exported from workspace)
//! - **panels**: window kernel and content renderers (re-exported from workspace)
//! - **app**: dashboard shell and the egui backend
//! - **config**: YAML configuration with built-in defaults
//! - **bin_common**: common utilities for binary executables (CLI, logging)
//!
//! ## Usage in Binaries
//!
//! ```rust,ignore
//! use deribit_dashboard::bin_common::{load_config_from_env, ConfigType};
//! use deribit_dashboard::config::DashboardConfig;
//! ```

// Re-export workspace libraries for convenience
pub use deribit;
pub use panels;

pub mod app;
pub mod config;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod cli;
    pub mod logging;

    pub use cli::{load_config_from_env, ConfigType};
    pub use logging::init_tracing_with_level;
}

pub use config::{AssetError, ConfigError, DashboardConfig};
