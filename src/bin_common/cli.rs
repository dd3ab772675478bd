//! CLI utilities for binaries
//!
//! Resolves which configuration file a binary reads.

use std::path::PathBuf;

/// Type of configuration to load
#[derive(Debug, Clone)]
pub enum ConfigType {
    /// Dashboard configuration (config/dashboard.yaml)
    Dashboard,
}

impl ConfigType {
    /// Get the default path for this config type
    pub fn default_path(&self) -> &str {
        match self {
            ConfigType::Dashboard => "config/dashboard.yaml",
        }
    }

    /// Get the environment variable name for this config type
    pub fn env_var_name(&self) -> &str {
        match self {
            ConfigType::Dashboard => "DASHBOARD_CONFIG_PATH",
        }
    }
}

/// Load configuration path from environment or use default
///
/// ```
/// use deribit_dashboard::bin_common::{load_config_from_env, ConfigType};
///
/// let path = load_config_from_env(ConfigType::Dashboard);
/// ```
pub fn load_config_from_env(config_type: ConfigType) -> PathBuf {
    std::env::var(config_type.env_var_name())
        .unwrap_or_else(|_| config_type.default_path().to_string())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_type_paths() {
        assert_eq!(ConfigType::Dashboard.default_path(), "config/dashboard.yaml");
    }

    #[test]
    fn test_config_type_env_vars() {
        assert_eq!(ConfigType::Dashboard.env_var_name(), "DASHBOARD_CONFIG_PATH");
    }
}
