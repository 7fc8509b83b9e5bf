use serde::{Deserialize, Serialize};
use std::path::Path;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::ResolverConfig;

const LOCAL_CONFIG: &str = "mta-dns.toml";
const SYSTEM_CONFIG: &str = "/etc/mta-dns/config.toml";

/// Main configuration structure for the resolver backend
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Upstream resolution settings
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. mta-dns.toml in current directory
    /// 3. /etc/mta-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            Self::from_file(path)
        } else if Path::new(LOCAL_CONFIG).exists() {
            Self::from_file(LOCAL_CONFIG)
        } else if Path::new(SYSTEM_CONFIG).exists() {
            Self::from_file(SYSTEM_CONFIG)
        } else {
            Ok(Self::default())
        }
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolver.nameservers.is_empty() {
            return Err(ConfigError::Validation(
                "No nameservers configured".to_string(),
            ));
        }

        self.resolver
            .nameserver_addrs()
            .map_err(ConfigError::Validation)?;

        if self.resolver.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Query timeout cannot be 0".to_string(),
            ));
        }

        if self.resolver.udp_payload_size < 512 {
            return Err(ConfigError::Validation(format!(
                "UDP payload size {} is below the 512-byte minimum",
                self.resolver.udp_payload_size
            )));
        }

        Ok(())
    }
}
