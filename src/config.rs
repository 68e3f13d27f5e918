//! Configuration management for page objects

use crate::element::{BindingBuilder, MultiPageElement, PageElement};
use crate::{Error, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Page object configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Wait budget for bindings declared with a wait condition, in milliseconds
    pub wait_time_ms: u64,

    /// Delay between wait condition checks, in milliseconds
    pub poll_interval_ms: u64,

    /// Root URI for page navigation
    pub root_uri: Option<String>,

    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wait_time_ms: 5000,
            poll_interval_ms: 500,
            root_uri: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(wait_time) = env::var("PAGE_OBJECTS_WAIT_TIME_MS") {
            config.wait_time_ms = wait_time
                .parse()
                .map_err(|_| Error::configuration("Invalid PAGE_OBJECTS_WAIT_TIME_MS"))?;
        }

        if let Ok(poll_interval) = env::var("PAGE_OBJECTS_POLL_INTERVAL_MS") {
            config.poll_interval_ms = poll_interval
                .parse()
                .map_err(|_| Error::configuration("Invalid PAGE_OBJECTS_POLL_INTERVAL_MS"))?;
        }

        if let Ok(root_uri) = env::var("PAGE_OBJECTS_ROOT_URI") {
            config.root_uri = Some(root_uri);
        }

        if let Ok(log_level) = env::var("PAGE_OBJECTS_LOG_LEVEL") {
            config.log_level = log_level;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| Error::configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.wait_time_ms == 0 {
            return Err(Error::configuration("wait_time_ms must be positive"));
        }
        Ok(())
    }

    pub fn wait_time(&self) -> Duration {
        Duration::from_millis(self.wait_time_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Single-result binding builder seeded with the configured wait settings
    pub fn element(&self) -> BindingBuilder<PageElement> {
        PageElement::builder()
            .wait_time(self.wait_time())
            .poll_interval(self.poll_interval())
    }

    /// Multi-result binding builder seeded with the configured wait settings
    pub fn elements(&self) -> BindingBuilder<MultiPageElement> {
        MultiPageElement::builder()
            .wait_time(self.wait_time())
            .poll_interval(self.poll_interval())
    }

    /// Install a global fmt subscriber
    ///
    /// `RUST_LOG` takes precedence over `log_level`. Does nothing if a
    /// subscriber is already installed.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.log_level));

        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }
}
