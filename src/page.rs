//! Page object base
//!
//! Page models hold a [`PageObject`] and expose it through
//! `AsRef<PageObject>`; bindings resolve against its driver.

use std::sync::Arc;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::driver::WebDriver;
use crate::error::Result;

/// Driver handle plus the base URI for relative navigation
#[derive(Debug, Clone)]
pub struct PageObject {
    driver: Arc<dyn WebDriver>,
    root_uri: Option<String>,
}

impl PageObject {
    /// Create a page object
    ///
    /// Without an explicit (non-empty) `root_uri`, the driver's own root URI
    /// is used, if it has one.
    pub fn new(driver: Arc<dyn WebDriver>, root_uri: Option<&str>) -> Self {
        let root_uri = root_uri
            .filter(|uri| !uri.is_empty())
            .map(str::to_string)
            .or_else(|| driver.root_uri());
        Self { driver, root_uri }
    }

    /// Create a page object using the configured root URI
    pub fn from_config(driver: Arc<dyn WebDriver>, config: &Config) -> Self {
        Self::new(driver, config.root_uri.as_deref())
    }

    pub fn driver(&self) -> &Arc<dyn WebDriver> {
        &self.driver
    }

    pub fn webdriver(&self) -> &dyn WebDriver {
        self.driver.as_ref()
    }

    pub fn root_uri(&self) -> Option<&str> {
        self.root_uri.as_deref()
    }

    /// Navigate to `uri` appended to the root URI
    ///
    /// The joined string is passed to the driver as-is.
    #[instrument(skip(self))]
    pub async fn get(&self, uri: &str) -> Result<()> {
        let target = format!("{}{}", self.root_uri.as_deref().unwrap_or(""), uri);
        debug!("Navigating to {}", target);
        self.driver.navigate(&target).await
    }
}

impl AsRef<PageObject> for PageObject {
    fn as_ref(&self) -> &PageObject {
        self
    }
}
