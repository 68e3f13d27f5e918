//! Browser driver traits
//!
//! This module defines the interface the page-object layer expects from a
//! browser automation driver. The driver itself lives outside this crate.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::locator::{By, Locator};

/// Shared reference to an element found by the driver
pub type ElementHandle = Arc<dyn WebElement>;

/// Anything elements can be searched from: the page or an element
#[async_trait]
pub trait SearchContext: Send + Sync {
    /// Find the first matching element
    ///
    /// Fails with [`crate::Error::NoSuchElement`] when nothing matches.
    async fn find_element(&self, by: By, selector: &str) -> Result<ElementHandle>;

    /// Find all matching elements in document order
    ///
    /// Returns an empty vector when nothing matches.
    async fn find_elements(&self, by: By, selector: &str) -> Result<Vec<ElementHandle>>;
}

/// Browser driver session
///
/// A single serial channel to one browser tab or window.
#[async_trait]
pub trait WebDriver: SearchContext + fmt::Debug {
    /// Load a page
    async fn navigate(&self, uri: &str) -> Result<()>;

    /// Make `frame` the active browsing context
    async fn switch_to_frame(&self, frame: &dyn WebElement) -> Result<()>;

    /// Return to the top-level browsing context
    async fn switch_to_default_content(&self) -> Result<()>;

    /// Base URI configured on the session, if any
    fn root_uri(&self) -> Option<String> {
        None
    }
}

/// DOM element reference
#[async_trait]
pub trait WebElement: SearchContext + fmt::Debug {
    /// Get element ID
    fn id(&self) -> &str;

    /// Driver session that owns this element
    fn driver(&self) -> Arc<dyn WebDriver>;

    /// Type text into element
    async fn send_keys(&self, value: &str) -> Result<()>;

    /// Get element text
    async fn text(&self) -> Result<String>;

    /// Check if element is visible
    async fn is_displayed(&self) -> Result<bool>;

    /// Check if element is enabled
    async fn is_enabled(&self) -> Result<bool>;
}

/// Root a lookup is evaluated against
#[derive(Clone, Copy)]
pub enum SearchRoot<'a> {
    /// The whole page of a driver session
    Page(&'a dyn WebDriver),
    /// The subtree below an element
    Element(&'a dyn WebElement),
}

impl<'a> SearchRoot<'a> {
    pub async fn find_element(&self, locator: &Locator) -> Result<ElementHandle> {
        match self {
            SearchRoot::Page(driver) => driver.find_element(locator.by(), locator.selector()).await,
            SearchRoot::Element(element) => {
                element.find_element(locator.by(), locator.selector()).await
            }
        }
    }

    pub async fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementHandle>> {
        match self {
            SearchRoot::Page(driver) => {
                driver.find_elements(locator.by(), locator.selector()).await
            }
            SearchRoot::Element(element) => {
                element.find_elements(locator.by(), locator.selector()).await
            }
        }
    }
}

impl fmt::Debug for SearchRoot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchRoot::Page(_) => f.write_str("page"),
            SearchRoot::Element(element) => write!(f, "element({})", element.id()),
        }
    }
}
