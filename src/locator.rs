//! Locators and the keyword registry
//!
//! A [`Locator`] pairs a driver search strategy with a selector. Page models
//! declare locators by keyword (`css`, `xpath`, ...); the registry maps each
//! keyword to the strategy the driver understands.

use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Element search strategy
///
/// Serializes to the W3C WebDriver strategy string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum By {
    #[serde(rename = "css selector")]
    Css,
    #[serde(rename = "id")]
    Id,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "xpath")]
    XPath,
    #[serde(rename = "link text")]
    LinkText,
    #[serde(rename = "partial link text")]
    PartialLinkText,
    #[serde(rename = "tag name")]
    TagName,
    #[serde(rename = "class name")]
    ClassName,
}

/// Locator keyword -> search strategy
static LOCATOR_MAP: phf::Map<&'static str, By> = phf_map! {
    "css" => By::Css,
    "id" => By::Id,
    "id_" => By::Id,
    "name" => By::Name,
    "xpath" => By::XPath,
    "link_text" => By::LinkText,
    "partial_link_text" => By::PartialLinkText,
    "tag_name" => By::TagName,
    "class_name" => By::ClassName,
};

impl By {
    /// Look up the strategy for a locator keyword
    pub fn from_keyword(keyword: &str) -> Result<Self> {
        LOCATOR_MAP
            .get(keyword)
            .copied()
            .ok_or_else(|| Error::unknown_locator(keyword))
    }

    /// W3C WebDriver strategy string
    pub const fn as_str(&self) -> &'static str {
        match self {
            By::Css => "css selector",
            By::Id => "id",
            By::Name => "name",
            By::XPath => "xpath",
            By::LinkText => "link text",
            By::PartialLinkText => "partial link text",
            By::TagName => "tag name",
            By::ClassName => "class name",
        }
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strategy and selector identifying elements on a page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    #[serde(rename = "using")]
    by: By,
    #[serde(rename = "value")]
    selector: String,
}

impl Locator {
    /// Create a locator from a strategy and selector
    pub fn new(by: By, selector: impl Into<String>) -> Self {
        Self {
            by,
            selector: selector.into(),
        }
    }

    /// Create a locator from a registry keyword such as `"css"` or `"link_text"`
    pub fn from_keyword(keyword: &str, selector: impl Into<String>) -> Result<Self> {
        Ok(Self::new(By::from_keyword(keyword)?, selector))
    }

    pub fn by(&self) -> By {
        self.by
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.by, self.selector)
    }
}
