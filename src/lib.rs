//! Chaser page objects: the Page Object pattern for browser automation
//!
//! This library binds named attributes of a page model to elements in a live
//! browser session. A binding is declared once and re-queries the driver on
//! every read.

pub mod error;
pub mod config;

pub mod driver;
pub mod locator;
pub mod wait;
pub mod element;
pub mod frame;
pub mod page;

// Re-exports
pub use error::{Error, Result};
pub use config::Config;
pub use driver::{ElementHandle, SearchContext, SearchRoot, WebDriver, WebElement};
pub use locator::{By, Locator};
pub use wait::{Expected, Wait, WaitCondition};
pub use element::{
    Binding, BindingBuilder, ContextLookup, ElementBinding, Lookup, MultiPageElement, PageElement,
};
pub use frame::FrameScope;
pub use page::PageObject;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
