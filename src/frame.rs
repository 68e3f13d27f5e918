//! Iframe scope
//!
//! Switches the driver into an iframe for the duration of a block and always
//! switches back to the default content afterwards. Nested scopes are not
//! tracked: the last switch wins.

use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::driver::{ElementHandle, WebDriver};
use crate::error::{Error, Result};

/// Scope running a block inside an iframe
#[derive(Debug)]
pub struct FrameScope {
    iframe: ElementHandle,
    driver: Arc<dyn WebDriver>,
}

impl FrameScope {
    /// Create a scope for `iframe`; `None` is a configuration error
    pub fn new(iframe: Option<ElementHandle>) -> Result<Self> {
        let iframe = iframe.ok_or_else(|| Error::configuration("Please specify an iframe"))?;
        let driver = iframe.driver();
        Ok(Self { iframe, driver })
    }

    pub fn iframe(&self) -> &ElementHandle {
        &self.iframe
    }

    /// Switch into the iframe
    pub async fn enter(&self) -> Result<()> {
        debug!("Entering frame {}", self.iframe.id());
        self.driver.switch_to_frame(self.iframe.as_ref()).await
    }

    /// Switch back to the top-level browsing context
    pub async fn exit(&self) -> Result<()> {
        debug!("Leaving frame {}", self.iframe.id());
        self.driver.switch_to_default_content().await
    }

    /// Run `block` inside the iframe
    ///
    /// The default content is restored whether the block succeeds, fails or
    /// panics. The block's own error is returned unchanged; a failed restore
    /// is only reported when the block succeeded.
    pub async fn run<F, Fut, T, E>(&self, block: F) -> std::result::Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: From<Error>,
    {
        self.enter().await?;

        let outcome = AssertUnwindSafe(async move { block().await })
            .catch_unwind()
            .await;
        let restored = self.exit().await;

        match outcome {
            Ok(Ok(value)) => {
                restored?;
                Ok(value)
            }
            Ok(Err(e)) => {
                if let Err(restore_err) = restored {
                    warn!("Failed to restore default content: {}", restore_err);
                }
                Err(e)
            }
            Err(panic) => {
                if let Err(restore_err) = restored {
                    warn!("Failed to restore default content: {}", restore_err);
                }
                std::panic::resume_unwind(panic)
            }
        }
    }
}
