//! Bounded waits
//!
//! [`Wait`] polls a [`WaitCondition`] against a search root until the condition
//! yields elements or the timeout expires. [`Expected`] provides the usual
//! locator-based conditions.

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, instrument};

use crate::driver::{ElementHandle, SearchRoot};
use crate::error::{Error, Result};
use crate::locator::Locator;

/// Default wait budget for bindings
pub const DEFAULT_WAIT_TIME: Duration = Duration::from_secs(5);

/// Default delay between condition checks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Predicate built from a locator and evaluated repeatedly by [`Wait`]
#[async_trait]
pub trait WaitCondition: Send + Sync + fmt::Debug {
    /// Check the condition once
    ///
    /// `Ok(None)` means "not yet". A [`Error::NoSuchElement`] is treated the
    /// same way by [`Wait`]; any other error aborts the wait.
    async fn check(
        &self,
        root: SearchRoot<'_>,
        locator: &Locator,
    ) -> Result<Option<Vec<ElementHandle>>>;
}

/// Built-in expected conditions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    /// An element is attached to the DOM
    Presence,
    /// An element is present and displayed
    Visibility,
    /// An element is displayed and enabled
    Clickable,
    /// At least one element is present; yields all of them
    PresenceOfAll,
    /// Yields the displayed elements once there is at least one
    VisibilityOfAny,
    /// At least one element is present and all are displayed
    VisibilityOfAll,
    /// An element's text contains the given string
    TextPresent(String),
}

/// Stale references count as "not yet"
fn settle(result: Result<bool>) -> Result<bool> {
    match result {
        Err(Error::StaleElement(_)) => Ok(false),
        other => other,
    }
}

#[async_trait]
impl WaitCondition for Expected {
    async fn check(
        &self,
        root: SearchRoot<'_>,
        locator: &Locator,
    ) -> Result<Option<Vec<ElementHandle>>> {
        let found = match self {
            Expected::Presence => Some(vec![root.find_element(locator).await?]),
            Expected::Visibility => {
                let element = root.find_element(locator).await?;
                settle(element.is_displayed().await)?.then(|| vec![element])
            }
            Expected::Clickable => {
                let element = root.find_element(locator).await?;
                let ready = settle(element.is_displayed().await)?
                    && settle(element.is_enabled().await)?;
                ready.then(|| vec![element])
            }
            Expected::PresenceOfAll => {
                let elements = root.find_elements(locator).await?;
                (!elements.is_empty()).then_some(elements)
            }
            Expected::VisibilityOfAny => {
                let mut visible = Vec::new();
                for element in root.find_elements(locator).await? {
                    if settle(element.is_displayed().await)? {
                        visible.push(element);
                    }
                }
                (!visible.is_empty()).then_some(visible)
            }
            Expected::VisibilityOfAll => {
                let elements = root.find_elements(locator).await?;
                let mut all_visible = !elements.is_empty();
                for element in &elements {
                    if !settle(element.is_displayed().await)? {
                        all_visible = false;
                        break;
                    }
                }
                all_visible.then_some(elements)
            }
            Expected::TextPresent(text) => {
                let element = root.find_element(locator).await?;
                let matched = match element.text().await {
                    Ok(current) => current.contains(text.as_str()),
                    Err(Error::StaleElement(_)) => false,
                    Err(e) => return Err(e),
                };
                matched.then(|| vec![element])
            }
        };
        Ok(found)
    }
}

/// Polling wait over a search root
#[derive(Debug)]
pub struct Wait<'a> {
    root: SearchRoot<'a>,
    timeout: Duration,
    poll_interval: Duration,
}

impl<'a> Wait<'a> {
    pub fn new(root: SearchRoot<'a>, timeout: Duration) -> Self {
        Self {
            root,
            timeout,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Poll until `condition` yields elements
    ///
    /// The condition is checked at least once, and once more at the deadline.
    /// Fails with [`Error::Timeout`] when the budget runs out.
    #[instrument(skip(self, condition))]
    pub async fn until(
        &self,
        condition: &dyn WaitCondition,
        locator: &Locator,
    ) -> Result<Vec<ElementHandle>> {
        debug!(
            "Waiting on {:?}: condition={:?}, timeout={:?}",
            self.root, condition, self.timeout
        );

        // `None` when the timeout is past the clock's range: poll without a deadline
        let deadline = Instant::now().checked_add(self.timeout);

        loop {
            match condition.check(self.root, locator).await {
                Ok(Some(found)) => return Ok(found),
                Ok(None) | Err(Error::NoSuchElement(_)) => {}
                Err(e) => return Err(e),
            }

            let pause = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        break;
                    }
                    self.poll_interval.min(deadline - now)
                }
                None => self.poll_interval,
            };
            tokio::time::sleep(pause).await;
        }

        Err(Error::timeout(format!(
            "{:?} not met for {} within {:?}",
            condition, locator, self.timeout
        )))
    }
}
