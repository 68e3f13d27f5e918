//! Shared binding core
//!
//! Declaration (builder + validation), the tagged read result and the
//! waited-lookup path used by both [`PageElement`] and [`MultiPageElement`].
//!
//! [`PageElement`]: super::PageElement
//! [`MultiPageElement`]: super::MultiPageElement

use async_trait::async_trait;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::driver::{ElementHandle, SearchRoot, WebElement};
use crate::error::{Error, Result};
use crate::locator::Locator;
use crate::wait::{Wait, WaitCondition, DEFAULT_POLL_INTERVAL, DEFAULT_WAIT_TIME};

/// Declaration shared by every binding arity
#[derive(Debug, Clone)]
pub struct ElementBinding {
    locator: Locator,
    has_context: bool,
    wait_condition: Option<Arc<dyn WaitCondition>>,
    wait_time: Duration,
    poll_interval: Duration,
}

impl ElementBinding {
    /// Immediate-lookup binding with default options
    pub fn new(locator: Locator) -> Self {
        Self {
            locator,
            has_context: false,
            wait_condition: None,
            wait_time: DEFAULT_WAIT_TIME,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Reads must supply a context element
    pub fn has_context(&self) -> bool {
        self.has_context
    }

    pub fn wait_condition(&self) -> Option<&dyn WaitCondition> {
        self.wait_condition.as_deref()
    }

    pub fn wait_time(&self) -> Duration {
        self.wait_time
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Waited lookup; `None` when no condition is configured or the wait timed out
    pub(crate) async fn find_delayed(
        &self,
        root: SearchRoot<'_>,
    ) -> Result<Option<Vec<ElementHandle>>> {
        let Some(condition) = self.wait_condition.as_deref() else {
            return Ok(None);
        };

        let wait = Wait::new(root, self.wait_time).poll_interval(self.poll_interval);
        match wait.until(condition, &self.locator).await {
            Ok(found) => Ok(Some(found)),
            Err(Error::Timeout(msg)) => {
                debug!("Wait for {} gave up: {}", self.locator, msg);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Builder validating a binding declaration
///
/// Exactly one locator must be given, through a typed setter or
/// [`locator`](Self::locator).
#[derive(Debug, Clone)]
pub struct BindingBuilder<B> {
    locators: Vec<(String, String)>,
    context: bool,
    wait_condition: Option<Arc<dyn WaitCondition>>,
    wait_time: Duration,
    poll_interval: Duration,
    _marker: PhantomData<fn() -> B>,
}

impl<B> Default for BindingBuilder<B> {
    fn default() -> Self {
        Self {
            locators: Vec::new(),
            context: false,
            wait_condition: None,
            wait_time: DEFAULT_WAIT_TIME,
            poll_interval: DEFAULT_POLL_INTERVAL,
            _marker: PhantomData,
        }
    }
}

impl<B: From<ElementBinding>> BindingBuilder<B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locate by registry keyword (`"css"`, `"id_"`, `"link_text"`, ...)
    pub fn locator(mut self, keyword: impl Into<String>, selector: impl Into<String>) -> Self {
        self.locators.push((keyword.into(), selector.into()));
        self
    }

    pub fn css(self, selector: impl Into<String>) -> Self {
        self.locator("css", selector)
    }

    pub fn id(self, selector: impl Into<String>) -> Self {
        self.locator("id", selector)
    }

    pub fn name(self, selector: impl Into<String>) -> Self {
        self.locator("name", selector)
    }

    pub fn xpath(self, selector: impl Into<String>) -> Self {
        self.locator("xpath", selector)
    }

    pub fn link_text(self, selector: impl Into<String>) -> Self {
        self.locator("link_text", selector)
    }

    pub fn partial_link_text(self, selector: impl Into<String>) -> Self {
        self.locator("partial_link_text", selector)
    }

    pub fn tag_name(self, selector: impl Into<String>) -> Self {
        self.locator("tag_name", selector)
    }

    pub fn class_name(self, selector: impl Into<String>) -> Self {
        self.locator("class_name", selector)
    }

    /// Require a context element on every read
    pub fn context(mut self, context: bool) -> Self {
        self.context = context;
        self
    }

    /// Resolve through a bounded wait on `condition`
    pub fn wait_condition(mut self, condition: impl WaitCondition + 'static) -> Self {
        self.wait_condition = Some(Arc::new(condition));
        self
    }

    pub fn wait_time(mut self, wait_time: Duration) -> Self {
        self.wait_time = wait_time;
        self
    }

    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Validate the declaration
    pub fn build(self) -> Result<B> {
        let mut locators = self.locators;
        if locators.len() > 1 {
            let kinds: Vec<_> = locators.iter().map(|(k, _)| k.as_str()).collect();
            return Err(Error::configuration(format!(
                "Please specify only one locator, got {}",
                kinds.join(", ")
            )));
        }
        let Some((keyword, selector)) = locators.pop() else {
            return Err(Error::configuration("Please specify a locator"));
        };

        if self.wait_time.is_zero() {
            return Err(Error::configuration("wait_time must be positive"));
        }

        Ok(B::from(ElementBinding {
            locator: Locator::from_keyword(&keyword, selector)?,
            has_context: self.context,
            wait_condition: self.wait_condition,
            wait_time: self.wait_time,
            poll_interval: self.poll_interval,
        }))
    }
}

/// A declared binding that can be resolved against a search root
#[async_trait]
pub trait Binding: Send + Sync {
    /// What a read produces
    type Output: Send;

    fn binding(&self) -> &ElementBinding;

    /// Resolve against `root`, waiting when a condition is configured
    async fn resolve(&self, root: SearchRoot<'_>) -> Result<Self::Output>;
}

/// Result of reading a binding
pub enum Lookup<'b, B: Binding + ?Sized> {
    /// Resolved against the page
    Ready(B::Output),
    /// The binding needs a context element first
    NeedsContext(ContextLookup<'b, B>),
}

impl<'b, B: Binding + ?Sized> Lookup<'b, B> {
    /// The resolved value, if no context was needed
    pub fn ready(self) -> Option<B::Output> {
        match self {
            Lookup::Ready(output) => Some(output),
            Lookup::NeedsContext(_) => None,
        }
    }

    /// The deferred lookup, if a context is needed
    pub fn deferred(self) -> Option<ContextLookup<'b, B>> {
        match self {
            Lookup::Ready(_) => None,
            Lookup::NeedsContext(pending) => Some(pending),
        }
    }

    pub fn needs_context(&self) -> bool {
        matches!(self, Lookup::NeedsContext(_))
    }
}

impl<B> fmt::Debug for Lookup<'_, B>
where
    B: Binding + ?Sized,
    B::Output: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Ready(output) => f.debug_tuple("Ready").field(output).finish(),
            Lookup::NeedsContext(pending) => f.debug_tuple("NeedsContext").field(pending).finish(),
        }
    }
}

/// Lookup waiting for a context element
pub struct ContextLookup<'b, B: ?Sized> {
    binding: &'b B,
}

impl<'b, B: Binding + ?Sized> ContextLookup<'b, B> {
    pub(crate) fn new(binding: &'b B) -> Self {
        Self { binding }
    }

    /// Resolve with `context` as the search root
    pub async fn within(&self, context: &dyn WebElement) -> Result<B::Output> {
        self.binding.resolve(SearchRoot::Element(context)).await
    }
}

impl<B: ?Sized> Clone for ContextLookup<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: ?Sized> Copy for ContextLookup<'_, B> {}

impl<B: Binding + ?Sized> fmt::Debug for ContextLookup<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextLookup")
            .field("locator", self.binding.binding().locator())
            .finish()
    }
}

/// Plain read: defer when a context is required, otherwise resolve against `root`
pub(crate) async fn lookup<'b, B: Binding + ?Sized>(
    binding: &'b B,
    root: SearchRoot<'_>,
) -> Result<Lookup<'b, B>> {
    if binding.binding().has_context() {
        debug!("{} needs a context element", binding.binding().locator());
        return Ok(Lookup::NeedsContext(ContextLookup::new(binding)));
    }
    Ok(Lookup::Ready(binding.resolve(root).await?))
}
