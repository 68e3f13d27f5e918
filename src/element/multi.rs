//! Multi-result binding

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::binding::{lookup, Binding, BindingBuilder, ElementBinding, Lookup};
use crate::driver::{ElementHandle, SearchRoot, WebElement};
use crate::error::{Error, Result};
use crate::locator::Locator;
use crate::page::PageObject;

/// Page attribute resolving to every matching element
///
/// Like [`PageElement`](super::PageElement), but a miss is an empty vector
/// and writes go to every match.
#[derive(Debug, Clone)]
pub struct MultiPageElement {
    binding: ElementBinding,
}

impl MultiPageElement {
    pub fn new(locator: Locator) -> Self {
        Self {
            binding: ElementBinding::new(locator),
        }
    }

    pub fn builder() -> BindingBuilder<Self> {
        BindingBuilder::new()
    }

    /// Query `root` once, in document order
    pub async fn find(&self, root: SearchRoot<'_>) -> Result<Vec<ElementHandle>> {
        match root.find_elements(self.binding.locator()).await {
            Ok(elements) => Ok(elements),
            Err(Error::NoSuchElement(_)) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    pub async fn get<P>(&self, page: &P) -> Result<Lookup<'_, Self>>
    where
        P: AsRef<PageObject> + ?Sized,
    {
        lookup(self, SearchRoot::Page(page.as_ref().webdriver())).await
    }

    pub async fn get_in(&self, context: &dyn WebElement) -> Result<Vec<ElementHandle>> {
        self.resolve(SearchRoot::Element(context)).await
    }

    /// Type `value` into every resolved element, in order
    #[instrument(skip(self, page, value), fields(locator = %self.binding.locator()))]
    pub async fn set<P>(&self, page: &P, value: &str) -> Result<()>
    where
        P: AsRef<PageObject> + ?Sized,
    {
        if self.binding.has_context() {
            return Err(Error::unsupported(format!(
                "Cannot set {}: binding requires a context element",
                self.binding.locator()
            )));
        }

        let elements = self
            .resolve(SearchRoot::Page(page.as_ref().webdriver()))
            .await?;
        if elements.is_empty() {
            return Err(Error::target_not_found(format!(
                "Can't set value, no elements found: {}",
                self.binding.locator()
            )));
        }

        for element in &elements {
            element.send_keys(value).await?;
        }
        Ok(())
    }
}

impl From<ElementBinding> for MultiPageElement {
    fn from(binding: ElementBinding) -> Self {
        Self { binding }
    }
}

#[async_trait]
impl Binding for MultiPageElement {
    type Output = Vec<ElementHandle>;

    fn binding(&self) -> &ElementBinding {
        &self.binding
    }

    async fn resolve(&self, root: SearchRoot<'_>) -> Result<Vec<ElementHandle>> {
        debug!("Resolving all {} against {:?}", self.binding.locator(), root);

        if self.binding.wait_condition().is_some() {
            return Ok(self.binding.find_delayed(root).await?.unwrap_or_default());
        }
        self.find(root).await
    }
}
