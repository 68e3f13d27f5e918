//! Single-result binding

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::binding::{lookup, Binding, BindingBuilder, ElementBinding, Lookup};
use crate::driver::{ElementHandle, SearchRoot, WebElement};
use crate::error::{Error, Result};
use crate::locator::Locator;
use crate::page::PageObject;

/// Page attribute resolving to the first matching element
///
/// ```rust,no_run
/// use page_objects::{PageElement, PageObject, Result};
///
/// # async fn example(page: &PageObject) -> Result<()> {
/// let search = PageElement::builder().name("q").build()?;
/// search.set(page, "page objects").await?;
///
/// if let Some(input) = search.get(page).await?.ready().flatten() {
///     println!("found {}", input.id());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PageElement {
    binding: ElementBinding,
}

impl PageElement {
    /// Immediate, page-rooted binding for `locator`
    pub fn new(locator: Locator) -> Self {
        Self {
            binding: ElementBinding::new(locator),
        }
    }

    pub fn builder() -> BindingBuilder<Self> {
        BindingBuilder::new()
    }

    /// Query `root` once; a missing element is `None`
    pub async fn find(&self, root: SearchRoot<'_>) -> Result<Option<ElementHandle>> {
        match root.find_element(self.binding.locator()).await {
            Ok(element) => Ok(Some(element)),
            Err(Error::NoSuchElement(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Read against the page
    ///
    /// Bindings declared with `context(true)` yield [`Lookup::NeedsContext`].
    pub async fn get<P>(&self, page: &P) -> Result<Lookup<'_, Self>>
    where
        P: AsRef<PageObject> + ?Sized,
    {
        lookup(self, SearchRoot::Page(page.as_ref().webdriver())).await
    }

    /// Read with an explicit context element as root
    pub async fn get_in(&self, context: &dyn WebElement) -> Result<Option<ElementHandle>> {
        self.resolve(SearchRoot::Element(context)).await
    }

    /// Type `value` into the resolved element
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

        let element = self
            .resolve(SearchRoot::Page(page.as_ref().webdriver()))
            .await?
            .ok_or_else(|| {
                Error::target_not_found(format!(
                    "Can't set value, element not found: {}",
                    self.binding.locator()
                ))
            })?;

        element.send_keys(value).await
    }
}

impl From<ElementBinding> for PageElement {
    fn from(binding: ElementBinding) -> Self {
        Self { binding }
    }
}

#[async_trait]
impl Binding for PageElement {
    type Output = Option<ElementHandle>;

    fn binding(&self) -> &ElementBinding {
        &self.binding
    }

    async fn resolve(&self, root: SearchRoot<'_>) -> Result<Option<ElementHandle>> {
        debug!("Resolving {} against {:?}", self.binding.locator(), root);

        if self.binding.wait_condition().is_some() {
            let found = self.binding.find_delayed(root).await?;
            return Ok(found.and_then(|elements| elements.into_iter().next()));
        }
        self.find(root).await
    }
}
