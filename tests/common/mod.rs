//! Common test utilities
//!
//! Shared fixtures for the integration tests: a mock shop page and its page model.

#![allow(dead_code)]

use page_objects::driver::mock::{MockDriver, MockNode};
use page_objects::{By, Expected, MultiPageElement, PageElement, PageObject, Result, WebElement};
use std::sync::{Arc, LazyLock};
use std::time::Duration;

/// Bindings declared once and shared by every `ShopPage`
pub static SEARCH_BOX: LazyLock<PageElement> =
    LazyLock::new(|| PageElement::builder().name("q").build().expect("valid binding"));

pub static RESULT_ROWS: LazyLock<MultiPageElement> = LazyLock::new(|| {
    MultiPageElement::builder()
        .css("tr.result")
        .build()
        .expect("valid binding")
});

pub static ROW_PRICE: LazyLock<PageElement> = LazyLock::new(|| {
    PageElement::builder()
        .class_name("price")
        .context(true)
        .build()
        .expect("valid binding")
});

pub static CHECKOUT_FRAME: LazyLock<PageElement> =
    LazyLock::new(|| PageElement::builder().id("checkout").build().expect("valid binding"));

pub static CARD_NUMBER: LazyLock<PageElement> = LazyLock::new(|| {
    PageElement::builder()
        .xpath("//input[@autocomplete='cc-number']")
        .wait_condition(Expected::Clickable)
        .wait_time(Duration::from_secs(1))
        .poll_interval(Duration::from_millis(10))
        .build()
        .expect("valid binding")
});

/// Page model for the mock shop
pub struct ShopPage {
    page: PageObject,
}

impl ShopPage {
    pub fn new(driver: &MockDriver, root_uri: Option<&str>) -> Self {
        Self {
            page: PageObject::new(Arc::new(driver.clone()), root_uri),
        }
    }

    pub async fn search(&self, term: &str) -> Result<()> {
        SEARCH_BOX.set(self, term).await
    }

    /// Price text of every result row, in order
    pub async fn prices(&self) -> Result<Vec<String>> {
        let rows = RESULT_ROWS.get(self).await?.ready().unwrap_or_default();
        let pending = ROW_PRICE
            .get(self)
            .await?
            .deferred()
            .expect("price binding requires context");

        let mut prices = Vec::new();
        for row in rows {
            if let Some(price) = pending.within(row.as_ref()).await? {
                prices.push(price.text().await?);
            }
        }
        Ok(prices)
    }
}

impl AsRef<PageObject> for ShopPage {
    fn as_ref(&self) -> &PageObject {
        &self.page
    }
}

/// Mock document with a search box, two results and a checkout iframe
pub fn setup_shop() -> MockDriver {
    let driver = MockDriver::with_root_uri("https://shop.test/");

    driver.insert(MockNode::new("input").matching(By::Name, "q"));

    for price in ["4.20", "13.37"] {
        driver.insert(
            MockNode::new("tr")
                .matching(By::Css, "tr.result")
                .with_child(
                    MockNode::new("span")
                        .matching(By::ClassName, "price")
                        .with_text(price),
                ),
        );
    }

    driver.insert(
        MockNode::new("iframe").matching(By::Id, "checkout").with_child(
            MockNode::new("input")
                .matching(By::XPath, "//input[@autocomplete='cc-number']"),
        ),
    );

    driver
}
