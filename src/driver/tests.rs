//! Driver contract tests
//!
//! Search root dispatch and the mock driver's behaviour as a contract stand-in.

use std::sync::Arc;

use crate::driver::mock::{DriverCall, MockDriver, MockNode};
use crate::driver::{SearchRoot, WebDriver, WebElement};
use crate::locator::{By, Locator};
use crate::Error;

#[tokio::test]
async fn test_search_root_page_dispatch() {
    let driver = MockDriver::new();
    driver.insert(MockNode::new("a").matching(By::LinkText, "Home"));

    let root = SearchRoot::Page(&driver);
    let locator = Locator::new(By::LinkText, "Home");
    assert!(root.find_element(&locator).await.is_ok());
    assert_eq!(root.find_elements(&locator).await.unwrap().len(), 1);

    assert_eq!(
        driver.calls(),
        vec![
            DriverCall::FindElement { root: None, locator: locator.clone() },
            DriverCall::FindElements { root: None, locator },
        ]
    );
    assert_eq!(format!("{:?}", root), "page");
}

#[tokio::test]
async fn test_search_root_element_dispatch() {
    let driver = MockDriver::new();
    let nav = driver.insert(
        MockNode::new("nav")
            .with_child(MockNode::new("a"))
            .with_child(MockNode::new("a")),
    );
    driver.insert(MockNode::new("a"));
    let nav = driver.element(&nav);

    let root = SearchRoot::Element(nav.as_ref());
    let links = root.find_elements(&Locator::new(By::TagName, "a")).await.unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(format!("{:?}", root), format!("element({})", nav.id()));
}

#[tokio::test]
async fn test_missing_element_is_no_such_element() {
    let driver = MockDriver::new();
    let root = SearchRoot::Page(&driver);

    let err = root.find_element(&Locator::new(By::Id, "nope")).await.unwrap_err();
    assert!(matches!(err, Error::NoSuchElement(ref m) if m == "id=nope"));
    assert!(root
        .find_elements(&Locator::new(By::Id, "nope"))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_element_back_reference_shares_session() {
    let driver = MockDriver::new();
    let frame = driver.insert(MockNode::new("iframe"));
    let frame = driver.element(&frame);

    let session: Arc<dyn WebDriver> = frame.driver();
    session.switch_to_frame(frame.as_ref()).await.unwrap();
    assert_eq!(driver.active_frame().as_deref(), Some(frame.id()));
}

#[tokio::test]
async fn test_nested_nodes_in_document_order() {
    let driver = MockDriver::new();
    let outer = driver.insert(
        MockNode::new("ul").with_child(MockNode::new("li").with_text("a")),
    );
    let appended = outer.append(MockNode::new("li").with_text("b"));
    driver.insert(MockNode::new("li").with_text("c"));

    let items = SearchRoot::Page(&driver)
        .find_elements(&Locator::new(By::TagName, "li"))
        .await
        .unwrap();
    let mut texts = Vec::new();
    for item in &items {
        texts.push(item.text().await.unwrap());
    }
    assert_eq!(texts, vec!["a", "b", "c"]);
    assert_eq!(items[1].id(), appended.id());
}
