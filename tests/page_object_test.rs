//! Page model integration tests
//!
//! A page model declared with shared static bindings, driven end to end against the mock driver.

mod common;

use common::{setup_shop, ShopPage, CARD_NUMBER, CHECKOUT_FRAME, RESULT_ROWS, SEARCH_BOX};
use page_objects::driver::mock::{DriverCall, MockNode};
use page_objects::{By, Error, FrameScope, PageElement, PageObject};
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn test_navigation_uses_driver_root_uri() {
    let driver = setup_shop();
    let shop = ShopPage::new(&driver, None);

    assert_ok!(shop.as_ref().get("search?q=tea").await);
    assert_eq!(driver.navigations(), vec!["https://shop.test/search?q=tea"]);
}

#[tokio::test]
async fn test_explicit_root_uri_overrides_driver() {
    let driver = setup_shop();
    let shop = ShopPage::new(&driver, Some("http://x/"));

    assert_ok!(shop.as_ref().get("foo").await);
    assert_eq!(driver.navigations(), vec!["http://x/foo"]);
}

#[tokio::test]
async fn test_search_and_read_prices() {
    let driver = setup_shop();
    let shop = ShopPage::new(&driver, None);

    assert_ok!(shop.search("tea").await);
    let prices = shop.prices().await.expect("prices should resolve");
    assert_eq!(prices, vec!["4.20", "13.37"]);

    let sent: Vec<_> = driver
        .calls()
        .into_iter()
        .filter(|c| matches!(c, DriverCall::SendKeys { .. }))
        .collect();
    assert_eq!(sent.len(), 1);
}

#[tokio::test]
async fn test_bindings_are_shared_between_pages() {
    let first_driver = setup_shop();
    let second_driver = setup_shop();
    second_driver.insert(MockNode::new("tr").matching(By::Css, "tr.result"));

    let first = ShopPage::new(&first_driver, None);
    let second = ShopPage::new(&second_driver, None);

    let first_rows = RESULT_ROWS.get(&first).await.unwrap().ready().unwrap();
    let second_rows = RESULT_ROWS.get(&second).await.unwrap().ready().unwrap();
    assert_eq!(first_rows.len(), 2);
    assert_eq!(second_rows.len(), 3);
}

#[tokio::test]
async fn test_fill_card_inside_checkout_frame() {
    let driver = setup_shop();
    let shop = ShopPage::new(&driver, None);

    let frame = CHECKOUT_FRAME.get(&shop).await.unwrap().ready().flatten();
    let scope = FrameScope::new(frame).expect("checkout frame present");

    assert_ok!(scope.run(|| CARD_NUMBER.set(&shop, "4242 4242 4242 4242")).await);
    assert!(driver.active_frame().is_none());

    // outside the frame the card field is not reachable
    let err = CARD_NUMBER.set(&shop, "0000").await.unwrap_err();
    assert!(matches!(err, Error::TargetNotFound(_)));
}

#[tokio::test]
async fn test_frame_restored_when_write_fails() {
    let driver = setup_shop();
    let shop = ShopPage::new(&driver, None);

    let frame = CHECKOUT_FRAME.get(&shop).await.unwrap().ready().flatten();
    let scope = FrameScope::new(frame).unwrap();

    // the search box lives in the top document, not in the frame
    let result = scope.run(|| SEARCH_BOX.set(&shop, "tea")).await;
    assert!(matches!(result, Err(Error::TargetNotFound(_))));

    let switches: Vec<_> = driver
        .calls()
        .into_iter()
        .filter(|c| {
            matches!(
                c,
                DriverCall::SwitchToFrame(_) | DriverCall::SwitchToDefaultContent
            )
        })
        .collect();
    assert_eq!(switches.len(), 2);
    assert_eq!(switches[1], DriverCall::SwitchToDefaultContent);
}

#[tokio::test]
async fn test_missing_frame_is_configuration_error() {
    let driver = setup_shop();
    let page = PageObject::new(Arc::new(driver.clone()), None);

    let missing = PageElement::builder().id("no-such-frame").build().unwrap();
    let frame = missing.get(&page).await.unwrap().ready().flatten();
    let err = assert_err!(FrameScope::new(frame));
    assert!(err.is_configuration());
}

#[tokio::test]
async fn test_lost_session_propagates() {
    let driver = setup_shop();
    let shop = ShopPage::new(&driver, None);
    driver.disconnect();

    let err = shop.search("tea").await.unwrap_err();
    assert!(matches!(err, Error::Driver(_)));
}
