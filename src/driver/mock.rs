//! Mock driver implementation for testing
//!
//! This module provides an in-memory driver with a small element tree, call
//! recording and failure injection, for development and testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use uuid::Uuid;

use super::traits::{ElementHandle, SearchContext, WebDriver, WebElement};
use crate::error::{Error, Result};
use crate::locator::{By, Locator};

/// Driver call recorded by [`MockDriver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    /// `root` is `None` for page-level searches
    FindElement { root: Option<String>, locator: Locator },
    FindElements { root: Option<String>, locator: Locator },
    Navigate(String),
    SwitchToFrame(String),
    SwitchToDefaultContent,
    SendKeys { element: String, value: String },
}

/// Node in the mock document
#[derive(Debug)]
pub struct MockNode {
    id: String,
    tag_name: String,
    locators: Vec<Locator>,
    text: String,
    displayed: AtomicBool,
    enabled: AtomicBool,
    attached: AtomicBool,
    children: RwLock<Vec<Arc<MockNode>>>,
    keys: Mutex<Vec<String>>,
}

impl MockNode {
    /// Create a new mock node; it matches its own tag name
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tag_name: tag_name.into(),
            locators: Vec::new(),
            text: String::new(),
            displayed: AtomicBool::new(true),
            enabled: AtomicBool::new(true),
            attached: AtomicBool::new(true),
            children: RwLock::new(Vec::new()),
            keys: Mutex::new(Vec::new()),
        }
    }

    /// Also match `locator`
    pub fn matching(mut self, by: By, selector: impl Into<String>) -> Self {
        self.locators.push(Locator::new(by, selector));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn hidden(self) -> Self {
        self.displayed.store(false, Ordering::Relaxed);
        self
    }

    pub fn disabled(self) -> Self {
        self.enabled.store(false, Ordering::Relaxed);
        self
    }

    pub fn with_child(self, child: MockNode) -> Self {
        self.push_child(Arc::new(child));
        self
    }

    /// Append a child to an already inserted node
    pub fn append(&self, child: MockNode) -> Arc<MockNode> {
        let child = Arc::new(child);
        self.push_child(child.clone());
        child
    }

    fn push_child(&self, child: Arc<MockNode>) {
        self.children
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(child);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_displayed(&self, displayed: bool) {
        self.displayed.store(displayed, Ordering::Relaxed);
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Values typed into this node, in order
    pub fn typed(&self) -> Vec<String> {
        self.keys.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn matches(&self, locator: &Locator) -> bool {
        (locator.by() == By::TagName && locator.selector() == self.tag_name)
            || self.locators.contains(locator)
    }

    fn children(&self) -> Vec<Arc<MockNode>> {
        self.children
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn detach(&self) {
        self.attached.store(false, Ordering::Relaxed);
        for child in self.children() {
            child.detach();
        }
    }
}

/// Pre-order search, document order; iframe documents are not entered
fn collect_matches(nodes: &[Arc<MockNode>], locator: &Locator, out: &mut Vec<Arc<MockNode>>) {
    for node in nodes {
        if node.matches(locator) {
            out.push(node.clone());
        }
        if node.tag_name != "iframe" {
            collect_matches(&node.children(), locator, out);
        }
    }
}

fn find_by_id(nodes: &[Arc<MockNode>], id: &str) -> Option<Arc<MockNode>> {
    for node in nodes {
        if node.id == id {
            return Some(node.clone());
        }
        if let Some(found) = find_by_id(&node.children(), id) {
            return Some(found);
        }
    }
    None
}

#[derive(Debug, Default)]
struct MockState {
    document: RwLock<Vec<Arc<MockNode>>>,
    calls: Mutex<Vec<DriverCall>>,
    active_frame: Mutex<Option<String>>,
    root_uri: Option<String>,
    disconnected: AtomicBool,
}

/// Mock driver session
#[derive(Debug, Clone, Default)]
pub struct MockDriver {
    state: Arc<MockState>,
}

impl MockDriver {
    /// Create a new mock driver with an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock driver that advertises a session root URI
    pub fn with_root_uri(uri: impl Into<String>) -> Self {
        Self {
            state: Arc::new(MockState {
                root_uri: Some(uri.into()),
                ..Default::default()
            }),
        }
    }

    /// Add a top-level node to the document
    pub fn insert(&self, node: MockNode) -> Arc<MockNode> {
        let node = Arc::new(node);
        self.state
            .document
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(node.clone());
        node
    }

    /// Remove a top-level node; handles to it and its subtree go stale
    pub fn remove(&self, id: &str) {
        let mut document = self
            .state
            .document
            .write()
            .unwrap_or_else(|e| e.into_inner());
        if let Some(pos) = document.iter().position(|n| n.id == id) {
            document.remove(pos).detach();
        }
    }

    /// Element handle for a node, as the driver would return it
    pub fn element(&self, node: &Arc<MockNode>) -> ElementHandle {
        Arc::new(MockElement {
            node: node.clone(),
            driver: self.clone(),
        })
    }

    /// Recorded calls
    pub fn calls(&self) -> Vec<DriverCall> {
        self.state
            .calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn clear_calls(&self) {
        self.state
            .calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    /// URIs passed to `navigate`, in order
    pub fn navigations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                DriverCall::Navigate(uri) => Some(uri),
                _ => None,
            })
            .collect()
    }

    /// ID of the frame searches are currently scoped to
    pub fn active_frame(&self) -> Option<String> {
        self.state
            .active_frame
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Fail every subsequent call as if the browser went away
    pub fn disconnect(&self) {
        self.state.disconnected.store(true, Ordering::Relaxed);
    }

    fn record(&self, call: DriverCall) -> Result<()> {
        if self.state.disconnected.load(Ordering::Relaxed) {
            return Err(Error::driver("Session is closed"));
        }
        self.state
            .calls
            .lock()
            .map_err(|e| Error::driver(format!("Lock error: {}", e)))?
            .push(call);
        Ok(())
    }

    /// Top of the search tree: the document, or the active frame's children
    fn roots(&self) -> Result<Vec<Arc<MockNode>>> {
        let document = self
            .state
            .document
            .read()
            .map_err(|e| Error::driver(format!("Lock error: {}", e)))?
            .clone();
        match self.active_frame() {
            Some(frame_id) => find_by_id(&document, &frame_id)
                .map(|frame| frame.children())
                .ok_or_else(|| Error::driver(format!("Frame {} is gone", frame_id))),
            None => Ok(document),
        }
    }

    fn search(&self, nodes: &[Arc<MockNode>], locator: &Locator) -> Vec<ElementHandle> {
        let mut matches = Vec::new();
        collect_matches(nodes, locator, &mut matches);
        matches.iter().map(|node| self.element(node)).collect()
    }
}

#[async_trait]
impl SearchContext for MockDriver {
    async fn find_element(&self, by: By, selector: &str) -> Result<ElementHandle> {
        let locator = Locator::new(by, selector);
        self.record(DriverCall::FindElement {
            root: None,
            locator: locator.clone(),
        })?;
        self.search(&self.roots()?, &locator)
            .into_iter()
            .next()
            .ok_or_else(|| Error::no_such_element(locator.to_string()))
    }

    async fn find_elements(&self, by: By, selector: &str) -> Result<Vec<ElementHandle>> {
        let locator = Locator::new(by, selector);
        self.record(DriverCall::FindElements {
            root: None,
            locator: locator.clone(),
        })?;
        Ok(self.search(&self.roots()?, &locator))
    }
}

#[async_trait]
impl WebDriver for MockDriver {
    async fn navigate(&self, uri: &str) -> Result<()> {
        self.record(DriverCall::Navigate(uri.to_string()))
    }

    async fn switch_to_frame(&self, frame: &dyn WebElement) -> Result<()> {
        self.record(DriverCall::SwitchToFrame(frame.id().to_string()))?;
        *self
            .state
            .active_frame
            .lock()
            .map_err(|e| Error::driver(format!("Lock error: {}", e)))? = Some(frame.id().to_string());
        Ok(())
    }

    async fn switch_to_default_content(&self) -> Result<()> {
        self.record(DriverCall::SwitchToDefaultContent)?;
        *self
            .state
            .active_frame
            .lock()
            .map_err(|e| Error::driver(format!("Lock error: {}", e)))? = None;
        Ok(())
    }

    fn root_uri(&self) -> Option<String> {
        self.state.root_uri.clone()
    }
}

/// Mock element reference
#[derive(Debug)]
pub struct MockElement {
    node: Arc<MockNode>,
    driver: MockDriver,
}

impl MockElement {
    fn ensure_attached(&self) -> Result<()> {
        if self.node.attached.load(Ordering::Relaxed) {
            Ok(())
        } else {
            Err(Error::stale_element(&self.node.id))
        }
    }
}

#[async_trait]
impl SearchContext for MockElement {
    async fn find_element(&self, by: By, selector: &str) -> Result<ElementHandle> {
        let locator = Locator::new(by, selector);
        self.driver.record(DriverCall::FindElement {
            root: Some(self.node.id.clone()),
            locator: locator.clone(),
        })?;
        self.ensure_attached()?;
        self.driver
            .search(&self.node.children(), &locator)
            .into_iter()
            .next()
            .ok_or_else(|| Error::no_such_element(locator.to_string()))
    }

    async fn find_elements(&self, by: By, selector: &str) -> Result<Vec<ElementHandle>> {
        let locator = Locator::new(by, selector);
        self.driver.record(DriverCall::FindElements {
            root: Some(self.node.id.clone()),
            locator: locator.clone(),
        })?;
        self.ensure_attached()?;
        Ok(self.driver.search(&self.node.children(), &locator))
    }
}

#[async_trait]
impl WebElement for MockElement {
    fn id(&self) -> &str {
        &self.node.id
    }

    fn driver(&self) -> Arc<dyn WebDriver> {
        Arc::new(self.driver.clone())
    }

    async fn send_keys(&self, value: &str) -> Result<()> {
        self.driver.record(DriverCall::SendKeys {
            element: self.node.id.clone(),
            value: value.to_string(),
        })?;
        self.ensure_attached()?;
        self.node
            .keys
            .lock()
            .map_err(|e| Error::driver(format!("Lock error: {}", e)))?
            .push(value.to_string());
        Ok(())
    }

    async fn text(&self) -> Result<String> {
        self.ensure_attached()?;
        Ok(self.node.text.clone())
    }

    async fn is_displayed(&self) -> Result<bool> {
        self.ensure_attached()?;
        Ok(self.node.displayed.load(Ordering::Relaxed))
    }

    async fn is_enabled(&self) -> Result<bool> {
        self.ensure_attached()?;
        Ok(self.node.enabled.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_driver_find() {
        let driver = MockDriver::new();
        let first = driver.insert(MockNode::new("tr"));
        let second = driver.insert(MockNode::new("tr"));

        let rows = driver.find_elements(By::TagName, "tr").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id(), first.id());
        assert_eq!(rows[1].id(), second.id());

        let err = driver.find_element(By::Css, "div.missing").await.unwrap_err();
        assert!(err.is_no_such_element());
    }

    #[tokio::test]
    async fn test_mock_element_scoped_search() {
        let driver = MockDriver::new();
        let table = driver.insert(
            MockNode::new("table").with_child(MockNode::new("tr").matching(By::Name, "row")),
        );
        driver.insert(MockNode::new("tr").matching(By::Name, "row"));

        let table = driver.element(&table);
        let rows = table.find_elements(By::Name, "row").await.unwrap();
        assert_eq!(rows.len(), 1);

        let calls = driver.calls();
        assert!(matches!(
            &calls[0],
            DriverCall::FindElements { root: Some(id), .. } if id == table.id()
        ));
    }

    #[tokio::test]
    async fn test_mock_frame_scoping() {
        let driver = MockDriver::new();
        let frame = driver.insert(
            MockNode::new("iframe").with_child(MockNode::new("input").matching(By::Id, "inner")),
        );
        driver.insert(MockNode::new("input").matching(By::Id, "outer"));
        assert!(driver.find_element(By::Id, "inner").await.is_err());

        let frame = driver.element(&frame);
        driver.switch_to_frame(frame.as_ref()).await.unwrap();
        assert_eq!(driver.active_frame().as_deref(), Some(frame.id()));
        assert!(driver.find_element(By::Id, "inner").await.is_ok());
        assert!(driver.find_element(By::Id, "outer").await.is_err());

        driver.switch_to_default_content().await.unwrap();
        assert!(driver.active_frame().is_none());
        assert!(driver.find_element(By::Id, "outer").await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_stale_and_disconnect() {
        let driver = MockDriver::new();
        let node = driver.insert(MockNode::new("input"));
        let element = driver.element(&node);

        driver.remove(node.id());
        let err = element.send_keys("x").await.unwrap_err();
        assert!(matches!(err, Error::StaleElement(_)));

        driver.disconnect();
        let err = driver.navigate("http://x/").await.unwrap_err();
        assert!(matches!(err, Error::Driver(_)));
    }
}
