//! # 浏览器驱动接口
//!
//! 定义页面对象层对外部浏览器驱动的依赖契约。驱动本身（WebDriver、CDP 等）不在本 crate 中实现，
//! 由调用方提供实现了这些 trait 的会话对象。
//!
//! ## 主要功能
//! - **元素查找**: 在整个页面或某个元素子树中按定位器查找元素
//! - **页面导航**: 加载指定 URI
//! - **框架切换**: 切换到 iframe 或返回顶层浏览上下文
//! - **元素交互**: 输入文本、读取文本与可见/可用状态
//!
//! ## 核心概念
//! - **WebDriver**: 驱动会话，对应一个浏览器标签页/窗口的串行通道
//! - **WebElement**: 元素引用，持有所属驱动会话的反向引用
//! - **SearchRoot**: 一次查找的根（整个页面或某个元素）
//!
//! ## 模块结构
//! - `traits`: 驱动契约的 trait 定义
//! - `mock`: 用于测试的内存驱动实现
//!
//! ## 使用示例
//! ```rust,no_run
//! use page_objects::driver::{SearchContext, WebElement, mock::{MockDriver, MockNode}};
//! use page_objects::By;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let driver = MockDriver::new();
//! driver.insert(MockNode::new("input").matching(By::Name, "q"));
//!
//! let input = driver.find_element(By::Name, "q").await?;
//! input.send_keys("rust").await?;
//! # Ok(())
//! # }
//! ```

pub mod traits;
pub mod mock;

#[cfg(test)]
pub mod tests;

pub use traits::{ElementHandle, SearchContext, SearchRoot, WebDriver, WebElement};

// Re-export mock implementations for testing
pub use mock::{DriverCall, MockDriver, MockElement, MockNode};
