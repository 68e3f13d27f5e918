//! # 元素绑定
//!
//! 页面对象的核心：把页面模型上的具名属性声明为“定位器 + 选项”，每次读取时都重新向驱动查询当前 DOM。
//!
//! ## 主要功能
//! - **单元素绑定**: `PageElement`，返回第一个匹配元素或 `None`
//! - **多元素绑定**: `MultiPageElement`，返回全部匹配元素（可能为空）
//! - **上下文查找**: 声明 `context(true)` 的绑定在读取时返回待定查找，需由调用方提供根元素
//! - **等待查找**: 配置等待条件后，在 `wait_time` 内轮询，超时返回空结果而不是错误
//! - **值注入**: `set` 先解析元素，再把值作为按键输入发送给元素
//!
//! ## 声明校验
//! 构造时必须且只能指定一个定位器，否则立即返回配置错误；校验只在声明时进行一次。
//!
//! ## 模块结构
//! - `binding`: 共享声明、构建器、读取结果类型
//! - `single`: 单元素绑定
//! - `multi`: 多元素绑定
//!
//! ## 使用示例
//! ```rust,no_run
//! use page_objects::{Expected, MultiPageElement, PageElement, PageObject, Result};
//! use std::time::Duration;
//!
//! # async fn example(page: &PageObject) -> Result<()> {
//! let rows = MultiPageElement::builder().tag_name("tr").build()?;
//! let cell = PageElement::builder().class_name("price").context(true).build()?;
//! let toast = PageElement::builder()
//!     .css("div.toast")
//!     .wait_condition(Expected::Visibility)
//!     .wait_time(Duration::from_secs(2))
//!     .build()?;
//!
//! for row in rows.get(page).await?.ready().unwrap_or_default() {
//!     if let Some(pending) = cell.get(page).await?.deferred() {
//!         let price = pending.within(row.as_ref()).await?;
//!         println!("{:?}", price.map(|p| p.id().to_string()));
//!     }
//! }
//!
//! let _ = toast.get(page).await?;
//! # Ok(())
//! # }
//! ```

pub mod binding;
pub mod single;
pub mod multi;


pub use binding::{Binding, BindingBuilder, ContextLookup, ElementBinding, Lookup};
pub use single::PageElement;
pub use multi::MultiPageElement;
