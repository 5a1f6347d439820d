//! 基础设施层（Infrastructure Layer）
//!
//! 持有稀缺资源（浏览器页面），只向上暴露 [`FormSession`] 能力。

pub mod form_session;
pub mod js_executor;
pub mod page_session;
pub mod poll;

pub use form_session::{Condition, ElementRef, FormSession, Locator, Outcome};
pub use js_executor::JsExecutor;
pub use page_session::PageSession;
