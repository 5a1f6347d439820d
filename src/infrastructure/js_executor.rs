//! JS 执行器 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露"在页面里执行脚本"的能力

use anyhow::{Context, Result};
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::infrastructure::form_session::Locator;

/// JS 执行器
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 把定位方式翻译成页面里的查找表达式
/// - 不认识序列 / 预测结果
pub struct JsExecutor {
    page: Page,
}

impl JsExecutor {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 执行一段表达式并反序列化结果
    ///
    /// 表达式不能返回 `null` / `undefined`，需要时请返回对象包装。
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> Result<T> {
        let js_code = js_code.into();
        debug!("执行脚本 ({} 字节)", js_code.len());

        let result = self
            .page
            .evaluate(js_code)
            .await
            .context("页面脚本执行失败")?;
        let value = result.into_value().context("无法解析脚本返回值")?;
        Ok(value)
    }
}

/// 在页面中查找元素的 JS 表达式，结果为元素或 `null`
pub fn lookup_expr(locator: &Locator) -> String {
    match locator {
        Locator::Id(id) => format!("document.getElementById({})", js_string(id)),
        Locator::XPath(xpath) => format!(
            "document.evaluate({}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue",
            js_string(xpath)
        ),
    }
}

/// 把任意文本转成 JS 字符串字面量
pub fn js_string(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_escapes() {
        assert_eq!(js_string("MKV"), "\"MKV\"");
        assert_eq!(js_string("a\"b\n"), "\"a\\\"b\\n\"");
    }

    #[test]
    fn test_lookup_by_id() {
        assert_eq!(
            lookup_expr(&Locator::Id("mat-input-0".to_string())),
            "document.getElementById(\"mat-input-0\")"
        );
    }

    #[test]
    fn test_lookup_by_xpath() {
        let expr = lookup_expr(&Locator::button_containing("Predict"));
        assert!(expr.starts_with("document.evaluate(\"//button[contains(., 'Predict')]\""));
        assert!(expr.ends_with(".singleNodeValue"));
    }
}
