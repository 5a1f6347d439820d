//! 基于 chromiumoxide 页面的表单会话
//!
//! 所有 DOM 操作都通过 [`JsExecutor`] 在页面里执行脚本完成

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chromiumoxide::Browser;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::infrastructure::form_session::{Condition, ElementRef, FormSession, Locator, Outcome};
use crate::infrastructure::js_executor::{js_string, lookup_expr, JsExecutor};
use crate::infrastructure::poll::poll_until;

/// 点击脚本的返回
#[derive(Debug, Deserialize)]
struct ClickReply {
    ok: bool,
    reason: String,
}

/// 读取文本脚本的返回
#[derive(Debug, Deserialize)]
struct TextReply {
    found: bool,
    text: String,
}

/// 浏览器页面会话
pub struct PageSession {
    executor: JsExecutor,
    browser: Browser,
    /// 浏览器由本程序启动时，关闭会话会一并退出浏览器；否则只关闭标签页
    owns_browser: bool,
    input: Locator,
    poll_interval: Duration,
}

impl PageSession {
    pub fn new(
        executor: JsExecutor,
        browser: Browser,
        owns_browser: bool,
        input: Locator,
        poll_interval: Duration,
    ) -> Self {
        Self {
            executor,
            browser,
            owns_browser,
            input,
            poll_interval,
        }
    }
}

#[async_trait]
impl FormSession for PageSession {
    async fn clear_input(&mut self) -> Result<()> {
        debug!("清空输入框 {}", self.input);
        write_input(&self.executor, &self.input, "").await
    }

    async fn set_input_value(&mut self, text: &str) -> Result<()> {
        debug!("写入输入框 {} ({} 个字符)", self.input, text.chars().count());
        write_input(&self.executor, &self.input, text).await
    }

    async fn wait_until(
        &mut self,
        condition: &Condition,
        timeout: Duration,
    ) -> Result<Outcome<ElementRef>> {
        let (executor, input) = (&self.executor, &self.input);
        poll_until(timeout, self.poll_interval, move || {
            probe(executor, input, condition)
        })
        .await
    }

    async fn find_clickable(
        &mut self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Outcome<ElementRef>> {
        let executor = &self.executor;
        poll_until(timeout, self.poll_interval, move || {
            probe_clickable(executor, locator)
        })
        .await
    }

    async fn click(&mut self, element: &ElementRef) -> Result<Outcome<()>> {
        let reply: ClickReply = self.executor.eval_as(click_script(&element.locator)).await?;
        if reply.ok {
            Ok(Outcome::Ready(()))
        } else {
            Ok(Outcome::InteractionError(reply.reason))
        }
    }

    async fn read_text(&mut self, element: &ElementRef) -> Result<Option<String>> {
        let reply: TextReply = self
            .executor
            .eval_as(read_text_script(&element.locator))
            .await?;
        Ok(reply.found.then_some(reply.text))
    }

    async fn close(&mut self) -> Result<()> {
        if self.owns_browser {
            info!("🛑 关闭浏览器...");
            self.browser.close().await?;
            if let Err(e) = self.browser.wait().await {
                warn!("等待浏览器进程退出失败: {}", e);
            }
        } else {
            info!("🛑 关闭页面...");
            self.executor.page().clone().close().await?;
        }
        Ok(())
    }
}

/// 点击脚本：页面抛出的异常也作为交互失败返回，不中断会话
fn click_script(locator: &Locator) -> String {
    format!(
        r#"
        (() => {{
            const el = {};
            if (el === null) {{
                return {{ ok: false, reason: 'stale element reference: element is no longer attached to the DOM' }};
            }}
            if (el.disabled) {{
                return {{ ok: false, reason: 'element not interactable: control is disabled' }};
            }}
            try {{
                el.scrollIntoView({{ block: 'center' }});
                el.click();
            }} catch (e) {{
                return {{ ok: false, reason: String(e) }};
            }}
            return {{ ok: true, reason: '' }};
        }})()
        "#,
        lookup_expr(locator)
    )
}

/// 读取文本脚本：读取时抛出异常视为元素已失效
fn read_text_script(locator: &Locator) -> String {
    format!(
        r#"
        (() => {{
            try {{
                const el = {};
                return el === null
                    ? {{ found: false, text: '' }}
                    : {{ found: true, text: String(el.innerText) }};
            }} catch (e) {{
                return {{ found: false, text: '' }};
            }}
        }})()
        "#,
        lookup_expr(locator)
    )
}

/// 单次探测：条件成立时返回对应元素
async fn probe(
    executor: &JsExecutor,
    input: &Locator,
    condition: &Condition,
) -> Result<Option<ElementRef>> {
    let (locator, js_code) = match condition {
        Condition::InputPresent => (input.clone(), present_expr(input)),
        Condition::InputValueEquals(expected) => (
            input.clone(),
            format!(
                "(() => {{ const el = {}; return el !== null && el.value === {}; }})()",
                lookup_expr(input),
                js_string(expected)
            ),
        ),
        Condition::Present(locator) => (locator.clone(), present_expr(locator)),
        Condition::TextChanged { locator, previous } => (
            locator.clone(),
            format!(
                "(() => {{ const el = {}; return el !== null && el.innerText !== {}; }})()",
                lookup_expr(locator),
                js_string(previous)
            ),
        ),
    };

    let satisfied: bool = executor.eval_as(js_code).await?;
    Ok(satisfied.then(|| ElementRef::new(locator)))
}

fn present_expr(locator: &Locator) -> String {
    format!("{} !== null", lookup_expr(locator))
}

/// 单次探测：元素存在、可见且未禁用
async fn probe_clickable(executor: &JsExecutor, locator: &Locator) -> Result<Option<ElementRef>> {
    let js_code = format!(
        r#"
        (() => {{
            const el = {};
            if (el === null) return false;
            const rect = el.getBoundingClientRect();
            const style = window.getComputedStyle(el);
            return !el.disabled
                && rect.width > 0 && rect.height > 0
                && style.visibility !== 'hidden'
                && style.pointerEvents !== 'none';
        }})()
        "#,
        lookup_expr(locator)
    );

    let clickable: bool = executor.eval_as(js_code).await?;
    Ok(clickable.then(|| ElementRef::new(locator.clone())))
}

/// 写入输入框并触发 input / change 事件，让前端框架感知到变化
async fn write_input(executor: &JsExecutor, input: &Locator, text: &str) -> Result<()> {
    let js_code = format!(
        r#"
        (() => {{
            const el = {};
            if (el === null) return false;
            el.focus();
            el.value = {};
            el.dispatchEvent(new Event('input', {{ bubbles: true }}));
            el.dispatchEvent(new Event('change', {{ bubbles: true }}));
            return true;
        }})()
        "#,
        lookup_expr(input),
        js_string(text)
    );

    let written: bool = executor.eval_as(js_code).await?;
    if !written {
        anyhow::bail!("输入框 {} 已不存在", input);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_script_catches_page_exceptions() {
        let script = click_script(&Locator::button_containing("Predict"));
        let guarded = script.find("try {").unwrap();
        let clicked = script.find("el.click();").unwrap();
        let caught = script.find("catch (e)").unwrap();
        assert!(guarded < clicked && clicked < caught);
        assert!(script.contains("reason: String(e)"));
        assert!(script.contains("//button[contains(., 'Predict')]"));
    }

    #[test]
    fn test_read_text_script_never_throws() {
        let script = read_text_script(&Locator::Id("result".to_string()));
        assert!(script.contains("document.getElementById(\"result\")"));
        assert!(script.contains("catch (e)"));
        assert!(script.contains("found: false"));
    }
}
