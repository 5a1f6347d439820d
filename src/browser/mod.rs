pub mod connection;
pub mod launch;

pub use connection::connect_to_browser_and_page;
pub use launch::launch_browser;

use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::infrastructure::{JsExecutor, Locator, PageSession};

/// 按配置打开浏览器并创建表单会话
///
/// 配置了调试端口时连接已有浏览器，关闭会话时只关闭标签页；
/// 否则启动新浏览器，关闭时一并退出。
pub async fn open_session(config: &Config) -> Result<PageSession> {
    let (browser, page, owned) = match config.browser_debug_port {
        Some(port) => {
            let (browser, page) = connect_to_browser_and_page(port, &config.target_url).await?;
            (browser, page, false)
        }
        None => {
            let (browser, page) = launch_browser(
                &config.target_url,
                config.headless,
                config.chrome_executable.as_deref(),
            )
            .await?;
            (browser, page, true)
        }
    };
    info!("✓ 会话已就绪");

    Ok(PageSession::new(
        JsExecutor::new(page),
        browser,
        owned,
        Locator::Id(config.input_element_id.clone()),
        config.poll_interval(),
    ))
}
