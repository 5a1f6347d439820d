use std::path::Path;

use anyhow::{Context, Result};
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

/// 启动浏览器并导航到指定 URL
pub async fn launch_browser(
    url: &str,
    headless: bool,
    executable: Option<&Path>,
) -> Result<(Browser, Page)> {
    info!("🚀 启动浏览器 (无头模式: {})...", headless);

    let mut builder = BrowserConfig::builder();
    builder = if headless {
        builder.new_headless_mode()
    } else {
        builder.with_head()
    };
    if let Some(path) = executable {
        debug!("浏览器路径: {}", path.display());
        builder = builder.chrome_executable(path);
    }

    let config = builder
        .args(vec!["--disable-gpu", "--no-sandbox", "--disable-dev-shm-usage"])
        .build()
        .map_err(|e| {
            error!("配置浏览器失败: {}", e);
            anyhow::anyhow!("配置浏览器失败: {}", e)
        })?;

    let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
        error!("启动浏览器失败: {}", e);
        anyhow::anyhow!("启动浏览器失败: {}", e)
    })?;
    debug!("浏览器启动成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = browser
        .new_page(url)
        .await
        .with_context(|| format!("无法打开页面: {}", url))?;
    info!("✅ 浏览器已导航到: {}", url);

    Ok((browser, page))
}
