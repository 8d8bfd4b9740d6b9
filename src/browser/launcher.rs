use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info};

use crate::config::BrowserSettings;
use crate::error::AutomationError;

/// 启动浏览器并打开一个空白页面
///
/// `headless` 只决定窗口是否可见，不影响后续流程
pub async fn launch_browser(
    settings: &BrowserSettings,
    headless: bool,
) -> Result<(Browser, Page), AutomationError> {
    info!(
        "🚀 启动浏览器 ({})...",
        if headless { "无头模式" } else { "可见窗口" }
    );

    let mut builder = BrowserConfig::builder()
        .window_size(settings.window_width, settings.window_height)
        .args(vec!["--disable-gpu", "--disable-dev-shm-usage"]);
    builder = if headless {
        builder.new_headless_mode()
    } else {
        builder.with_head()
    };
    if let Some(executable) = &settings.chrome_executable {
        debug!("浏览器路径: {}", executable.display());
        builder = builder.chrome_executable(executable);
    }

    let config = builder.build().map_err(|e| {
        error!("配置浏览器失败: {}", e);
        AutomationError::Launch(e)
    })?;

    let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
        error!("启动浏览器失败: {}", e);
        AutomationError::Launch(e.to_string())
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

    // 等待浏览器状态同步
    sleep(Duration::from_millis(300)).await;

    let page = browser.new_page("about:blank").await.map_err(|e| {
        error!("创建页面失败: {}", e);
        AutomationError::Launch(e.to_string())
    })?;

    Ok((browser, page))
}
