use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info};

use crate::error::{AutomationError, DriverError};

/// 连接到已经运行的浏览器（需以 `--remote-debugging-port` 启动）
///
/// 优先复用已打开的第一个页面，没有页面时新建空白页
pub async fn connect_to_browser(port: u16) -> Result<(Browser, Page), AutomationError> {
    let browser_url = format!("http://localhost:{}", port);
    info!("🔌 正在连接到浏览器: {}", browser_url);

    let connect_failed = |source: DriverError| AutomationError::Connect { port, source };

    let (browser, mut handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("连接浏览器失败: {}", e);
        connect_failed(e.into())
    })?;
    debug!("浏览器连接成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(Duration::from_millis(300)).await;

    let pages = browser.pages().await.map_err(|e| connect_failed(e.into()))?;
    debug!("获取到 {} 个页面", pages.len());

    let page = match pages.into_iter().next() {
        Some(page) => page,
        None => {
            debug!("没有可用页面，创建空白页面");
            browser.new_page("about:blank").await.map_err(|e| {
                error!("创建空白页面失败: {}", e);
                connect_failed(e.into())
            })?
        }
    };

    Ok((browser, page))
}
