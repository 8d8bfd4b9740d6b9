//! Chrome 表单驱动 - 基础设施层
//!
//! 持有唯一的 Browser / Page 资源，只暴露 [`FormDriver`] 能力

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::element::Element;
use chromiumoxide::{Browser, Page};
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::error::{DriverError, DriverResult};
use crate::infrastructure::FormDriver;

/// 轮询元素的间隔
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Chrome 页面元素句柄
pub struct FieldHandle {
    selector: String,
    element: Element,
}

/// 基于 chromiumoxide 的表单驱动
///
/// 职责：
/// - 持有唯一的 Browser 和 Page
/// - 不认识 Chapter / 作品
/// - 不处理业务流程
pub struct ChromeDriver {
    browser: Browser,
    page: Page,
}

impl ChromeDriver {
    pub fn new(browser: Browser, page: Page) -> Self {
        Self { browser, page }
    }

    /// 获取 page 的引用
    pub fn page(&self) -> &Page {
        &self.page
    }
}

#[async_trait(?Send)]
impl FormDriver for ChromeDriver {
    type Handle = FieldHandle;

    async fn open(&self, url: &str) -> DriverResult<()> {
        debug!("打开页面: {}", url);
        self.page.goto(url).await?;
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    async fn find_field(&self, selector: &str) -> DriverResult<FieldHandle> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| DriverError::ElementNotFound {
                selector: selector.to_string(),
            })?;
        Ok(FieldHandle {
            selector: selector.to_string(),
            element,
        })
    }

    async fn set_text(&self, handle: &FieldHandle, value: &str) -> DriverResult<()> {
        debug!("填写 {} ({} 字符)", handle.selector, value.chars().count());

        // 正文可能很长，直接写 value 而不是逐字输入
        let js_code = format!(
            r#"
            (() => {{
                const el = document.querySelector({});
                if (!el) {{
                    return false;
                }}
                el.focus();
                el.value = {};
                el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})()
            "#,
            serde_json::to_string(&handle.selector)?,
            serde_json::to_string(value)?
        );

        let found: bool = self.page.evaluate(js_code).await?.into_value()?;
        if found {
            Ok(())
        } else {
            Err(DriverError::ElementNotFound {
                selector: handle.selector.clone(),
            })
        }
    }

    async fn click(&self, handle: &FieldHandle) -> DriverResult<()> {
        debug!("点击 {}", handle.selector);
        handle.element.click().await?;
        Ok(())
    }

    async fn wait_until_loaded(&self) -> DriverResult<()> {
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> DriverResult<FieldHandle> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(handle) = self.find_field(selector).await {
                return Ok(handle);
            }
            if Instant::now() >= deadline {
                return Err(DriverError::Timeout {
                    selector: selector.to_string(),
                    secs: timeout.as_secs(),
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    async fn page_source(&self) -> DriverResult<String> {
        Ok(self.page.content().await?)
    }

    async fn close(&mut self) -> DriverResult<()> {
        self.browser.close().await?;
        self.browser.wait().await?;
        Ok(())
    }

    async fn wait_for_exit(&mut self) -> DriverResult<()> {
        self.browser.wait().await?;
        Ok(())
    }
}
