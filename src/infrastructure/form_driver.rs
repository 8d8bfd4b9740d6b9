//! 表单驱动 - 基础设施层
//!
//! 业务层只依赖这组能力，不直接接触浏览器。
//! 所有调用都在同一个任务里顺序执行，因此不要求 `Send`。

use std::time::Duration;

use async_trait::async_trait;

use crate::error::DriverResult;

/// 浏览器表单操作能力
#[async_trait(?Send)]
pub trait FormDriver {
    /// 页面元素句柄
    type Handle;

    /// 打开指定 URL 并等待页面加载
    async fn open(&self, url: &str) -> DriverResult<()>;

    /// 查找当前页面上的元素，找不到时返回 `ElementNotFound`
    async fn find_field(&self, selector: &str) -> DriverResult<Self::Handle>;

    /// 设置输入框内容（不会提交表单）
    async fn set_text(&self, handle: &Self::Handle, value: &str) -> DriverResult<()>;

    async fn click(&self, handle: &Self::Handle) -> DriverResult<()>;

    /// 等待当前导航（如点击提交后）完成
    async fn wait_until_loaded(&self) -> DriverResult<()>;

    /// 轮询直到元素出现，超时返回 `Timeout`
    async fn wait_for(&self, selector: &str, timeout: Duration) -> DriverResult<Self::Handle>;

    /// 当前页面的 HTML
    async fn page_source(&self) -> DriverResult<String>;

    /// 释放浏览器
    async fn close(&mut self) -> DriverResult<()>;

    /// 等待浏览器被用户关闭
    async fn wait_for_exit(&mut self) -> DriverResult<()>;
}
