//! 测试用的表单驱动：记录每次调用，可指定哪些选择器找不到

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ao3_chapter_upload::error::{DriverError, DriverResult};
use ao3_chapter_upload::FormDriver;
use async_trait::async_trait;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Open(String),
    Find(String),
    SetText(String, String),
    Click(String),
    WaitLoaded,
    WaitFor(String),
    Source,
    Close,
    WaitExit,
}

/// 克隆出的驱动共享同一份调用记录
#[derive(Clone, Default)]
pub struct MockDriver {
    calls: Arc<Mutex<Vec<(Instant, Call)>>>,
    missing: HashSet<String>,
    page_source: String,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// 让某个选择器在页面上"不存在"
    pub fn without(mut self, selector: &str) -> Self {
        self.missing.insert(selector.to_string());
        self
    }

    pub fn with_page_source(mut self, source: &str) -> Self {
        self.page_source = source.to_string();
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().iter().map(|(_, c)| c.clone()).collect()
    }

    /// 点击某个选择器的时间点
    pub fn clicks_on(&self, selector: &str) -> Vec<Instant> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, c)| matches!(c, Call::Click(s) if s == selector))
            .map(|(at, _)| *at)
            .collect()
    }

    /// 按顺序返回写入某个选择器的值
    pub fn texts_for(&self, selector: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::SetText(s, v) if s == selector => Some(v),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push((Instant::now(), call));
    }
}

#[async_trait(?Send)]
impl FormDriver for MockDriver {
    type Handle = String;

    async fn open(&self, url: &str) -> DriverResult<()> {
        self.record(Call::Open(url.to_string()));
        Ok(())
    }

    async fn find_field(&self, selector: &str) -> DriverResult<String> {
        self.record(Call::Find(selector.to_string()));
        if self.missing.contains(selector) {
            return Err(DriverError::ElementNotFound {
                selector: selector.to_string(),
            });
        }
        Ok(selector.to_string())
    }

    async fn set_text(&self, handle: &String, value: &str) -> DriverResult<()> {
        self.record(Call::SetText(handle.clone(), value.to_string()));
        Ok(())
    }

    async fn click(&self, handle: &String) -> DriverResult<()> {
        self.record(Call::Click(handle.clone()));
        Ok(())
    }

    async fn wait_until_loaded(&self) -> DriverResult<()> {
        self.record(Call::WaitLoaded);
        Ok(())
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> DriverResult<String> {
        self.record(Call::WaitFor(selector.to_string()));
        if self.missing.contains(selector) {
            return Err(DriverError::Timeout {
                selector: selector.to_string(),
                secs: timeout.as_secs(),
            });
        }
        Ok(selector.to_string())
    }

    async fn page_source(&self) -> DriverResult<String> {
        self.record(Call::Source);
        Ok(self.page_source.clone())
    }

    async fn close(&mut self) -> DriverResult<()> {
        self.record(Call::Close);
        Ok(())
    }

    async fn wait_for_exit(&mut self) -> DriverResult<()> {
        self.record(Call::WaitExit);
        Ok(())
    }
}
