//! 章节表单服务 - 业务能力层
//!
//! 只负责"打开 / 填写 / 提交新章节表单"的能力，不关心章节顺序和等待

use std::time::Duration;

use tracing::debug;

use crate::config::{Config, FormSelectors};
use crate::error::{DriverError, DriverResult};
use crate::infrastructure::FormDriver;

pub struct ChapterForm<'a> {
    base_url: &'a str,
    selectors: &'a FormSelectors,
    element_timeout: Duration,
    submit_timeout: Duration,
}

impl<'a> ChapterForm<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            base_url: config.base_url(),
            selectors: &config.selectors,
            element_timeout: config.element_timeout(),
            submit_timeout: config.submit_timeout(),
        }
    }

    /// 作品的"添加章节"页面
    pub fn new_chapter_url(&self, work_id: u64) -> String {
        format!("{}/works/{}/chapters/new", self.base_url, work_id)
    }

    /// 打开添加章节页面并等待正文输入框出现
    pub async fn navigate<D: FormDriver>(&self, driver: &D, work_id: u64) -> DriverResult<()> {
        let url = self.new_chapter_url(work_id);
        debug!("导航到: {}", url);
        driver.open(&url).await?;
        driver
            .wait_for(&self.selectors.chapter_content, self.element_timeout)
            .await?;
        Ok(())
    }

    /// 填写标题和正文，不提交
    pub async fn fill<D: FormDriver>(&self, driver: &D, title: &str, body: &str) -> DriverResult<()> {
        let title_field = driver.find_field(&self.selectors.chapter_title).await?;
        driver.set_text(&title_field, title).await?;

        let content_field = driver.find_field(&self.selectors.chapter_content).await?;
        driver.set_text(&content_field, body).await?;
        Ok(())
    }

    /// 点击发布并等待发布结果
    ///
    /// 结果页面没有出现章节内容时：页面上有错误提示视为被拒绝，否则为超时
    pub async fn submit<D: FormDriver>(&self, driver: &D) -> DriverResult<()> {
        let post_button = driver.find_field(&self.selectors.post_button).await?;
        driver.click(&post_button).await?;
        driver.wait_until_loaded().await?;

        match driver
            .wait_for(&self.selectors.posted_marker, self.submit_timeout)
            .await
        {
            Ok(_) => Ok(()),
            Err(err) => {
                if driver.find_field(&self.selectors.error_notice).await.is_ok() {
                    Err(DriverError::Rejected(format!(
                        "页面出现错误提示 {}",
                        self.selectors.error_notice
                    )))
                } else {
                    Err(err)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_chapter_url_ignores_trailing_slash() {
        let config = Config {
            base_url: "http://localhost:8080/".to_string(),
            ..Config::default()
        };
        let form = ChapterForm::new(&config);
        assert_eq!(form.new_chapter_url(42), "http://localhost:8080/works/42/chapters/new");
    }
}
