//! 登录服务 - 业务能力层
//!
//! 在处理任何章节之前，通过站点登录表单建立会话

use std::time::Duration;

use tracing::{info, warn};

use crate::config::{Config, Credentials, FormSelectors};
use crate::error::AutomationError;
use crate::infrastructure::FormDriver;

pub struct SessionService<'a> {
    base_url: &'a str,
    selectors: &'a FormSelectors,
    timeout: Duration,
}

impl<'a> SessionService<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            base_url: config.base_url(),
            selectors: &config.selectors,
            timeout: config.element_timeout(),
        }
    }

    pub fn login_url(&self) -> String {
        format!("{}/users/login", self.base_url)
    }

    /// 登录；页面上已有登录标记时直接返回
    pub async fn login<D: FormDriver>(
        &self,
        driver: &D,
        credentials: &Credentials,
    ) -> Result<(), AutomationError> {
        let url = self.login_url();
        info!("🔑 正在打开登录页面: {}", url);
        driver
            .open(&url)
            .await
            .map_err(|e| AutomationError::login("无法打开登录页面", Some(e)))?;

        if driver.find_field(&self.selectors.logged_in_marker).await.is_ok() {
            info!("✓ 已处于登录状态，跳过登录");
            return Ok(());
        }

        let user_field = driver
            .wait_for(&self.selectors.login_username, self.timeout)
            .await
            .map_err(|e| AutomationError::login("登录表单未出现", Some(e)))?;
        driver
            .set_text(&user_field, &credentials.username)
            .await
            .map_err(|e| AutomationError::login("无法填写用户名", Some(e)))?;

        let pass_field = driver
            .find_field(&self.selectors.login_password)
            .await
            .map_err(|e| AutomationError::login("找不到密码输入框", Some(e)))?;
        driver
            .set_text(&pass_field, &credentials.password)
            .await
            .map_err(|e| AutomationError::login("无法填写密码", Some(e)))?;

        let submit = driver
            .find_field(&self.selectors.login_submit)
            .await
            .map_err(|e| AutomationError::login("找不到登录按钮", Some(e)))?;
        driver
            .click(&submit)
            .await
            .map_err(|e| AutomationError::login("无法点击登录按钮", Some(e)))?;
        driver
            .wait_until_loaded()
            .await
            .map_err(|e| AutomationError::login("登录后页面加载失败", Some(e)))?;

        match driver
            .wait_for(&self.selectors.logged_in_marker, self.timeout)
            .await
        {
            Ok(_) => {
                info!("✓ 登录成功: {}", credentials.username);
                Ok(())
            }
            Err(e) => {
                let source = driver.page_source().await.unwrap_or_default();
                let failed_text = self.selectors.login_failed_text.to_lowercase();
                if !failed_text.is_empty() && source.to_lowercase().contains(&failed_text) {
                    Err(AutomationError::login("用户名或密码错误", None))
                } else {
                    warn!("登录后未找到登录标记: {}", self.selectors.logged_in_marker);
                    Err(AutomationError::login("登录后页面状态异常", Some(e)))
                }
            }
        }
    }
}
