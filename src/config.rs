use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// 两次提交之间的最短间隔（秒），配置只能加长不能缩短
pub const MIN_POST_DELAY_SECS: u64 = 3;

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 站点根地址
    pub base_url: String,
    /// 每次成功提交后的等待时间（秒）
    pub post_delay_secs: u64,
    /// 等待表单元素出现的超时（秒）
    pub element_timeout_secs: u64,
    /// 等待提交结果页面的超时（秒）
    pub submit_timeout_secs: u64,
    /// 发布记录文件，空字符串表示不记录
    pub post_log_file: String,
    pub browser: BrowserSettings,
    pub selectors: FormSelectors,
}

/// 浏览器相关配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// 浏览器可执行文件路径，未设置时由 chromiumoxide 自动查找
    pub chrome_executable: Option<PathBuf>,
    /// 已运行浏览器的调试端口，设置后不再启动新浏览器
    pub debug_port: Option<u16>,
    pub window_width: u32,
    pub window_height: u32,
}

/// 登录表单与章节表单使用的 CSS 选择器
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FormSelectors {
    pub login_username: String,
    pub login_password: String,
    pub login_submit: String,
    /// 登录成功后才会出现的元素
    pub logged_in_marker: String,
    /// 登录失败页面上的提示文字
    pub login_failed_text: String,
    pub chapter_title: String,
    pub chapter_content: String,
    pub post_button: String,
    /// 章节发布成功后页面上的元素
    pub posted_marker: String,
    /// 提交被拒绝时页面上的错误提示
    pub error_notice: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://archiveofourown.org".to_string(),
            post_delay_secs: MIN_POST_DELAY_SECS,
            element_timeout_secs: 15,
            submit_timeout_secs: 20,
            post_log_file: "upload_log.txt".to_string(),
            browser: BrowserSettings::default(),
            selectors: FormSelectors::default(),
        }
    }
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            chrome_executable: None,
            debug_port: None,
            window_width: 1920,
            window_height: 1080,
        }
    }
}

impl Default for FormSelectors {
    fn default() -> Self {
        Self {
            login_username: "#user_login".to_string(),
            login_password: "#user_password".to_string(),
            login_submit: "[name='commit']".to_string(),
            logged_in_marker: "ul.user.navigation".to_string(),
            login_failed_text: "Invalid username or password".to_string(),
            chapter_title: "#chapter_title".to_string(),
            chapter_content: "#chapter_content".to_string(),
            post_button: "input[name='commit'][value='Post']".to_string(),
            posted_marker: "div.chapter".to_string(),
            error_notice: "#error".to_string(),
        }
    }
}

impl Config {
    /// 加载配置：默认值 → TOML 文件 → 环境变量
    ///
    /// `path` 未给出时读取 `AO3_CONFIG` 指定的文件（若有）
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// 同 [`Config::load`]，但通过 `lookup` 读取环境变量
    pub fn load_with(
        path: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let file = path
            .map(Path::to_path_buf)
            .or_else(|| lookup("AO3_CONFIG").map(PathBuf::from));

        let config = match file {
            Some(file) => Self::from_toml_file(&file)?,
            None => Self::default(),
        };

        config.with_env_overrides(lookup)
    }

    /// 从 TOML 文件读取配置，缺失的字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    fn with_env_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(v) = lookup("AO3_BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = parse_var(&lookup, "AO3_POST_DELAY_SECS", "u64")? {
            self.post_delay_secs = v;
        }
        if let Some(v) = parse_var(&lookup, "AO3_ELEMENT_TIMEOUT_SECS", "u64")? {
            self.element_timeout_secs = v;
        }
        if let Some(v) = parse_var(&lookup, "AO3_SUBMIT_TIMEOUT_SECS", "u64")? {
            self.submit_timeout_secs = v;
        }
        if let Some(v) = lookup("POST_LOG_FILE") {
            self.post_log_file = v;
        }
        if let Some(v) = lookup("CHROME_EXECUTABLE") {
            self.browser.chrome_executable = Some(PathBuf::from(v));
        }
        if let Some(v) = parse_var(&lookup, "BROWSER_DEBUG_PORT", "u16")? {
            self.browser.debug_port = Some(v);
        }
        Ok(self)
    }

    /// 站点根地址（去掉末尾的 `/`）
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// 提交后的等待时间，不低于 [`MIN_POST_DELAY_SECS`]
    pub fn post_delay(&self) -> Duration {
        Duration::from_secs(self.post_delay_secs.max(MIN_POST_DELAY_SECS))
    }

    pub fn element_timeout(&self) -> Duration {
        Duration::from_secs(self.element_timeout_secs)
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.submit_timeout_secs)
    }

    /// 发布记录文件路径，未配置时返回 `None`
    pub fn post_log_path(&self) -> Option<&Path> {
        let trimmed = self.post_log_file.trim();
        (!trimmed.is_empty()).then(|| Path::new(trimmed))
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var_name: &str,
    expected_type: &str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var_name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
    }
}

/// 站点账号，只从环境变量（或 `.env`）读取
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let require = |var_name: &str| {
            lookup(var_name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ConfigError::EnvVarNotFound {
                    var_name: var_name.to_string(),
                })
        };

        Ok(Self {
            username: require("AO3_USERNAME")?,
            password: require("AO3_PASSWORD")?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_target_ao3_with_three_second_delay() {
        let config = Config::load_with(None, lookup_from(&[])).unwrap();
        assert_eq!(config.base_url(), "https://archiveofourown.org");
        assert_eq!(config.post_delay(), Duration::from_secs(3));
        assert_eq!(config.selectors.chapter_content, "#chapter_content");
        assert_eq!(config.post_log_path(), Some(Path::new("upload_log.txt")));
    }

    #[test]
    fn post_delay_cannot_go_below_floor() {
        let config = Config::load_with(None, lookup_from(&[("AO3_POST_DELAY_SECS", "1")])).unwrap();
        assert_eq!(config.post_delay(), Duration::from_secs(3));

        let config = Config::load_with(None, lookup_from(&[("AO3_POST_DELAY_SECS", "10")])).unwrap();
        assert_eq!(config.post_delay(), Duration::from_secs(10));
    }

    #[test]
    fn toml_file_overrides_defaults_and_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uploader.toml");
        std::fs::write(
            &path,
            r##"
base_url = "http://localhost:3000/"
submit_timeout_secs = 60

[browser]
window_width = 800

[selectors]
post_button = "#post"
"##,
        )
        .unwrap();

        let config =
            Config::load_with(Some(&path), lookup_from(&[("BROWSER_DEBUG_PORT", "9222")])).unwrap();
        assert_eq!(config.base_url(), "http://localhost:3000");
        assert_eq!(config.submit_timeout(), Duration::from_secs(60));
        assert_eq!(config.element_timeout(), Duration::from_secs(15));
        assert_eq!(config.browser.window_width, 800);
        assert_eq!(config.browser.window_height, 1080);
        assert_eq!(config.browser.debug_port, Some(9222));
        assert_eq!(config.selectors.post_button, "#post");
        assert_eq!(config.selectors.chapter_title, "#chapter_title");
    }

    #[test]
    fn bad_env_value_is_reported() {
        let err = Config::load_with(None, lookup_from(&[("BROWSER_DEBUG_PORT", "abc")])).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarParseFailed { ref var_name, .. } if var_name == "BROWSER_DEBUG_PORT"));
    }

    #[test]
    fn empty_post_log_file_disables_journal() {
        let config = Config::load_with(None, lookup_from(&[("POST_LOG_FILE", "")])).unwrap();
        assert_eq!(config.post_log_path(), None);
    }

    #[test]
    fn missing_credentials_are_config_errors() {
        let err = Credentials::from_lookup(lookup_from(&[("AO3_USERNAME", "writer")])).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarNotFound { ref var_name } if var_name == "AO3_PASSWORD"));

        let err = Credentials::from_lookup(lookup_from(&[("AO3_USERNAME", " "), ("AO3_PASSWORD", "x")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarNotFound { ref var_name } if var_name == "AO3_USERNAME"));
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds =
            Credentials::from_lookup(lookup_from(&[("AO3_USERNAME", "writer"), ("AO3_PASSWORD", "hunter2")]))
                .unwrap();
        let shown = format!("{:?}", creds);
        assert!(shown.contains("writer"));
        assert!(!shown.contains("hunter2"));
    }
}
