use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// 应用程序错误类型
///
/// 所有错误在发生处即视为致命错误，不做重试或跳过
#[derive(Debug, Error)]
pub enum AppError {
    /// 导出文件解析错误
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// 配置错误
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// 浏览器自动化错误
    #[error(transparent)]
    Automation(#[from] AutomationError),
}

/// 导出文件解析错误
#[derive(Debug, Error)]
pub enum ParseError {
    /// 文件不存在
    #[error("文件不存在: {}", .path.display())]
    NotFound { path: PathBuf },
    /// 读取文件失败
    #[error("读取文件失败 ({}): {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量不存在
    #[error("环境变量 {var_name} 未设置 (请在 .env 中配置)")]
    EnvVarNotFound { var_name: String },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置文件读取失败
    #[error("读取配置文件失败 ({}): {source}", .path.display())]
    FileReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({}): {source}", .path.display())]
    TomlParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// 单个章节所处的处理阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Navigate,
    Fill,
    Submit,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Navigate => "navigate",
            Stage::Fill => "fill",
            Stage::Submit => "submit",
        };
        f.write_str(name)
    }
}

/// 浏览器自动化错误
#[derive(Debug, Error)]
pub enum AutomationError {
    /// 启动浏览器失败
    #[error("启动浏览器失败: {0}")]
    Launch(String),
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port})")]
    Connect {
        port: u16,
        #[source]
        source: DriverError,
    },
    /// 登录失败
    #[error("[login] 登录失败: {reason}")]
    Login {
        reason: String,
        #[source]
        source: Option<DriverError>,
    },
    /// 某一章节在某个阶段失败
    #[error("[{stage}] 章节 #{index}「{title}」处理失败 (修复后可使用 --start {index} 继续)")]
    Chapter {
        stage: Stage,
        index: usize,
        title: String,
        #[source]
        source: DriverError,
    },
}

/// 表单驱动错误
#[derive(Debug, Error)]
pub enum DriverError {
    /// 页面上找不到指定元素
    #[error("未找到页面元素: {selector}")]
    ElementNotFound { selector: String },
    /// 等待元素出现超时
    #[error("等待元素 {selector} 超时 ({secs} 秒)")]
    Timeout { selector: String, secs: u64 },
    /// 站点拒绝了提交
    #[error("站点拒绝了提交: {0}")]
    Rejected(String),
    /// 执行脚本失败
    #[error("执行脚本失败: {0}")]
    Script(String),
    /// 浏览器协议错误
    #[error("浏览器协议错误: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),
    /// 浏览器进程 IO 错误
    #[error("浏览器进程错误: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for DriverError {
    fn from(err: serde_json::Error) -> Self {
        DriverError::Script(err.to_string())
    }
}

// ========== 便捷构造函数 ==========

impl AutomationError {
    /// 创建章节阶段错误
    pub fn chapter(stage: Stage, index: usize, title: impl Into<String>, source: DriverError) -> Self {
        AutomationError::Chapter {
            stage,
            index,
            title: title.into(),
            source,
        }
    }

    /// 创建登录错误
    pub fn login(reason: impl Into<String>, source: Option<DriverError>) -> Self {
        AutomationError::Login {
            reason: reason.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

/// 表单驱动结果类型
pub type DriverResult<T> = Result<T, DriverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chapter_error_names_stage_index_and_resume_hint() {
        let err = AutomationError::chapter(
            Stage::Submit,
            4,
            "Chapter Five",
            DriverError::ElementNotFound {
                selector: "#chapter_content".to_string(),
            },
        );
        let msg = err.to_string();
        assert!(msg.starts_with("[submit]"));
        assert!(msg.contains("章节 #4「Chapter Five」"));
        assert!(msg.contains("--start 4"));
    }

    #[test]
    fn chapter_error_cause_appears_once_in_the_chain() {
        let err: AppError = AutomationError::chapter(
            Stage::Fill,
            1,
            "Chapter Two",
            DriverError::ElementNotFound {
                selector: "#chapter_title".to_string(),
            },
        )
        .into();

        let chain: Vec<String> = std::iter::successors(
            Some(&err as &(dyn std::error::Error + 'static)),
            |e| e.source(),
        )
        .map(|e| e.to_string())
        .collect();

        let mentions = |needle: &str| chain.iter().filter(|m| m.contains(needle)).count();
        assert_eq!(mentions("#chapter_title"), 1, "{:?}", chain);
        assert_eq!(mentions("Chapter Two"), 1, "{:?}", chain);
        assert!(chain.last().unwrap().contains("#chapter_title"));
    }

    #[test]
    fn app_error_wraps_config_error() {
        let err: AppError = ConfigError::EnvVarNotFound {
            var_name: "AO3_PASSWORD".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("AO3_PASSWORD"));
    }
}
