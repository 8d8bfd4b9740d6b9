//! # AO3 Chapter Upload
//!
//! 把 NovelCrafter 导出的 HTML 按章节自动发布到 AO3 已有作品中的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统沿用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Browser / Page），只暴露能力
//! - `FormDriver` - 表单操作能力（open / find / set_text / click / wait / close）
//! - `ChromeDriver` - 唯一的 page owner，基于 chromiumoxide 实现 FormDriver
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个章节或单次登录
//! - `chapter_extractor` - 把导出 HTML 切分为章节
//! - `SessionService` - 登录能力
//! - `ChapterForm` - 打开 / 填写 / 提交章节表单
//! - `PostLog` - 写发布记录
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一章"的完整处理流程
//! - `ChapterCtx` - 上下文封装（work_id + 章节索引）
//! - `ChapterFlow` - 流程编排（navigate → fill → submit）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 命令模式、浏览器生命周期
//! - `orchestrator/upload_processor` - 从 `--start` 开始逐章处理并限速
//!
//! ## 模块结构

pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use cli::Cli;
pub use config::{Config, Credentials};
pub use error::{AppError, AppResult};
pub use infrastructure::{ChromeDriver, FormDriver};
pub use models::Chapter;
pub use orchestrator::{process_chapters, App, BrowserMode};
pub use services::chapter_extractor::extract;
pub use workflow::{ChapterCtx, ChapterFlow, ProcessResult};
