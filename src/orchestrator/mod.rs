//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责章节的顺序调度和浏览器生命周期，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 解析导出文件，处理 `--list-chapters`
//! - 读取账号，启动或连接浏览器
//! - 登录后交给 upload_processor
//! - 结束时按模式关闭浏览器或保持打开
//!
//! ### `upload_processor` - 章节上传处理器
//! - 从 `--start` 开始遍历章节（`&[Chapter]`）
//! - 复用同一个 ChapterFlow
//! - 每次成功发布后等待固定间隔
//! - 输出统计信息
//!
//! ## 层次关系
//!
//! ```text
//! app (浏览器 + 模式)
//!     ↓
//! upload_processor (处理 &[Chapter])
//!     ↓
//! workflow::ChapterFlow (处理单个 Chapter)
//!     ↓
//! services (能力层：form / session / post_log)
//!     ↓
//! infrastructure (基础设施：FormDriver)
//! ```
//!
//! ## 设计原则
//!
//! 1. **严格顺序**：同一时间只处理一章，发布顺序与文档顺序一致
//! 2. **资源隔离**：只有编排层持有浏览器
//! 3. **失败即停**：任一章节失败立即返回，不重试不跳过

pub mod app;
pub mod upload_processor;

// 重新导出主要类型
pub use app::{format_chapter_list, run, App, BrowserMode};
pub use upload_processor::{process_chapters, UploadOptions, UploadStats};
