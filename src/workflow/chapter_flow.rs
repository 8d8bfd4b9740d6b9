//! 章节处理流程 - 流程层
//!
//! 核心职责：定义"一章"的完整处理流程
//!
//! 流程顺序：
//! 1. 导航到添加章节页面
//! 2. 填写标题和正文
//! 3. 提交（dry-run 时到此为止）
//!
//! 提交后的等待由编排层负责

use tracing::info;

use crate::config::Config;
use crate::error::{AutomationError, DriverError, Stage};
use crate::infrastructure::FormDriver;
use crate::models::Chapter;
use crate::services::ChapterForm;
use crate::workflow::chapter_ctx::ChapterCtx;

/// 章节处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessResult {
    /// 已提交发布
    Posted,
    /// 只填写了表单（dry-run）
    Filled,
}

/// 章节处理流程
///
/// - 按固定顺序调用表单能力
/// - 为失败补充阶段和章节信息
/// - 不持有浏览器资源
pub struct ChapterFlow<'a> {
    form: ChapterForm<'a>,
    dry_run: bool,
}

impl<'a> ChapterFlow<'a> {
    pub fn new(config: &'a Config, dry_run: bool) -> Self {
        Self {
            form: ChapterForm::new(config),
            dry_run,
        }
    }

    pub async fn run<D: FormDriver>(
        &self,
        driver: &D,
        chapter: &Chapter,
        ctx: &ChapterCtx,
    ) -> Result<ProcessResult, AutomationError> {
        let fail = |stage: Stage, source: DriverError| {
            AutomationError::chapter(stage, chapter.index, chapter.title.as_str(), source)
        };

        self.form
            .navigate(driver, ctx.work_id)
            .await
            .map_err(|e| fail(Stage::Navigate, e))?;

        self.form
            .fill(driver, &chapter.title, &chapter.body)
            .await
            .map_err(|e| fail(Stage::Fill, e))?;

        if self.dry_run {
            info!("{} [DRY RUN] 已填写表单，未提交: {}", ctx, chapter.title);
            return Ok(ProcessResult::Filled);
        }

        info!("{} 📤 正在发布...", ctx);
        self.form
            .submit(driver)
            .await
            .map_err(|e| fail(Stage::Submit, e))?;
        info!("{} ✓ 已发布: {}", ctx, chapter.title);

        Ok(ProcessResult::Posted)
    }
}
