//! 章节上传处理器 - 编排层
//!
//! ## 核心功能
//!
//! 1. **断点继续**：跳过 `start` 之前的章节
//! 2. **顺序处理**：逐章调用 `ChapterFlow`
//! 3. **限速**：每次成功发布后等待固定间隔再处理下一章
//! 4. **发布记录**：成功发布的章节写入发布记录
//! 5. **统计输出**：记录发布/填写/跳过数量

use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::AppResult;
use crate::infrastructure::FormDriver;
use crate::models::Chapter;
use crate::services::PostLog;
use crate::workflow::{ChapterCtx, ChapterFlow, ProcessResult};

/// 上传参数
#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub work_id: u64,
    /// 从这个索引开始处理（从 0 开始）
    pub start: usize,
    /// 每次成功发布后的等待时间
    pub post_delay: Duration,
}

/// 上传统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UploadStats {
    pub total: usize,
    /// `start` 之前被跳过的章节
    pub skipped: usize,
    pub posted: usize,
    /// dry-run 下只填写未提交的章节
    pub filled: usize,
}

/// 从 `options.start` 开始依次处理章节
///
/// 任一章节失败立即返回错误，后续章节不再处理
pub async fn process_chapters<D: FormDriver>(
    driver: &D,
    flow: &ChapterFlow<'_>,
    chapters: &[Chapter],
    options: &UploadOptions,
    journal: Option<&PostLog>,
) -> AppResult<UploadStats> {
    let total = chapters.len();
    let pending = chapters.get(options.start..).unwrap_or_default();

    let mut stats = UploadStats {
        total,
        skipped: total - pending.len(),
        ..Default::default()
    };
    log_skipped(&chapters[..stats.skipped]);

    for (offset, chapter) in pending.iter().enumerate() {
        let ctx = ChapterCtx::new(options.work_id, chapter.index, total);
        log_chapter_start(&ctx, chapter);

        match flow.run(driver, chapter, &ctx).await? {
            ProcessResult::Posted => {
                stats.posted += 1;
                if let Some(journal) = journal {
                    if let Err(e) = journal.record_posted(options.work_id, chapter) {
                        warn!("{} ⚠️ 写入发布记录失败: {}", ctx, e);
                    }
                }

                if offset + 1 < pending.len() {
                    info!("⏳ 等待 {} 秒后处理下一章", options.post_delay.as_secs());
                    sleep(options.post_delay).await;
                }
            }
            ProcessResult::Filled => {
                stats.filled += 1;
            }
        }
    }

    Ok(stats)
}

// ========== 日志辅助函数 ==========

fn log_skipped(skipped: &[Chapter]) {
    for chapter in skipped {
        info!("⏭️ 跳过第 {} 章: {}", chapter.position(), chapter.title);
    }
}

fn log_chapter_start(ctx: &ChapterCtx, chapter: &Chapter) {
    info!("\n{}", "─".repeat(60));
    info!("{} 开始处理: {}", ctx, chapter.title);
}
