//! 章节处理上下文
//!
//! 封装"我正在往哪个作品发第几章"这一信息

use std::fmt::Display;

/// 章节处理上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterCtx {
    /// 目标作品 ID
    pub work_id: u64,

    /// 章节在序列中的索引（从 0 开始）
    pub index: usize,

    /// 章节总数（仅用于日志显示）
    pub total: usize,
}

impl ChapterCtx {
    pub fn new(work_id: u64, index: usize, total: usize) -> Self {
        Self {
            work_id,
            index,
            total,
        }
    }

    /// 站点上的章节序号（从 1 开始）
    pub fn position(&self) -> usize {
        self.index + 1
    }
}

impl Display for ChapterCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[作品 #{} 第 {}/{} 章]",
            self.work_id,
            self.position(),
            self.total
        )
    }
}
