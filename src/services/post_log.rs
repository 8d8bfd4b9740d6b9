//! 发布记录服务 - 业务能力层
//!
//! 每成功发布一章就追加一行，方便中断后人工决定 `--start`。
//! 程序本身从不读取这个文件。

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::models::Chapter;

pub struct PostLog {
    path: PathBuf,
}

impl PostLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 写入本次运行的开始标记
    pub fn start_run(&self, work_id: u64, dry_run: bool) -> Result<()> {
        let header = format!(
            "{}\n上传日志 - {} | 作品 #{}{}\n{}\n",
            "=".repeat(60),
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            work_id,
            if dry_run { " | DRY RUN" } else { "" },
            "=".repeat(60)
        );
        self.append(&header)
    }

    /// 记录一章已发布
    pub fn record_posted(&self, work_id: u64, chapter: &Chapter) -> Result<()> {
        debug!("写入发布记录: 章节 {}", chapter.index);
        let line = format!(
            "{} | 作品 #{} | index {} | {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            work_id,
            chapter.index,
            chapter.title
        );
        self.append(&line)
    }

    fn append(&self, text: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(text.as_bytes())?;
        Ok(())
    }
}
