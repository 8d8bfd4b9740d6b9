use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;
use tracing::{debug, info};

use crate::error::ParseError;
use crate::models::Chapter;
use crate::services::chapter_extractor;

/// 读取导出的 HTML 文件并切分为章节
///
/// 文件不存在或无法读取时返回 [`ParseError`]；没有章节不算错误，返回空列表
pub async fn load_chapters(html_path: &Path) -> Result<Vec<Chapter>, ParseError> {
    info!("📖 正在解析 {}", html_path.display());

    let content = fs::read_to_string(html_path).await.map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            ParseError::NotFound {
                path: html_path.to_path_buf(),
            }
        } else {
            ParseError::ReadFailed {
                path: html_path.to_path_buf(),
                source,
            }
        }
    })?;
    debug!("文件大小: {} 字节", content.len());

    let chapters = chapter_extractor::extract(&content);
    info!("✓ 找到 {} 个章节", chapters.len());

    Ok(chapters)
}
