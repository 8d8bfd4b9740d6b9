use std::path::PathBuf;

use clap::Parser;

/// 把 NovelCrafter 导出的 HTML 按章节发布到 AO3 的已有作品中
#[derive(Debug, Clone, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// 导出的 HTML 文件
    pub path: PathBuf,

    /// 目标作品 ID
    #[arg(long)]
    pub work_id: u64,

    /// 从第几个章节开始（从 0 开始，用于中断后继续）
    #[arg(long, default_value_t = 0)]
    pub start: usize,

    /// 只填写表单，不提交
    #[arg(long)]
    pub dry_run: bool,

    /// 无头模式运行浏览器
    #[arg(long)]
    pub headless: bool,

    /// 只列出解析到的章节，不打开浏览器
    #[arg(long)]
    pub list_chapters: bool,

    /// TOML 配置文件
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// 连接到已运行浏览器的调试端口，而不是启动新浏览器
    #[arg(long)]
    pub browser_port: Option<u16>,
}
