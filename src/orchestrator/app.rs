//! 应用入口 - 编排层
//!
//! ## 核心功能
//!
//! 1. **解析章节**：读取导出文件，`--list-chapters` 时只打印不启动浏览器
//! 2. **前置检查**：没有章节或 `start` 越界时直接结束
//! 3. **资源管理**：读取账号后启动或连接浏览器，持有唯一的 ChromeDriver
//! 4. **上传**：登录后委托 upload_processor 逐章处理
//! 5. **收尾**：无头模式关闭浏览器，可见窗口保持打开供检查

use tracing::{error, info, warn};

use crate::browser;
use crate::cli::Cli;
use crate::config::{Config, Credentials};
use crate::error::AppResult;
use crate::infrastructure::{ChromeDriver, FormDriver};
use crate::models::{load_chapters, Chapter};
use crate::orchestrator::upload_processor::{process_chapters, UploadOptions, UploadStats};
use crate::services::{PostLog, SessionService};
use crate::utils::logging::banner;
use crate::workflow::ChapterFlow;

/// 列表模式下正文预览的字符数
const PREVIEW_CHARS: usize = 80;

/// 浏览器的来源，决定结束时如何处理
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserMode {
    /// 自己启动的无头浏览器，结束时关闭
    Headless,
    /// 自己启动的可见浏览器，结束时保持打开
    Visible,
    /// 连接的外部浏览器，结束时只断开
    Attached,
}

/// 运行一次完整的命令
pub async fn run(cli: Cli, config: Config) -> AppResult<()> {
    let chapters = load_chapters(&cli.path).await?;

    if cli.list_chapters {
        print!("{}", format_chapter_list(&chapters));
        return Ok(());
    }

    if chapters.is_empty() {
        warn!("⚠️ 文件中没有找到 h1/h2 章节标题，没有可上传的内容，程序结束");
        return Ok(());
    }

    if cli.start >= chapters.len() {
        warn!(
            "⚠️ 起始索引 {} 超出章节范围 (共 {} 章，索引 0-{})，没有需要处理的章节",
            cli.start,
            chapters.len(),
            chapters.len() - 1
        );
        return Ok(());
    }

    // 账号缺失时在打开浏览器之前报错
    let credentials = Credentials::from_env()?;

    let options = UploadOptions {
        work_id: cli.work_id,
        start: cli.start,
        post_delay: config.post_delay(),
    };

    let app = App::initialize(config, &cli).await?;
    app.execute(&chapters, &credentials, &options, cli.dry_run)
        .await
        .map(|_| ())
}

/// 应用主结构，持有唯一的表单驱动
pub struct App<D: FormDriver> {
    config: Config,
    driver: D,
    mode: BrowserMode,
}

impl App<ChromeDriver> {
    /// 启动浏览器，或在配置了调试端口时连接到已运行的浏览器
    pub async fn initialize(config: Config, cli: &Cli) -> AppResult<Self> {
        let port = cli.browser_port.or(config.browser.debug_port);

        let (mode, (browser, page)) = match port {
            Some(port) => {
                if cli.headless {
                    warn!("已指定浏览器调试端口，忽略 --headless");
                }
                (BrowserMode::Attached, browser::connect_to_browser(port).await?)
            }
            None => {
                let mode = if cli.headless {
                    BrowserMode::Headless
                } else {
                    BrowserMode::Visible
                };
                (mode, browser::launch_browser(&config.browser, cli.headless).await?)
            }
        };

        Ok(Self::new(config, ChromeDriver::new(browser, page), mode))
    }
}

impl<D: FormDriver> App<D> {
    pub fn new(config: Config, driver: D, mode: BrowserMode) -> Self {
        Self {
            config,
            driver,
            mode,
        }
    }

    /// 登录、上传，然后按浏览器模式收尾（失败时同样收尾）
    pub async fn execute(
        self,
        chapters: &[Chapter],
        credentials: &Credentials,
        options: &UploadOptions,
        dry_run: bool,
    ) -> AppResult<UploadStats> {
        let result = self.run(chapters, credentials, options, dry_run).await;
        if let (Err(e), BrowserMode::Visible) = (&result, self.mode) {
            // 窗口保持打开期间先把错误打出来
            error!("❌ {}", e);
        }
        self.finish().await;
        result
    }

    /// 登录并上传章节
    pub async fn run(
        &self,
        chapters: &[Chapter],
        credentials: &Credentials,
        options: &UploadOptions,
        dry_run: bool,
    ) -> AppResult<UploadStats> {
        log_startup(options, chapters.len(), dry_run);

        SessionService::new(&self.config)
            .login(&self.driver, credentials)
            .await?;

        let journal = self.config.post_log_path().map(PostLog::new);
        if let Some(journal) = &journal {
            if let Err(e) = journal.start_run(options.work_id, dry_run) {
                warn!("⚠️ 无法写入发布记录 {}: {}", journal.path().display(), e);
            }
        }

        let flow = ChapterFlow::new(&self.config, dry_run);
        let stats = process_chapters(&self.driver, &flow, chapters, options, journal.as_ref()).await?;

        print_final_stats(&stats, journal.as_ref());
        Ok(stats)
    }

    /// 按浏览器模式收尾
    pub async fn finish(mut self) {
        match self.mode {
            BrowserMode::Headless => {
                if let Err(e) = self.driver.close().await {
                    warn!("关闭浏览器失败: {}", e);
                }
            }
            BrowserMode::Visible => {
                info!("🖥️ 浏览器保持打开以便检查，关闭浏览器或按 Ctrl+C 退出");
                tokio::select! {
                    signal = tokio::signal::ctrl_c() => {
                        if let Err(e) = signal {
                            warn!("监听 Ctrl+C 失败: {}", e);
                        }
                    }
                    _ = self.driver.wait_for_exit() => {
                        info!("浏览器已关闭");
                    }
                }
            }
            BrowserMode::Attached => {
                info!("外部浏览器保持运行");
            }
        }
    }
}

/// 列表模式的输出：每章一行，包含索引、标题和正文预览
pub fn format_chapter_list(chapters: &[Chapter]) -> String {
    if chapters.is_empty() {
        return "未找到任何章节\n".to_string();
    }

    let mut out = format!("共 {} 个章节:\n", chapters.len());
    for chapter in chapters {
        out.push_str(&format!(
            "  [{}] {}: {}\n",
            chapter.index,
            chapter.title,
            chapter.preview(PREVIEW_CHARS)
        ));
    }
    out
}

// ========== 日志辅助函数 ==========

fn log_startup(options: &UploadOptions, total: usize, dry_run: bool) {
    banner(&format!(
        "🚀 开始上传 - 作品 #{}{}",
        options.work_id,
        if dry_run { " (DRY RUN)" } else { "" }
    ));
    info!(
        "📚 共 {} 章，从索引 {} 开始，待处理 {} 章",
        total,
        options.start,
        total.saturating_sub(options.start)
    );
    info!("⏱️ 每次发布后等待 {} 秒", options.post_delay.as_secs());
}

fn print_final_stats(stats: &UploadStats, journal: Option<&PostLog>) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 已发布: {}", stats.posted);
    info!("📝 仅填写: {}", stats.filled);
    info!("⏭️ 已跳过: {}", stats.skipped);
    info!("📚 章节总数: {}", stats.total);
    info!("{}", "=".repeat(60));
    if let Some(journal) = journal {
        info!("\n发布记录已保存至: {}", journal.path().display());
    }
}
