use anyhow::Result;
use ao3_chapter_upload::utils::logging;
use ao3_chapter_upload::{orchestrator, Cli, Config};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // 读取 .env（账号等），文件不存在时忽略
    dotenvy::dotenv().ok();

    // 初始化日志
    logging::init()?;

    let cli = Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    // 加载配置
    let config = Config::load(cli.config.as_deref())?;

    orchestrator::run(cli, config).await?;

    Ok(())
}
