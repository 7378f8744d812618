use anyhow::Result;
use enem_quiz::utils::logging;
use enem_quiz::{App, Config};
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let (config, problems) = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);
    for problem in &problems {
        warn!("⚠️ {}", problem);
    }

    // 初始化并运行应用
    App::initialize(config)?.run().await?;

    Ok(())
}
