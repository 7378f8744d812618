/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug 或 info。
/// 重复调用不会报错（测试中可多次调用）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `year`: 试卷年份
/// - `language`: 外语（展示名称）
/// - `total_slots`: 题目总数
/// - `batch_size`: 每批数量
pub fn log_startup(year: u16, language: Option<&str>, total_slots: u16, batch_size: u16) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - ENEM {} 试卷加载", year);
    if let Some(language) = language {
        info!("🌐 外语: {}", language);
    }
    info!("📊 共 {} 题，每批 {} 题", total_slots, batch_size);
    info!("{}", "=".repeat(60));
}

/// 记录批次开始信息
pub fn log_batch_start(batch_num: usize, total_batches: usize, start: u16, end: u16, total: u16) {
    info!("📦 开始加载第 {}/{} 批: 第 {}-{} 题 / 共 {} 题", batch_num, total_batches, start, end, total);
}

/// 记录批次完成信息
///
/// # 参数
/// - `batch_num`: 批次编号
/// - `loaded`: 成功数量
/// - `total`: 本批数量
/// - `progress`: 已尝试的最大题号
/// - `total_slots`: 题目总数
pub fn log_batch_complete(batch_num: usize, loaded: usize, total: usize, progress: u16, total_slots: u16) {
    info!(
        "✓ 第 {} 批完成: 成功 {}/{} (进度 {} / {})",
        batch_num, loaded, total, progress, total_slots
    );
}

/// 打印最终统计信息
///
/// # 参数
/// - `loaded`: 成功加载数量
/// - `placeholders`: 占位题目数量
/// - `total`: 总数
pub fn print_final_stats(loaded: usize, placeholders: usize, total: usize) {
    info!("{}", "=".repeat(60));
    info!("📊 试卷加载完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", loaded, total);
    info!("❌ 加载失败（已替换为占位题目）: {}", placeholders);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("abc", 5), "abc");
        assert_eq!(truncate_text("Questão", 4), "Ques...");
    }

    #[test]
    fn test_init_twice() {
        init(false);
        init(true);
    }
}
