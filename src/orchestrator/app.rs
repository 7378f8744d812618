//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：创建题库客户端、调度器和会话
//! 2. **选择试卷**：按配置选择年份和外语，不满足前置条件时直接结束
//! 3. **分批加载**：委托调度器加载，会话按代次接收快照
//! 4. **评分**：若配置了答题卡，逐题作答后提交评分
//! 5. **全局统计**：输出加载和评分结果

use crate::clients::HttpSlotFetcher;
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{load_answer_sheet, Language};
use crate::orchestrator::batch_scheduler::{BatchScheduler, LoadRequest};
use crate::orchestrator::exam_loader::{self, LoadSummary};
use crate::orchestrator::session::ExamSession;
use crate::utils::logging::{log_startup, print_final_stats};
use anyhow::{Context, Result};
use std::path::Path;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    scheduler: BatchScheduler<HttpSlotFetcher>,
    session: Mutex<ExamSession>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        let fetcher = HttpSlotFetcher::new(&config).context("无法创建 HTTP 客户端")?;
        let scheduler = BatchScheduler::from_config(std::sync::Arc::new(fetcher), &config);
        let session = Mutex::new(ExamSession::from_config(&config));

        Ok(Self {
            config,
            scheduler,
            session,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        let language = self.config.language()?;

        let Some(year) = self.config.exam_year else {
            warn!("⚠️ 未设置 EXAM_YEAR，程序结束");
            info!("可选年份: {:?}", self.config.available_years());
            info!("可选外语: {:?}", Language::ALL.map(Language::slug));
            return Ok(());
        };

        let ticket = {
            let mut session = self.session.lock().await;
            match session.select(Some(year), language) {
                Ok(ticket) => ticket,
                Err(e) if e.is_precondition() => {
                    warn!("⚠️ {}，程序结束", e);
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            }
        };

        log_startup(
            year,
            ticket.request.language.map(Language::name),
            self.scheduler.total_slots(),
            self.scheduler.batch_size(),
        );

        let summary = exam_loader::load(&self.session, &self.scheduler, &ticket).await;
        self.report(&summary);

        if let Some(path) = self.config.answers_file.as_deref() {
            self.score_answer_sheet(Path::new(path), ticket.request).await?;
        }

        Ok(())
    }

    /// 输出加载统计
    fn report(&self, summary: &LoadSummary) {
        print_final_stats(
            summary.loaded,
            summary.placeholders,
            usize::from(self.scheduler.total_slots()),
        );
        if summary.superseded {
            warn!("⚠️ 加载代次 {} 已被取代", summary.generation);
        }
    }

    /// 读取答题卡、作答并评分
    async fn score_answer_sheet(&self, path: &Path, request: LoadRequest) -> AppResult<()> {
        let sheet = load_answer_sheet(path).await?;
        if let Some(sheet_year) = sheet.year.filter(|y| *y != request.year) {
            warn!("⚠️ 答题卡年份 {} 与试卷年份 {} 不一致", sheet_year, request.year);
        }
        if !sheet.matches_language(request.language) {
            warn!(
                "⚠️ 答题卡外语 {} 与试卷外语 {} 不一致",
                sheet.language.as_deref().unwrap_or("-"),
                request.language.map(Language::slug).unwrap_or("-")
            );
        }

        let display = path.display().to_string();
        let entries = sheet.entries(&display)?;

        let mut session = self.session.lock().await;
        let mut rejected = 0;
        for (slot, letter) in entries {
            if let Err(e) = session.choose(slot, letter) {
                warn!("[第 {} 题] ⚠️ 作答被拒绝: {}", slot, e);
                rejected += 1;
            }
        }

        let score = session.submit()?;
        info!("{}", "=".repeat(60));
        info!("📝 评分结果: {}", score);
        if rejected > 0 {
            info!("⚠️ 被拒绝的作答: {}", rejected);
        }
        info!("{}", "=".repeat(60));

        Ok(())
    }
}
