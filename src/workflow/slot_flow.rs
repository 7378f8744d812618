//! 单题获取流程 - 流程层
//!
//! 核心职责：定义"一道题"的获取流程
//!
//! 流程顺序：
//! 1. 按上下文中的题目标识请求题库
//! 2. 校验并转换为 `Question`，注入题号
//! 3. 任何失败都转换为作废的占位题目（兜底）

use tracing::{debug, warn};

use crate::clients::SlotFetcher;
use crate::models::Question;
use crate::utils::logging::truncate_text;
use crate::workflow::slot_ctx::SlotCtx;

/// 单题获取结果
#[derive(Debug, Clone, PartialEq)]
pub enum SlotOutcome {
    /// 获取成功
    Loaded(Question),
    /// 获取失败，已替换为占位题目
    Placeholder(Question),
}

impl SlotOutcome {
    pub fn question(&self) -> &Question {
        match self {
            SlotOutcome::Loaded(q) | SlotOutcome::Placeholder(q) => q,
        }
    }

    pub fn into_question(self) -> Question {
        match self {
            SlotOutcome::Loaded(q) | SlotOutcome::Placeholder(q) => q,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, SlotOutcome::Placeholder(_))
    }
}

/// 获取一道题，失败时返回占位题目，从不返回错误
pub async fn run<F>(fetcher: &F, ctx: &SlotCtx) -> SlotOutcome
where
    F: SlotFetcher + ?Sized,
{
    let result = fetcher
        .fetch(ctx.year, &ctx.slot_id)
        .await
        .and_then(|record| record.into_question(ctx.slot, ctx.year));

    match result {
        Ok(question) => {
            debug!("{} ✓ {}", ctx, truncate_text(&question.title, 60));
            SlotOutcome::Loaded(question)
        }
        Err(e) => {
            warn!("{} ⚠️ 加载失败，使用占位题目: {}", ctx, e);
            SlotOutcome::Placeholder(placeholder(ctx))
        }
    }
}

/// 按上下文构造占位题目
pub fn placeholder(ctx: &SlotCtx) -> Question {
    Question::placeholder(ctx.slot, ctx.year, ctx.variant_language())
}
