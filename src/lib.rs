//! # ENEM Quiz
//!
//! 按年份加载 ENEM 模拟试卷、作答并在本地评分
//!
//! ## 架构设计
//!
//! 本系统沿用四层架构：
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 只暴露"取一道题"的能力
//! - `SlotFetcher` - 题库能力接口，`HttpSlotFetcher` 为 HTTP 实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 纯计算，不做 I/O
//! - `variant_resolver` - 按年份解析外语题号
//! - `exam_aggregator` - 按题号聚合结果
//! - `scoring` - 评分
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一道题"的获取流程
//! - `SlotCtx` - 上下文封装（年份 + 题号 + 外语）
//! - `slot_flow` - 获取、校验、失败兜底为占位题目
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_scheduler` - 分批并发加载，发布快照流
//! - `orchestrator/session` - 持有选择和试卷状态，按代次丢弃过期结果
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{HttpSlotFetcher, SlotFetcher};
pub use config::Config;
pub use error::{AppError, AppResult, FetchError, SessionError};
pub use models::{AnswerSelection, Exam, Language, Letter, Question, ScoreResult};
pub use orchestrator::{App, BatchScheduler, ExamSession, ExamSnapshot, LoadRequest, LoadTicket};
pub use services::{resolve_slot_id, score, VariantPolicy};
pub use workflow::{SlotCtx, SlotOutcome};
