//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责分批调度和状态归属，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_scheduler` - 分批加载调度器
//! - 切分批次（默认 180 题、每批 10 题）
//! - 批内并发（tokio::spawn），批间串行
//! - 以快照流发布进度
//!
//! ### `session` - 试卷会话
//! - 持有当前选择、试卷、作答和成绩
//! - 用加载代次丢弃过期快照
//!
//! ### `exam_loader` - 加载驱动
//! - 把快照流灌入会话，代次过期即停止
//!
//! ### `app` - 应用入口
//! - 按配置加载一份试卷并对答题卡评分
//!
//! ## 层次关系
//!
//! ```text
//! app
//!     ↓
//! exam_loader → session (Exam / AnswerSelection / ScoreResult)
//!     ↓
//! batch_scheduler (处理 1..=180)
//!     ↓
//! workflow::slot_flow (处理单个题号)
//!     ↓
//! clients::SlotFetcher (题库)
//! ```

pub mod app;
pub mod batch_scheduler;
pub mod exam_loader;
pub mod session;

// 重新导出主要类型
pub use app::App;
pub use batch_scheduler::{BatchScheduler, ExamSnapshot, LoadRequest};
pub use exam_loader::{load, pump, LoadSummary};
pub use session::{ExamSession, LoadTicket};
