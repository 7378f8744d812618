//! 加载驱动 - 编排层
//!
//! 从快照流中逐个拉取快照并交给会话。会话拒绝（代次已过期）后立即停止拉取，
//! 丢弃快照流，后续批次不会再发起请求。

use crate::clients::SlotFetcher;
use crate::error::SessionError;
use crate::orchestrator::batch_scheduler::{BatchScheduler, ExamSnapshot};
use crate::orchestrator::session::{ExamSession, LoadTicket};
use futures::{Stream, StreamExt};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// 单次加载统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub generation: u64,
    /// 成功加载的题目数
    pub loaded: usize,
    /// 加载失败被替换的题目数
    pub placeholders: usize,
    /// 已提交给会话的最大题号
    pub progress: u16,
    pub completed: bool,
    /// 加载途中被新选择取代
    pub superseded: bool,
}

/// 把快照流灌入会话，直到流结束或代次过期
pub async fn pump<S>(session: &Mutex<ExamSession>, ticket: &LoadTicket, snapshots: S) -> LoadSummary
where
    S: Stream<Item = ExamSnapshot>,
{
    let mut summary = LoadSummary {
        generation: ticket.generation,
        ..Default::default()
    };

    let mut snapshots = Box::pin(snapshots);
    while let Some(snapshot) = snapshots.next().await {
        let mut guard = session.lock().await;
        match guard.apply(ticket.generation, &snapshot) {
            Ok(()) => {
                summary.loaded += snapshot.batch.len() - snapshot.batch_placeholders;
                summary.placeholders += snapshot.batch_placeholders;
                summary.progress = snapshot.progress;
                summary.completed = snapshot.done;
            }
            Err(SessionError::StaleGeneration { generation, current }) => {
                debug!("丢弃过期代次 {} 的快照 (当前代次: {})", generation, current);
                summary.superseded = true;
                break;
            }
            Err(e) => {
                warn!("⚠️ 快照无法应用，停止加载: {}", e);
                summary.superseded = true;
                break;
            }
        }
    }

    summary
}

/// 按凭证加载整份试卷到会话
pub async fn load<F>(session: &Mutex<ExamSession>, scheduler: &BatchScheduler<F>, ticket: &LoadTicket) -> LoadSummary
where
    F: SlotFetcher + ?Sized + 'static,
{
    pump(session, ticket, scheduler.load_exam(ticket.request)).await
}
