//! 分批加载调度器 - 编排层
//!
//! ## 职责
//!
//! 把 1..=total_slots 切分为连续批次，按批次升序加载整份试卷：
//!
//! 1. **批内并发**：每道题一个 `tokio::spawn` 任务
//! 2. **批间串行**：本批全部结束（成功或失败）后才开始下一批
//! 3. **失败隔离**：单题失败只会变成占位题目，不影响同批和后续批次
//! 4. **增量发布**：每批结束产出一个 [`ExamSnapshot`]，题目按题号有序
//!
//! 加载结果以惰性、有限、不可重启的 `Stream` 返回，消费者拉取一次才推进一批。

use crate::clients::SlotFetcher;
use crate::config::Config;
use crate::models::{Language, Question};
use crate::utils::logging::{log_batch_complete, log_batch_start};
use crate::workflow::slot_flow::{self, SlotOutcome};
use crate::workflow::SlotCtx;
use futures::stream::{self, Stream};
use std::ops::RangeInclusive;
use std::sync::Arc;
use tracing::error;

/// 默认题目总数
pub const DEFAULT_TOTAL_SLOTS: u16 = 180;
/// 默认每批题目数
pub const DEFAULT_BATCH_SIZE: u16 = 10;

/// 一次加载请求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    pub year: u16,
    pub language: Option<Language>,
}

/// 每批结束后发布的快照
#[derive(Debug, Clone, PartialEq)]
pub struct ExamSnapshot {
    /// 本批起始题号
    pub batch_start: u16,
    /// 批次编号（从1开始）
    pub batch_num: usize,
    pub total_batches: usize,
    /// 本批结果，按题号有序
    pub batch: Vec<Question>,
    /// 本批中加载失败被替换的题目数
    pub batch_placeholders: usize,
    /// 到目前为止的全部结果，按题号有序
    pub questions: Vec<Question>,
    /// 已尝试的最大题号
    pub progress: u16,
    pub total: u16,
    pub done: bool,
}

/// 分批加载调度器
pub struct BatchScheduler<F: ?Sized> {
    fetcher: Arc<F>,
    total_slots: u16,
    batch_size: u16,
}

impl<F> BatchScheduler<F>
where
    F: SlotFetcher + ?Sized + 'static,
{
    pub fn new(fetcher: Arc<F>) -> Self {
        Self {
            fetcher,
            total_slots: DEFAULT_TOTAL_SLOTS,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn from_config(fetcher: Arc<F>, config: &Config) -> Self {
        Self::new(fetcher).with_limits(config.total_slots, config.batch_size)
    }

    /// 设置题目总数和每批数量（每批至少 1 题）
    pub fn with_limits(mut self, total_slots: u16, batch_size: u16) -> Self {
        self.total_slots = total_slots;
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn total_slots(&self) -> u16 {
        self.total_slots
    }

    pub fn batch_size(&self) -> u16 {
        self.batch_size
    }

    /// 连续批次划分，最后一批可能不足 batch_size
    pub fn batches(&self) -> Vec<RangeInclusive<u16>> {
        partition(self.total_slots, self.batch_size)
    }

    /// 加载整份试卷，返回快照流
    ///
    /// 最后一个快照 `done == true` 且 `progress == total`，
    /// 其 `questions` 恰好包含 1..=total 每题一个结果。
    pub fn load_exam(&self, request: LoadRequest) -> impl Stream<Item = ExamSnapshot> + Send + 'static {
        let batches = self.batches();
        let state = LoadState {
            fetcher: Arc::clone(&self.fetcher),
            request,
            total_batches: batches.len(),
            batches: batches.into_iter(),
            batch_num: 0,
            total_slots: self.total_slots,
            accumulated: Vec::with_capacity(usize::from(self.total_slots)),
            finished: false,
        };

        stream::unfold(state, |mut state| async move {
            if state.finished {
                return None;
            }

            let Some(slots) = state.batches.next() else {
                // 没有任何题目时只发布一个空的完成快照
                state.finished = true;
                let snapshot = ExamSnapshot {
                    batch_start: 0,
                    batch_num: 0,
                    total_batches: 0,
                    batch: Vec::new(),
                    batch_placeholders: 0,
                    questions: Vec::new(),
                    progress: 0,
                    total: state.total_slots,
                    done: true,
                };
                return Some((snapshot, state));
            };

            state.batch_num += 1;
            let batch_start = *slots.start();
            let progress = *slots.end();
            log_batch_start(
                state.batch_num,
                state.total_batches,
                batch_start,
                progress,
                state.total_slots,
            );

            let outcomes = run_batch(&state.fetcher, &state.request, slots).await;
            let batch_placeholders = outcomes.iter().filter(|o| o.is_placeholder()).count();
            let batch: Vec<Question> = outcomes.into_iter().map(SlotOutcome::into_question).collect();

            log_batch_complete(
                state.batch_num,
                batch.len() - batch_placeholders,
                batch.len(),
                progress,
                state.total_slots,
            );

            state.accumulated.extend(batch.iter().cloned());
            state.finished = state.batches.len() == 0;

            let snapshot = ExamSnapshot {
                batch_start,
                batch_num: state.batch_num,
                total_batches: state.total_batches,
                batch,
                batch_placeholders,
                questions: state.accumulated.clone(),
                progress,
                total: state.total_slots,
                done: state.finished,
            };
            Some((snapshot, state))
        })
    }
}

struct LoadState<F: ?Sized> {
    fetcher: Arc<F>,
    request: LoadRequest,
    batches: std::vec::IntoIter<RangeInclusive<u16>>,
    batch_num: usize,
    total_batches: usize,
    total_slots: u16,
    accumulated: Vec<Question>,
    finished: bool,
}

/// 把 1..=total 切分为连续批次
pub fn partition(total: u16, batch_size: u16) -> Vec<RangeInclusive<u16>> {
    let batch_size = batch_size.max(1);
    let mut batches = Vec::new();
    let mut start: u16 = 1;
    while start <= total {
        let end = start.saturating_add(batch_size - 1).min(total);
        batches.push(start..=end);
        match end.checked_add(1) {
            Some(next) => start = next,
            None => break,
        }
    }
    batches
}

/// 并发加载一批题目，等待全部结束后按题号顺序返回
async fn run_batch<F>(fetcher: &Arc<F>, request: &LoadRequest, slots: RangeInclusive<u16>) -> Vec<SlotOutcome>
where
    F: SlotFetcher + ?Sized + 'static,
{
    let mut batch_handles = Vec::new();

    // 为本批创建并发任务
    for slot in slots {
        let ctx = SlotCtx::new(request.year, slot, request.language);
        let task_ctx = ctx.clone();
        let fetcher = Arc::clone(fetcher);

        let handle = tokio::spawn(async move { slot_flow::run(fetcher.as_ref(), &task_ctx).await });
        batch_handles.push((ctx, handle));
    }

    // 等待本批所有任务完成
    let mut outcomes = Vec::with_capacity(batch_handles.len());
    for (ctx, handle) in batch_handles {
        match handle.await {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                error!("{} 任务执行失败: {}", ctx, e);
                outcomes.push(SlotOutcome::Placeholder(slot_flow::placeholder(&ctx)));
            }
        }
    }

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::models::QuestionRecord;
    use async_trait::async_trait;
    use futures::StreamExt;
    use serde_json::json;
    use std::collections::HashSet;
    use std::time::Duration;

    /// 题号为 3 的倍数时失败，其余成功；题号越小返回越慢
    struct FlakyFetcher;

    #[async_trait]
    impl SlotFetcher for FlakyFetcher {
        async fn fetch(&self, _year: u16, slot_id: &str) -> Result<QuestionRecord, FetchError> {
            let slot: u16 = slot_id.split('-').next().unwrap().parse().unwrap();
            tokio::time::sleep(Duration::from_millis(u64::from(20 - slot % 10))).await;
            if slot % 3 == 0 {
                return Err(FetchError::BadStatus {
                    url: slot_id.to_string(),
                    status: 500,
                });
            }
            Ok(serde_json::from_value(json!({
                "title": format!("Questão {}", slot_id),
                "correctAlternative": "C",
                "alternatives": [
                    { "letter": "A", "text": "a" },
                    { "letter": "C", "text": "c" }
                ]
            }))
            .unwrap())
        }
    }

    struct PanickingFetcher;

    #[async_trait]
    impl SlotFetcher for PanickingFetcher {
        async fn fetch(&self, _year: u16, slot_id: &str) -> Result<QuestionRecord, FetchError> {
            panic!("fetch {} exploded", slot_id);
        }
    }

    #[test]
    fn test_partition() {
        assert_eq!(partition(25, 10), vec![1..=10, 11..=20, 21..=25]);
        assert_eq!(partition(180, 10).len(), 18);
        assert!(partition(0, 10).is_empty());
        assert_eq!(partition(3, 0), vec![1..=1, 2..=2, 3..=3]);
        assert_eq!(partition(u16::MAX, u16::MAX), vec![1..=u16::MAX]);
    }

    #[tokio::test]
    async fn test_load_exam_is_complete_and_ordered() {
        let scheduler = BatchScheduler::new(Arc::new(FlakyFetcher)).with_limits(25, 10);
        let snapshots: Vec<ExamSnapshot> = scheduler
            .load_exam(LoadRequest {
                year: 2020,
                language: Some(Language::English),
            })
            .collect()
            .await;

        assert_eq!(snapshots.len(), 3);
        let progress: Vec<u16> = snapshots.iter().map(|s| s.progress).collect();
        assert_eq!(progress, vec![10, 20, 25]);
        assert_eq!(snapshots.iter().filter(|s| s.done).count(), 1);
        assert!(snapshots.last().unwrap().done);

        let last = snapshots.last().unwrap();
        let slots: Vec<u16> = last.questions.iter().map(|q| q.slot).collect();
        assert_eq!(slots, (1..=25).collect::<Vec<u16>>());

        let unique: HashSet<u16> = slots.iter().copied().collect();
        assert_eq!(unique.len(), 25);

        for question in &last.questions {
            assert_eq!(question.canceled, question.slot % 3 == 0);
        }
        assert_eq!(snapshots[0].batch_placeholders, 3);
        assert_eq!(snapshots[0].batch.len(), 10);
    }

    #[tokio::test]
    async fn test_batches_are_sequential_and_cumulative() {
        let scheduler = BatchScheduler::new(Arc::new(FlakyFetcher)).with_limits(30, 10);
        let mut snapshots = Box::pin(scheduler.load_exam(LoadRequest {
            year: 2005,
            language: None,
        }));

        let first = snapshots.next().await.unwrap();
        assert_eq!(first.batch_start, 1);
        assert_eq!(first.questions.len(), 10);
        assert!(!first.done);

        let second = snapshots.next().await.unwrap();
        assert_eq!(second.batch_start, 11);
        assert_eq!(second.questions.len(), 20);
        assert_eq!(&second.questions[..10], first.questions.as_slice());

        let third = snapshots.next().await.unwrap();
        assert!(third.done);
        assert!(snapshots.next().await.is_none());
    }

    #[tokio::test]
    async fn test_panicking_task_becomes_placeholder() {
        let scheduler = BatchScheduler::new(Arc::new(PanickingFetcher)).with_limits(4, 2);
        let snapshots: Vec<ExamSnapshot> = scheduler
            .load_exam(LoadRequest {
                year: 2012,
                language: Some(Language::Spanish),
            })
            .collect()
            .await;

        let last = snapshots.last().unwrap();
        assert_eq!(last.questions.len(), 4);
        assert!(last.questions.iter().all(|q| q.canceled));
        assert_eq!(last.progress, 4);
    }

    #[tokio::test]
    async fn test_empty_exam_yields_single_done_snapshot() {
        let scheduler = BatchScheduler::new(Arc::new(FlakyFetcher)).with_limits(0, 10);
        let snapshots: Vec<ExamSnapshot> = scheduler
            .load_exam(LoadRequest {
                year: 2020,
                language: None,
            })
            .collect()
            .await;

        assert_eq!(snapshots.len(), 1);
        assert!(snapshots[0].done);
        assert!(snapshots[0].questions.is_empty());
    }
}
