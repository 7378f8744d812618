//! 试卷会话 - 编排层
//!
//! 唯一持有"当前选择、试卷、作答、成绩"的控制器。
//! 每次年份或外语变化都会开启新的加载代次，旧代次的快照一律丢弃。

use crate::config::Config;
use crate::error::SessionError;
use crate::models::{AnswerSelection, Exam, Language, Letter, ScoreResult};
use crate::orchestrator::batch_scheduler::{ExamSnapshot, LoadRequest, DEFAULT_TOTAL_SLOTS};
use crate::services::{exam_aggregator, scoring, VariantPolicy};
use tracing::debug;

/// 一次加载的凭证：代次 + 请求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub request: LoadRequest,
}

/// 试卷会话
#[derive(Debug)]
pub struct ExamSession {
    policy: VariantPolicy,
    total_slots: u16,
    year: Option<u16>,
    language: Option<Language>,
    generation: u64,
    exam: Option<Exam>,
    answers: AnswerSelection,
    score: Option<ScoreResult>,
    progress: u16,
    loading: bool,
}

impl Default for ExamSession {
    fn default() -> Self {
        Self::new(VariantPolicy::default(), DEFAULT_TOTAL_SLOTS)
    }
}

impl ExamSession {
    pub fn new(policy: VariantPolicy, total_slots: u16) -> Self {
        Self {
            policy,
            total_slots,
            year: None,
            language: None,
            generation: 0,
            exam: None,
            answers: AnswerSelection::new(),
            score: None,
            progress: 0,
            loading: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.variant_policy(), config.total_slots)
    }

    /// 选择年份（同时清空外语选择）
    ///
    /// 返回新加载的凭证；前置条件不满足时返回错误，此时试卷为空、不发起任何请求。
    pub fn select_year(&mut self, year: Option<u16>) -> Result<LoadTicket, SessionError> {
        self.year = year;
        self.language = None;
        self.restart()
    }

    /// 选择外语
    pub fn select_language(&mut self, language: Option<Language>) -> Result<LoadTicket, SessionError> {
        self.language = language;
        self.restart()
    }

    /// 同时选择年份和外语，只开启一个新代次
    pub fn select(&mut self, year: Option<u16>, language: Option<Language>) -> Result<LoadTicket, SessionError> {
        self.year = year;
        self.language = language;
        self.restart()
    }

    /// 当前选择对应的加载请求
    pub fn request(&self) -> Result<LoadRequest, SessionError> {
        let year = self.year.ok_or(SessionError::NoYearSelected)?;

        if self.policy.requires_language(year) && self.language.is_none() {
            return Err(SessionError::LanguageRequired { year });
        }

        let language = self.language.filter(|_| self.policy.offers_language(year));
        Ok(LoadRequest { year, language })
    }

    /// 丢弃旧状态并开启新代次
    fn restart(&mut self) -> Result<LoadTicket, SessionError> {
        self.generation += 1;
        self.exam = None;
        self.answers.clear();
        self.score = None;
        self.progress = 0;
        self.loading = false;

        let request = self.request()?;
        self.exam = Some(Exam::new(request.year, request.language));
        self.loading = true;

        debug!(
            "开启加载代次 {}: {} 年 外语 {:?}",
            self.generation, request.year, request.language
        );

        Ok(LoadTicket {
            generation: self.generation,
            request,
        })
    }

    /// 应用一个快照；旧代次的快照返回 `StaleGeneration` 且不修改任何状态
    pub fn apply(&mut self, generation: u64, snapshot: &ExamSnapshot) -> Result<(), SessionError> {
        if generation != self.generation {
            return Err(SessionError::StaleGeneration {
                generation,
                current: self.generation,
            });
        }

        let exam = self.exam.take().ok_or(SessionError::NoExam)?;
        self.exam = Some(exam_aggregator::insert(exam, snapshot.batch.iter().cloned()));
        self.progress = self.progress.max(snapshot.progress);
        self.loading = !snapshot.done;

        Ok(())
    }

    /// 作答一道题
    pub fn choose(&mut self, slot: u16, letter: Letter) -> Result<(), SessionError> {
        let exam = self.exam.as_ref().ok_or(SessionError::NoExam)?;
        self.answers.select(exam, slot, letter)
    }

    /// 提交作答并评分（试卷可能尚未加载完）
    pub fn submit(&mut self) -> Result<&ScoreResult, SessionError> {
        let exam = self.exam.as_ref().ok_or(SessionError::NoExam)?;
        let result = scoring::score(exam, &self.answers);
        let score: &ScoreResult = self.score.insert(result);
        Ok(score)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn year(&self) -> Option<u16> {
        self.year
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn exam(&self) -> Option<&Exam> {
        self.exam.as_ref()
    }

    pub fn answers(&self) -> &AnswerSelection {
        &self.answers
    }

    pub fn score(&self) -> Option<&ScoreResult> {
        self.score.as_ref()
    }

    /// 已尝试的最大题号（用于 "N / 180" 进度显示）
    pub fn progress(&self) -> u16 {
        self.progress
    }

    pub fn total_slots(&self) -> u16 {
        self.total_slots
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_complete(&self) -> bool {
        self.exam
            .as_ref()
            .is_some_and(|exam| exam_aggregator::is_complete(exam, self.total_slots))
    }
}
