use crate::models::language::Language;
use crate::models::question::Question;
use std::collections::BTreeMap;

/// 一份试卷（加载过程中可能不完整）
///
/// 题目按题号存放，插入顺序无关紧要。
#[derive(Debug, Clone, PartialEq)]
pub struct Exam {
    pub year: u16,
    pub language: Option<Language>,
    questions: BTreeMap<u16, Question>,
}

impl Exam {
    /// 创建空试卷
    pub fn new(year: u16, language: Option<Language>) -> Self {
        Self {
            year,
            language,
            questions: BTreeMap::new(),
        }
    }

    pub fn get(&self, slot: u16) -> Option<&Question> {
        self.questions.get(&slot)
    }

    /// 按题号升序遍历
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.questions.values()
    }

    pub fn slots(&self) -> impl Iterator<Item = u16> + '_ {
        self.questions.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// 已作废（含加载失败占位）的题目数量
    pub fn canceled_count(&self) -> usize {
        self.questions.values().filter(|q| q.canceled).count()
    }

    pub(crate) fn put(&mut self, question: Question) {
        self.questions.insert(question.slot, question);
    }
}
