use crate::error::SessionError;
use crate::models::exam::Exam;
use crate::models::question::Letter;
use std::collections::BTreeMap;

/// 用户作答：题号 → 所选字母，每题最多一个
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSelection {
    choices: BTreeMap<u16, Letter>,
}

impl AnswerSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一道题的作答，覆盖之前的选择
    ///
    /// 作废题目、不存在的题号、题目未提供的字母都会被拒绝。
    pub fn select(&mut self, exam: &Exam, slot: u16, letter: Letter) -> Result<(), SessionError> {
        let question = exam.get(slot).ok_or(SessionError::UnknownSlot { slot })?;

        if question.canceled {
            return Err(SessionError::CanceledQuestion { slot });
        }
        if !question.offers(letter) {
            return Err(SessionError::LetterNotOffered {
                slot,
                letter: letter.as_char(),
            });
        }

        self.choices.insert(slot, letter);
        Ok(())
    }

    pub fn get(&self, slot: u16) -> Option<Letter> {
        self.choices.get(&slot).copied()
    }

    pub fn clear(&mut self) {
        self.choices.clear();
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

/// 评分结果
///
/// 只保存逐题对错和两个原始计数，比例只在展示时计算。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreResult {
    pub results: BTreeMap<u16, bool>,
    pub correct: usize,
    pub attempted: usize,
}

impl ScoreResult {
    pub fn is_correct(&self, slot: u16) -> Option<bool> {
        self.results.get(&slot).copied()
    }

    /// 正确率，未作答时为 None
    pub fn ratio(&self) -> Option<f64> {
        if self.attempted == 0 {
            None
        } else {
            Some(self.correct as f64 / self.attempted as f64)
        }
    }
}

impl std::fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.ratio() {
            Some(ratio) => write!(
                f,
                "答对 {}/{} ({:.1}%)",
                self.correct,
                self.attempted,
                ratio * 100.0
            ),
            None => write!(f, "答对 0/0"),
        }
    }
}
