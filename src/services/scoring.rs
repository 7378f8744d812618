//! 评分服务 - 业务能力层
//!
//! 只根据试卷和作答计算结果，没有副作用。

use crate::models::{AnswerSelection, Exam, ScoreResult};

/// 计算得分
///
/// 作废题目不计入分子也不计入分母；未作答的题目同样不计入。
pub fn score(exam: &Exam, selections: &AnswerSelection) -> ScoreResult {
    let mut result = ScoreResult::default();

    for question in exam.questions().filter(|q| !q.canceled) {
        let Some(letter) = selections.get(question.slot) else {
            continue;
        };
        let Some(correct) = question.is_correct(letter) else {
            continue;
        };

        result.results.insert(question.slot, correct);
        result.attempted += 1;
        if correct {
            result.correct += 1;
        }
    }

    result
}
