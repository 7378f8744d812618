//! 试卷聚合 - 业务能力层
//!
//! 把一批获取结果（成功题目或占位题目）按题号并入试卷。

use crate::models::{Exam, Question};

/// 将一批结果并入试卷，返回新的试卷
///
/// 同一题号再次插入时覆盖旧值。
pub fn insert(mut exam: Exam, outcomes: impl IntoIterator<Item = Question>) -> Exam {
    for question in outcomes {
        exam.put(question);
    }
    exam
}

/// 试卷是否已包含 1..=total_slots 的全部题目
pub fn is_complete(exam: &Exam, total_slots: u16) -> bool {
    exam.len() == usize::from(total_slots) && (1..=total_slots).all(|slot| exam.get(slot).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_orders_by_slot() {
        let exam = Exam::new(2020, None);
        let exam = insert(
            exam,
            vec![
                Question::placeholder(3, 2020, None),
                Question::placeholder(1, 2020, None),
            ],
        );
        let exam = insert(exam, vec![Question::placeholder(2, 2020, None)]);

        let slots: Vec<u16> = exam.slots().collect();
        assert_eq!(slots, vec![1, 2, 3]);
        assert!(is_complete(&exam, 3));
        assert!(!is_complete(&exam, 4));
    }

    #[test]
    fn test_is_complete_requires_exact_range() {
        let exam = insert(
            Exam::new(2020, None),
            vec![
                Question::placeholder(1, 2020, None),
                Question::placeholder(3, 2020, None),
            ],
        );
        assert!(!is_complete(&exam, 2));
        assert!(is_complete(&Exam::new(2020, None), 0));
    }

    #[test]
    fn test_reinsert_overwrites() {
        let exam = insert(Exam::new(2020, None), vec![Question::placeholder(1, 2020, None)]);

        let mut replacement = Question::placeholder(1, 2020, None);
        replacement.title = "Questão 1 - ENEM 2020".to_string();
        replacement.canceled = false;
        let exam = insert(exam, vec![replacement]);

        assert_eq!(exam.len(), 1);
        assert_eq!(exam.get(1).unwrap().title, "Questão 1 - ENEM 2020");
        assert!(!exam.get(1).unwrap().canceled);
    }
}
