pub mod answer;
pub mod exam;
pub mod language;
pub mod loaders;
pub mod question;

pub use answer::{AnswerSelection, ScoreResult};
pub use exam::Exam;
pub use language::Language;
pub use loaders::{load_answer_sheet, AnswerSheet};
pub use question::{
    Alternative, AlternativeBody, ContextImage, Letter, Question, QuestionRecord,
    LOAD_FAILURE_NOTICE,
};
