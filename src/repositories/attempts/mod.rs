mod commands;
mod queries;
mod types;

pub(crate) use commands::{create_answer, create_question, create_result};
pub(crate) use queries::{
    exists_for_test, find_by_id, list_answers_for_attempts, list_by_test, list_by_user,
    list_questions_for_attempts,
};
pub(crate) use types::{AttemptAnswerRow, AttemptQuestionRow, AttemptRow, CreateAttempt};
