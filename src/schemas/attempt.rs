use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::services::attempts::{AttemptDetails, AttemptQuestionDetails};
use crate::services::grading::{AttemptSubmission, QuestionSubmission};

/// Upper bound on selections per question; far above any authored option count.
pub(crate) const MAX_ANSWERS_PER_QUESTION: u64 = 256;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct AttemptPayload {
    #[serde(default)]
    #[validate(nested)]
    pub(crate) questions: Vec<AttemptQuestionPayload>,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct AttemptQuestionPayload {
    #[serde(alias = "questionId")]
    pub(crate) question_id: i64,
    #[serde(default)]
    #[validate(length(max = MAX_ANSWERS_PER_QUESTION, message = "Too many answers for one question"))]
    pub(crate) answers: Vec<AttemptAnswerPayload>,
}

#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct AttemptAnswerPayload {
    #[serde(alias = "optionId")]
    pub(crate) option_id: i64,
}

impl AttemptPayload {
    pub(crate) fn into_submission(self) -> AttemptSubmission {
        AttemptSubmission {
            questions: self
                .questions
                .into_iter()
                .map(|question| QuestionSubmission {
                    question_id: question.question_id,
                    option_ids: question.answers.into_iter().map(|answer| answer.option_id).collect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AttemptResponse {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) test_id: String,
    pub(crate) test_name: String,
    pub(crate) questions: Vec<AttemptQuestionResponse>,
    pub(crate) score: i32,
    pub(crate) max_score: i32,
    pub(crate) created_at: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AttemptQuestionResponse {
    pub(crate) question_id: i64,
    pub(crate) question_text: String,
    pub(crate) score: i32,
    pub(crate) max_score: i32,
    pub(crate) answers: Vec<AttemptAnswerResponse>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AttemptAnswerResponse {
    pub(crate) option_id: i64,
    pub(crate) option_text: String,
    pub(crate) correct: bool,
}

impl AttemptResponse {
    pub(crate) fn from_details(details: AttemptDetails) -> Self {
        let attempt = details.attempt;
        Self {
            id: attempt.id,
            user_id: attempt.user_id,
            test_id: attempt.test_id,
            test_name: attempt.test_name,
            questions: details.questions.into_iter().map(AttemptQuestionResponse::from_details).collect(),
            score: attempt.score,
            max_score: attempt.max_score,
            created_at: format_primitive(attempt.created_at),
        }
    }
}

impl AttemptQuestionResponse {
    fn from_details(details: AttemptQuestionDetails) -> Self {
        Self {
            question_id: details.question.question_id,
            question_text: details.question.question_text,
            score: details.question.score,
            max_score: details.question.max_score,
            answers: details
                .answers
                .into_iter()
                .map(|answer| AttemptAnswerResponse {
                    option_id: answer.option_id,
                    option_text: answer.option_text,
                    correct: answer.correct,
                })
                .collect(),
        }
    }
}
