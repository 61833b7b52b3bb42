//! Scores one submission against a test's question snapshot.
//!
//! Grading walks the test's questions, not the submission: an unanswered question scores
//! zero, and submitted entries for questions the test does not ask are ignored. Structural
//! problems inside an answered question (too many selections, an option that is not part
//! of the question) reject the whole attempt.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::services::tests::QuestionWithOptions;

#[derive(Debug, Clone, Default)]
pub(crate) struct AttemptSubmission {
    pub(crate) questions: Vec<QuestionSubmission>,
}

#[derive(Debug, Clone)]
pub(crate) struct QuestionSubmission {
    pub(crate) question_id: i64,
    pub(crate) option_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum GradingError {
    #[error("Invalid number of answers. Require no more than {max}")]
    TooManyAnswers { question_id: i64, max: usize },
    #[error("No such option: {option_id}")]
    UnknownOption { question_id: i64, option_id: i64 },
}

impl GradingError {
    pub(crate) fn reason(&self) -> &'static str {
        match self {
            Self::TooManyAnswers { .. } => "too_many_answers",
            Self::UnknownOption { .. } => "unknown_option",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GradedAnswer {
    pub(crate) option_id: i64,
    /// Correctness of the option at grading time; never recomputed.
    pub(crate) correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GradedQuestion {
    pub(crate) question_id: i64,
    pub(crate) score: i32,
    pub(crate) max_score: i32,
    pub(crate) answers: Vec<GradedAnswer>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GradedAttempt {
    pub(crate) questions: Vec<GradedQuestion>,
    pub(crate) score: i32,
    pub(crate) max_score: i32,
}

pub(crate) fn grade_attempt(
    questions: &[QuestionWithOptions],
    submission: &AttemptSubmission,
) -> Result<GradedAttempt, GradingError> {
    // Later entries for an already answered question are ignored.
    let mut by_question: HashMap<i64, &QuestionSubmission> = HashMap::new();
    for entry in &submission.questions {
        by_question.entry(entry.question_id).or_insert(entry);
    }

    let graded = questions
        .iter()
        .map(|question| grade_question(question, by_question.get(&question.question.id).copied()))
        .collect::<Result<Vec<_>, _>>()?;

    let score = graded.iter().map(|question| question.score).sum();
    let max_score = graded.iter().map(|question| question.max_score).sum();

    Ok(GradedAttempt { questions: graded, score, max_score })
}

fn grade_question(
    question: &QuestionWithOptions,
    submitted: Option<&QuestionSubmission>,
) -> Result<GradedQuestion, GradingError> {
    let question_id = question.question.id;
    let correct_count = question.correct_count();
    let max_score = count_as_score(correct_count);

    let Some(submitted) = submitted else {
        return Ok(GradedQuestion { question_id, score: 0, max_score, answers: Vec::new() });
    };

    // Selections are a set; repeating an option id does not select it twice. Stops at the
    // first id past the correct-option count.
    let mut seen = HashSet::with_capacity(correct_count);
    let mut selected = Vec::with_capacity(correct_count);
    for &option_id in &submitted.option_ids {
        if !seen.insert(option_id) {
            continue;
        }
        if selected.len() == correct_count {
            return Err(GradingError::TooManyAnswers { question_id, max: correct_count });
        }
        selected.push(option_id);
    }

    let answers = selected
        .into_iter()
        .map(|option_id| {
            question
                .options
                .iter()
                .find(|option| option.id == option_id)
                .map(|option| GradedAnswer { option_id, correct: option.correct })
                .ok_or(GradingError::UnknownOption { question_id, option_id })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let score = count_as_score(answers.iter().filter(|answer| answer.correct).count());

    Ok(GradedQuestion { question_id, score, max_score, answers })
}

fn count_as_score(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}
