use crate::services::error::ServiceError;

pub(crate) const MIN_OPTIONS_PER_QUESTION: usize = 2;
pub(crate) const MIN_CORRECT_OPTIONS_PER_QUESTION: usize = 1;

#[derive(Debug, Clone)]
pub(crate) struct DraftOption {
    pub(crate) text: String,
    pub(crate) correct: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct DraftQuestion {
    pub(crate) text: String,
    pub(crate) options: Vec<DraftOption>,
}

impl DraftQuestion {
    fn correct_count(&self) -> usize {
        self.options.iter().filter(|option| option.correct).count()
    }
}

pub(crate) fn check_question(question: &DraftQuestion) -> Result<(), ServiceError> {
    if question.options.len() < MIN_OPTIONS_PER_QUESTION {
        return Err(ServiceError::InvalidState(format!(
            "There must be at least {MIN_OPTIONS_PER_QUESTION} options for question '{}'",
            question.text
        )));
    }

    if question.correct_count() < MIN_CORRECT_OPTIONS_PER_QUESTION {
        return Err(ServiceError::InvalidState(format!(
            "There must be at least {MIN_CORRECT_OPTIONS_PER_QUESTION} correct option for question '{}'",
            question.text
        )));
    }

    Ok(())
}

/// Checks every question before anything is written; the first violation wins.
pub(crate) fn check_questions(questions: &[DraftQuestion]) -> Result<(), ServiceError> {
    questions.iter().try_for_each(check_question)
}
