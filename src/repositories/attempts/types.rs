use time::PrimitiveDateTime;

/// Result columns joined with the attempted test, whatever its soft-delete state.
pub(crate) const COLUMNS: &str = "\
    a.id, a.user_id, a.test_id, t.name AS test_name, t.subject_id, \
    a.score, a.max_score, a.created_at";

#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct AttemptRow {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) test_id: String,
    pub(crate) test_name: String,
    pub(crate) subject_id: String,
    pub(crate) score: i32,
    pub(crate) max_score: i32,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct AttemptQuestionRow {
    pub(crate) id: i64,
    pub(crate) attempt_id: String,
    pub(crate) question_id: i64,
    pub(crate) question_text: String,
    pub(crate) score: i32,
    pub(crate) max_score: i32,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct AttemptAnswerRow {
    pub(crate) attempt_question_id: i64,
    pub(crate) option_id: i64,
    pub(crate) option_text: String,
    pub(crate) correct: bool,
}

pub(crate) struct CreateAttempt<'a> {
    pub(crate) id: &'a str,
    pub(crate) user_id: &'a str,
    pub(crate) test_id: &'a str,
    pub(crate) score: i32,
    pub(crate) max_score: i32,
    pub(crate) created_at: PrimitiveDateTime,
}
