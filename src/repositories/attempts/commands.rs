use crate::db::models::{AttemptAnswer, AttemptQuestion, AttemptResult};

use super::types::CreateAttempt;

pub(crate) async fn create_result(
    executor: impl sqlx::PgExecutor<'_>,
    params: CreateAttempt<'_>,
) -> Result<AttemptResult, sqlx::Error> {
    sqlx::query_as::<_, AttemptResult>(
        "INSERT INTO attempt_results (id, user_id, test_id, score, max_score, created_at)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id, user_id, test_id, score, max_score, created_at",
    )
    .bind(params.id)
    .bind(params.user_id)
    .bind(params.test_id)
    .bind(params.score)
    .bind(params.max_score)
    .bind(params.created_at)
    .fetch_one(executor)
    .await
}

pub(crate) async fn create_question(
    executor: impl sqlx::PgExecutor<'_>,
    attempt_id: &str,
    question_id: i64,
    score: i32,
    max_score: i32,
) -> Result<AttemptQuestion, sqlx::Error> {
    sqlx::query_as::<_, AttemptQuestion>(
        "INSERT INTO attempt_questions (attempt_id, question_id, score, max_score)
         VALUES ($1, $2, $3, $4)
         RETURNING id, attempt_id, question_id, score, max_score",
    )
    .bind(attempt_id)
    .bind(question_id)
    .bind(score)
    .bind(max_score)
    .fetch_one(executor)
    .await
}

pub(crate) async fn create_answer(
    executor: impl sqlx::PgExecutor<'_>,
    attempt_question_id: i64,
    option_id: i64,
    correct: bool,
) -> Result<AttemptAnswer, sqlx::Error> {
    sqlx::query_as::<_, AttemptAnswer>(
        "INSERT INTO attempt_answers (attempt_question_id, option_id, correct)
         VALUES ($1, $2, $3)
         RETURNING id, attempt_question_id, option_id, correct",
    )
    .bind(attempt_question_id)
    .bind(option_id)
    .bind(correct)
    .fetch_one(executor)
    .await
}
