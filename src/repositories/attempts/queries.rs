use super::types::{AttemptAnswerRow, AttemptQuestionRow, AttemptRow, COLUMNS};

pub(crate) async fn find_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    id: &str,
) -> Result<Option<AttemptRow>, sqlx::Error> {
    sqlx::query_as::<_, AttemptRow>(&format!(
        "SELECT {COLUMNS} FROM attempt_results a JOIN tests t ON t.id = a.test_id WHERE a.id = $1"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub(crate) async fn list_by_user(
    executor: impl sqlx::PgExecutor<'_>,
    user_id: &str,
) -> Result<Vec<AttemptRow>, sqlx::Error> {
    sqlx::query_as::<_, AttemptRow>(&format!(
        "SELECT {COLUMNS} FROM attempt_results a JOIN tests t ON t.id = a.test_id
         WHERE a.user_id = $1
         ORDER BY a.created_at DESC, a.id"
    ))
    .bind(user_id)
    .fetch_all(executor)
    .await
}

pub(crate) async fn list_by_test(
    executor: impl sqlx::PgExecutor<'_>,
    test_id: &str,
) -> Result<Vec<AttemptRow>, sqlx::Error> {
    sqlx::query_as::<_, AttemptRow>(&format!(
        "SELECT {COLUMNS} FROM attempt_results a JOIN tests t ON t.id = a.test_id
         WHERE a.test_id = $1
         ORDER BY a.created_at DESC, a.id"
    ))
    .bind(test_id)
    .fetch_all(executor)
    .await
}

pub(crate) async fn exists_for_test(
    executor: impl sqlx::PgExecutor<'_>,
    test_id: &str,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM attempt_results WHERE test_id = $1)")
        .bind(test_id)
        .fetch_one(executor)
        .await
}

pub(crate) async fn list_questions_for_attempts(
    executor: impl sqlx::PgExecutor<'_>,
    attempt_ids: &[String],
) -> Result<Vec<AttemptQuestionRow>, sqlx::Error> {
    if attempt_ids.is_empty() {
        return Ok(Vec::new());
    }

    sqlx::query_as::<_, AttemptQuestionRow>(
        "SELECT aq.id, aq.attempt_id, aq.question_id, q.text AS question_text,
                aq.score, aq.max_score
         FROM attempt_questions aq
         JOIN questions q ON q.id = aq.question_id
         WHERE aq.attempt_id = ANY($1)
         ORDER BY q.position, aq.id",
    )
    .bind(attempt_ids)
    .fetch_all(executor)
    .await
}

pub(crate) async fn list_answers_for_attempts(
    executor: impl sqlx::PgExecutor<'_>,
    attempt_ids: &[String],
) -> Result<Vec<AttemptAnswerRow>, sqlx::Error> {
    if attempt_ids.is_empty() {
        return Ok(Vec::new());
    }

    sqlx::query_as::<_, AttemptAnswerRow>(
        "SELECT aa.attempt_question_id, aa.option_id, o.text AS option_text, aa.correct
         FROM attempt_answers aa
         JOIN attempt_questions aq ON aq.id = aa.attempt_question_id
         JOIN options o ON o.id = aa.option_id
         WHERE aq.attempt_id = ANY($1)
         ORDER BY o.position, aa.id",
    )
    .bind(attempt_ids)
    .fetch_all(executor)
    .await
}
