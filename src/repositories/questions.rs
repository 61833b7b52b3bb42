use crate::db::models::{Question, QuestionOption};

const COLUMNS: &str = "id, test_id, text, position";
const OPTION_COLUMNS: &str = "o.id, o.question_id, o.text, o.correct, o.position";

pub(crate) async fn insert_question(
    executor: impl sqlx::PgExecutor<'_>,
    test_id: &str,
    text: &str,
    position: i32,
) -> Result<Question, sqlx::Error> {
    sqlx::query_as::<_, Question>(&format!(
        "INSERT INTO questions (test_id, text, position) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
    ))
    .bind(test_id)
    .bind(text)
    .bind(position)
    .fetch_one(executor)
    .await
}

pub(crate) async fn insert_option(
    executor: impl sqlx::PgExecutor<'_>,
    question_id: i64,
    text: &str,
    correct: bool,
    position: i32,
) -> Result<QuestionOption, sqlx::Error> {
    sqlx::query_as::<_, QuestionOption>(
        "INSERT INTO options (question_id, text, correct, position) VALUES ($1, $2, $3, $4)
         RETURNING id, question_id, text, correct, position",
    )
    .bind(question_id)
    .bind(text)
    .bind(correct)
    .bind(position)
    .fetch_one(executor)
    .await
}

pub(crate) async fn list_by_test(
    executor: impl sqlx::PgExecutor<'_>,
    test_id: &str,
) -> Result<Vec<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(&format!(
        "SELECT {COLUMNS} FROM questions WHERE test_id = $1 ORDER BY position, id"
    ))
    .bind(test_id)
    .fetch_all(executor)
    .await
}

pub(crate) async fn list_options_by_test(
    executor: impl sqlx::PgExecutor<'_>,
    test_id: &str,
) -> Result<Vec<QuestionOption>, sqlx::Error> {
    sqlx::query_as::<_, QuestionOption>(&format!(
        "SELECT {OPTION_COLUMNS} FROM options o
         JOIN questions q ON q.id = o.question_id
         WHERE q.test_id = $1
         ORDER BY o.question_id, o.position, o.id"
    ))
    .bind(test_id)
    .fetch_all(executor)
    .await
}

/// Options go with their questions through `ON DELETE CASCADE`.
pub(crate) async fn delete_by_test(
    executor: impl sqlx::PgExecutor<'_>,
    test_id: &str,
) -> Result<u64, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM questions WHERE test_id = $1").bind(test_id).execute(executor).await?;
    Ok(result.rows_affected())
}
