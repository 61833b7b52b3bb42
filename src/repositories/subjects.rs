use time::PrimitiveDateTime;

use crate::db::models::Subject;

const COLUMNS: &str =
    "id, educator_id, name, description, created_at, updated_at, deleted_at";

pub(crate) struct CreateSubject<'a> {
    pub(crate) id: &'a str,
    pub(crate) educator_id: &'a str,
    pub(crate) name: &'a str,
    pub(crate) description: Option<&'a str>,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) struct UpdateSubject<'a> {
    pub(crate) name: &'a str,
    pub(crate) description: Option<&'a str>,
    pub(crate) updated_at: PrimitiveDateTime,
}

pub(crate) async fn create(
    executor: impl sqlx::PgExecutor<'_>,
    params: CreateSubject<'_>,
) -> Result<Subject, sqlx::Error> {
    sqlx::query_as::<_, Subject>(&format!(
        "INSERT INTO subjects (id, educator_id, name, description, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $5)
         RETURNING {COLUMNS}"
    ))
    .bind(params.id)
    .bind(params.educator_id)
    .bind(params.name)
    .bind(params.description)
    .bind(params.created_at)
    .fetch_one(executor)
    .await
}

pub(crate) async fn find_active_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    id: &str,
) -> Result<Option<Subject>, sqlx::Error> {
    sqlx::query_as::<_, Subject>(&format!(
        "SELECT {COLUMNS} FROM subjects WHERE id = $1 AND deleted_at IS NULL"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Soft-deleted rows included; attempt visibility still needs the owning educator.
pub(crate) async fn find_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    id: &str,
) -> Result<Option<Subject>, sqlx::Error> {
    sqlx::query_as::<_, Subject>(&format!("SELECT {COLUMNS} FROM subjects WHERE id = $1"))
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub(crate) async fn update(
    executor: impl sqlx::PgExecutor<'_>,
    id: &str,
    params: UpdateSubject<'_>,
) -> Result<Subject, sqlx::Error> {
    sqlx::query_as::<_, Subject>(&format!(
        "UPDATE subjects SET name = $1, description = $2, updated_at = $3
         WHERE id = $4 AND deleted_at IS NULL
         RETURNING {COLUMNS}"
    ))
    .bind(params.name)
    .bind(params.description)
    .bind(params.updated_at)
    .bind(id)
    .fetch_one(executor)
    .await
}

pub(crate) async fn soft_delete(
    executor: impl sqlx::PgExecutor<'_>,
    id: &str,
    now: PrimitiveDateTime,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE subjects SET deleted_at = $1, updated_at = $1 WHERE id = $2 AND deleted_at IS NULL",
    )
    .bind(now)
    .bind(id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub(crate) async fn list_active(
    executor: impl sqlx::PgExecutor<'_>,
    educator_id: Option<&str>,
    skip: i64,
    limit: i64,
) -> Result<Vec<Subject>, sqlx::Error> {
    sqlx::query_as::<_, Subject>(&format!(
        "SELECT {COLUMNS} FROM subjects
         WHERE deleted_at IS NULL AND ($1::text IS NULL OR educator_id = $1)
         ORDER BY created_at DESC, id
         OFFSET $2 LIMIT $3"
    ))
    .bind(educator_id)
    .bind(skip)
    .bind(limit)
    .fetch_all(executor)
    .await
}

pub(crate) async fn count_active(
    executor: impl sqlx::PgExecutor<'_>,
    educator_id: Option<&str>,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM subjects
         WHERE deleted_at IS NULL AND ($1::text IS NULL OR educator_id = $1)",
    )
    .bind(educator_id)
    .fetch_one(executor)
    .await
}
