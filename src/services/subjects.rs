use sqlx::PgPool;
use uuid::Uuid;

use crate::core::time::primitive_now_utc;
use crate::db::models::{Subject, User};
use crate::db::types::UserRole;
use crate::repositories;
use crate::services::access;
use crate::services::error::ServiceError;

#[derive(Debug, Clone, Copy)]
pub(crate) struct SubjectInput<'a> {
    pub(crate) name: &'a str,
    pub(crate) description: Option<&'a str>,
}

#[derive(Debug)]
pub(crate) struct SubjectPage {
    pub(crate) items: Vec<Subject>,
    pub(crate) total_count: i64,
}

pub(crate) async fn create_subject(
    db: &PgPool,
    input: SubjectInput<'_>,
    educator: &User,
) -> Result<Subject, ServiceError> {
    if !access::is_educator(educator) {
        tracing::warn!(user_id = %educator.id, action = "subject_create", "Rejected: not an educator");
        return Err(ServiceError::Forbidden("Only educator can create subjects".to_string()));
    }

    let subject = repositories::subjects::create(
        db,
        repositories::subjects::CreateSubject {
            id: &Uuid::new_v4().to_string(),
            educator_id: &educator.id,
            name: input.name,
            description: input.description,
            created_at: primitive_now_utc(),
        },
    )
    .await?;

    tracing::info!(
        user_id = %educator.id,
        subject_id = %subject.id,
        action = "subject_create",
        "Subject created"
    );

    Ok(subject)
}

pub(crate) async fn update_subject(
    db: &PgPool,
    subject_id: &str,
    input: SubjectInput<'_>,
    user: &User,
) -> Result<Subject, ServiceError> {
    let subject = get_subject_entity(db, subject_id).await?;
    if !access::owns_subject(&subject, user) {
        tracing::warn!(user_id = %user.id, subject_id, action = "subject_update", "Rejected: not the owner");
        return Err(ServiceError::Forbidden("Not a subject educator".to_string()));
    }

    let updated = repositories::subjects::update(
        db,
        &subject.id,
        repositories::subjects::UpdateSubject {
            name: input.name,
            description: input.description,
            updated_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|err| match err {
        // Deleted between the lookup and the write.
        sqlx::Error::RowNotFound => ServiceError::missing("Subject", subject_id),
        other => ServiceError::Database(other),
    })?;

    tracing::info!(user_id = %user.id, subject_id, action = "subject_update", "Subject updated");
    Ok(updated)
}

/// Soft delete. Contained tests become unreachable through the active-test lookups while
/// their rows and any attempts against them remain.
pub(crate) async fn delete_subject(
    db: &PgPool,
    subject_id: &str,
    user: &User,
) -> Result<(), ServiceError> {
    let mut tx = db.begin().await?;

    let subject = get_subject_entity(&mut *tx, subject_id).await?;
    if !access::owns_subject(&subject, user) {
        tracing::warn!(user_id = %user.id, subject_id, action = "subject_delete", "Rejected: not the owner");
        return Err(ServiceError::Forbidden("Not a subject educator".to_string()));
    }

    if !repositories::subjects::soft_delete(&mut *tx, &subject.id, primitive_now_utc()).await? {
        return Err(ServiceError::missing("Subject", subject_id));
    }
    tx.commit().await?;

    tracing::info!(user_id = %user.id, subject_id, action = "subject_delete", "Subject deleted");
    Ok(())
}

pub(crate) async fn get_subject_by_id(db: &PgPool, subject_id: &str) -> Result<Subject, ServiceError> {
    get_subject_entity(db, subject_id).await
}

pub(crate) async fn get_subject_entity(
    executor: impl sqlx::PgExecutor<'_>,
    subject_id: &str,
) -> Result<Subject, ServiceError> {
    repositories::subjects::find_active_by_id(executor, subject_id)
        .await?
        .ok_or_else(|| ServiceError::missing("Subject", subject_id))
}

pub(crate) async fn get_subject_entity_and_verify_educator(
    executor: impl sqlx::PgExecutor<'_>,
    subject_id: &str,
    user: &User,
) -> Result<Subject, ServiceError> {
    let subject = get_subject_entity(executor, subject_id).await?;
    if !access::owns_subject(&subject, user) {
        return Err(ServiceError::Forbidden("Not an educator of the given subject".to_string()));
    }
    Ok(subject)
}

pub(crate) async fn list_subjects(
    db: &PgPool,
    skip: i64,
    limit: i64,
) -> Result<SubjectPage, ServiceError> {
    let items = repositories::subjects::list_active(db, None, skip, limit).await?;
    let total_count = repositories::subjects::count_active(db, None).await?;
    Ok(SubjectPage { items, total_count })
}

pub(crate) async fn list_subjects_by_educator(
    db: &PgPool,
    educator_id: &str,
    skip: i64,
    limit: i64,
) -> Result<SubjectPage, ServiceError> {
    repositories::users::find_by_id_and_role(db, educator_id, UserRole::Educator)
        .await?
        .ok_or_else(|| ServiceError::missing("User", educator_id))?;

    let items = repositories::subjects::list_active(db, Some(educator_id), skip, limit).await?;
    let total_count = repositories::subjects::count_active(db, Some(educator_id)).await?;
    Ok(SubjectPage { items, total_count })
}
