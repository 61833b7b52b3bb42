use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::api::pagination::PaginatedResponse;
use crate::api::validation::{validate_page, validate_payload};
use crate::core::state::AppState;
use crate::schemas::subject::{SubjectListQuery, SubjectPayload, SubjectResponse};
use crate::services::subjects::{self, SubjectInput};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/subjects", get(list_subjects).post(create_subject))
        .route(
            "/subjects/:subject_id",
            get(get_subject).put(update_subject).delete(delete_subject),
        )
}

async fn create_subject(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(payload): Json<SubjectPayload>,
) -> Result<(StatusCode, Json<SubjectResponse>), ApiError> {
    validate_payload(&payload)?;

    let subject = subjects::create_subject(state.db(), input(&payload), &user).await?;
    Ok((StatusCode::CREATED, Json(SubjectResponse::from_db(subject))))
}

async fn list_subjects(
    CurrentUser(_user): CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<SubjectListQuery>,
) -> Result<Json<PaginatedResponse<SubjectResponse>>, ApiError> {
    validate_page(query.skip, query.limit)?;

    let page = match query.educator_id.as_deref() {
        Some(educator_id) => {
            subjects::list_subjects_by_educator(state.db(), educator_id, query.skip, query.limit)
                .await?
        }
        None => subjects::list_subjects(state.db(), query.skip, query.limit).await?,
    };

    Ok(Json(PaginatedResponse::map_from(
        page.items,
        page.total_count,
        query.skip,
        query.limit,
        SubjectResponse::from_db,
    )))
}

async fn get_subject(
    CurrentUser(_user): CurrentUser,
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
) -> Result<Json<SubjectResponse>, ApiError> {
    let subject = subjects::get_subject_by_id(state.db(), &subject_id).await?;
    Ok(Json(SubjectResponse::from_db(subject)))
}

async fn update_subject(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
    Json(payload): Json<SubjectPayload>,
) -> Result<Json<SubjectResponse>, ApiError> {
    validate_payload(&payload)?;

    let subject =
        subjects::update_subject(state.db(), &subject_id, input(&payload), &user).await?;
    Ok(Json(SubjectResponse::from_db(subject)))
}

async fn delete_subject(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    subjects::delete_subject(state.db(), &subject_id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn input(payload: &SubjectPayload) -> SubjectInput<'_> {
    SubjectInput { name: payload.name.trim(), description: payload.description.as_deref() }
}
