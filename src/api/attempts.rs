use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::api::validation::validate_payload;
use crate::core::state::AppState;
use crate::schemas::attempt::{AttemptPayload, AttemptResponse};
use crate::services::attempts::{self, AttemptDetails};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/tests/:test_id/attempts", get(list_test_attempts).post(submit_attempt))
        .route("/attempts", get(list_my_attempts))
        .route("/attempts/:attempt_id", get(get_attempt))
}

async fn submit_attempt(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(test_id): Path<String>,
    Json(payload): Json<AttemptPayload>,
) -> Result<(StatusCode, Json<AttemptResponse>), ApiError> {
    validate_payload(&payload)?;
    let submission = payload.into_submission();
    let details = attempts::process_attempt(state.db(), &test_id, &submission, &user).await?;
    Ok((StatusCode::CREATED, Json(AttemptResponse::from_details(details))))
}

async fn list_test_attempts(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(test_id): Path<String>,
) -> Result<Json<Vec<AttemptResponse>>, ApiError> {
    let details = attempts::get_attempts_by_test_id(state.db(), &test_id, &user).await?;
    Ok(Json(views(details)))
}

async fn list_my_attempts(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<AttemptResponse>>, ApiError> {
    let details = attempts::get_attempts_by_user(state.db(), &user).await?;
    Ok(Json(views(details)))
}

async fn get_attempt(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(attempt_id): Path<String>,
) -> Result<Json<AttemptResponse>, ApiError> {
    let details = attempts::get_attempt_by_id(state.db(), &attempt_id, &user).await?;
    Ok(Json(AttemptResponse::from_details(details)))
}

fn views(details: Vec<AttemptDetails>) -> Vec<AttemptResponse> {
    details.into_iter().map(AttemptResponse::from_details).collect()
}

#[cfg(test)]
mod flows;
