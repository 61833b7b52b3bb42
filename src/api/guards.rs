use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};

use crate::api::errors::ApiError;
use crate::core::{security, state::AppState};
use crate::db::models::User;
use crate::repositories;

const BAD_CREDENTIALS: &str = "Invalid authentication credentials";

/// The authenticated, active caller resolved from `Authorization: Bearer <jwt>`.
pub(crate) struct CurrentUser(pub(crate) User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer(&parts.headers).ok_or(ApiError::Unauthorized(BAD_CREDENTIALS))?;
        let claims = security::decode_token(token, state.settings())
            .map_err(|_| ApiError::Unauthorized(BAD_CREDENTIALS))?;

        match repositories::users::find_by_id(state.db(), &claims.sub).await {
            Ok(Some(user)) if user.is_active => Ok(CurrentUser(user)),
            Ok(Some(_)) => Err(ApiError::Unauthorized(BAD_CREDENTIALS)),
            Ok(None) => Err(ApiError::Unauthorized("User not found")),
            Err(e) => Err(ApiError::internal(e, "Failed to load user")),
        }
    }
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
