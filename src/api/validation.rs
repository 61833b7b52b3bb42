use validator::Validate;

use crate::api::errors::ApiError;

pub(crate) const MIN_PASSWORD_LEN: usize = 8;
pub(crate) const MIN_QUESTIONS_PER_TEST: usize = 2;
pub(crate) const MAX_PAGE_LIMIT: i64 = 1000;

pub(crate) fn validate_payload(payload: &impl Validate) -> Result<(), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))
}

pub(crate) fn validate_password_len(password: &str) -> Result<(), ApiError> {
    if password.chars().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )))
    }
}

pub(crate) fn validate_question_count(count: usize) -> Result<(), ApiError> {
    if count >= MIN_QUESTIONS_PER_TEST {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!(
            "Test must contain at least {MIN_QUESTIONS_PER_TEST} questions"
        )))
    }
}

pub(crate) fn validate_page(skip: i64, limit: i64) -> Result<(), ApiError> {
    if skip < 0 {
        return Err(ApiError::BadRequest("skip must be non-negative".to_string()));
    }
    if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
        return Err(ApiError::BadRequest(format!(
            "limit must be between 1 and {MAX_PAGE_LIMIT}"
        )));
    }
    Ok(())
}
