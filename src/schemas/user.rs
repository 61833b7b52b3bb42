use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::types::UserRole;
use crate::schemas::not_blank;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct UserCreate {
    #[serde(alias = "firstName")]
    #[validate(
        custom(function = not_blank, message = "first_name must not be blank"),
        length(max = 255, message = "first_name is too long")
    )]
    pub(crate) first_name: String,
    #[serde(alias = "lastName")]
    #[validate(
        custom(function = not_blank, message = "last_name must not be blank"),
        length(max = 255, message = "last_name is too long")
    )]
    pub(crate) last_name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) role: UserRole,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserLogin {
    pub(crate) email: String,
    pub(crate) password: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct UserResponse {
    pub(crate) id: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) email: String,
    pub(crate) role: UserRole,
    pub(crate) is_active: bool,
    pub(crate) created_at: String,
}

impl UserResponse {
    pub(crate) fn from_db(user: crate::db::models::User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            created_at: format_primitive(user.created_at),
        }
    }
}
