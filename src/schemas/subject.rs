use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::pagination::default_limit;
use crate::core::time::format_primitive;
use crate::db::models::Subject;
use crate::schemas::not_blank;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct SubjectPayload {
    #[validate(
        custom(function = not_blank, message = "name must not be blank"),
        length(max = 1024, message = "name must be at most 1024 characters")
    )]
    pub(crate) name: String,
    #[serde(default)]
    #[validate(length(max = 1024, message = "description must be at most 1024 characters"))]
    pub(crate) description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubjectListQuery {
    #[serde(default, alias = "educatorId")]
    pub(crate) educator_id: Option<String>,
    #[serde(default)]
    pub(crate) skip: i64,
    #[serde(default = "default_limit")]
    pub(crate) limit: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubjectResponse {
    pub(crate) id: String,
    pub(crate) educator_id: String,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

impl SubjectResponse {
    pub(crate) fn from_db(subject: Subject) -> Self {
        Self {
            id: subject.id,
            educator_id: subject.educator_id,
            name: subject.name,
            description: subject.description,
            created_at: format_primitive(subject.created_at),
            updated_at: format_primitive(subject.updated_at),
        }
    }
}
