//! Ownership and visibility predicates. They only compare identities; loading the
//! entities they inspect is the caller's job.

use crate::db::models::{Subject, User};
use crate::db::types::UserRole;

pub(crate) fn is_educator(user: &User) -> bool {
    user.role == UserRole::Educator
}

pub(crate) fn owns_subject(subject: &Subject, user: &User) -> bool {
    subject.educator_id == user.id
}

/// The test-taker and the educator owning the attempted test's subject may read a result.
pub(crate) fn can_view_attempt(attempt_user_id: &str, subject_educator_id: &str, user: &User) -> bool {
    attempt_user_id == user.id || subject_educator_id == user.id
}
