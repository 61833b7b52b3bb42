//! Attempt processing and result visibility.
//!
//! A submission is graded against the test's current question snapshot inside one
//! transaction; the result, its per-question rows and the frozen answers commit together
//! or not at all.

use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::core::metrics;
use crate::core::time::primitive_now_utc;
use crate::db::models::{Subject, User};
use crate::repositories;
use crate::repositories::attempts::{AttemptAnswerRow, AttemptQuestionRow, AttemptRow};
use crate::services::access;
use crate::services::error::ServiceError;
use crate::services::grading::{self, AttemptSubmission};
use crate::services::tests::load_snapshot;

#[derive(Debug, Clone)]
pub(crate) struct AttemptDetails {
    pub(crate) attempt: AttemptRow,
    pub(crate) questions: Vec<AttemptQuestionDetails>,
}

#[derive(Debug, Clone)]
pub(crate) struct AttemptQuestionDetails {
    pub(crate) question: AttemptQuestionRow,
    pub(crate) answers: Vec<AttemptAnswerRow>,
}

pub(crate) async fn process_attempt(
    db: &PgPool,
    test_id: &str,
    submission: &AttemptSubmission,
    user: &User,
) -> Result<AttemptDetails, ServiceError> {
    let mut tx = db.begin().await?;

    // Shared lock: concurrent attempts proceed, question-set replacement waits.
    let test = repositories::tests::find_active_for_share(&mut *tx, test_id)
        .await?
        .ok_or_else(|| ServiceError::missing("Test", test_id))?;
    let snapshot = load_snapshot(&mut tx, test).await?;

    let graded = grading::grade_attempt(&snapshot.questions, submission).map_err(|err| {
        metrics::record_attempt_rejected(err.reason());
        tracing::warn!(
            user_id = %user.id,
            test_id,
            reason = err.reason(),
            error = %err,
            action = "attempt_process",
            "Attempt rejected"
        );
        ServiceError::InvalidState(err.to_string())
    })?;

    let attempt_id = Uuid::new_v4().to_string();
    repositories::attempts::create_result(
        &mut *tx,
        repositories::attempts::CreateAttempt {
            id: &attempt_id,
            user_id: &user.id,
            test_id: &snapshot.test.id,
            score: graded.score,
            max_score: graded.max_score,
            created_at: primitive_now_utc(),
        },
    )
    .await?;

    for question in &graded.questions {
        let stored = repositories::attempts::create_question(
            &mut *tx,
            &attempt_id,
            question.question_id,
            question.score,
            question.max_score,
        )
        .await?;

        for answer in &question.answers {
            repositories::attempts::create_answer(&mut *tx, stored.id, answer.option_id, answer.correct)
                .await?;
        }
    }

    let details = load_single(&mut tx, &attempt_id).await?;
    tx.commit().await?;

    metrics::record_attempt_graded(graded.score, graded.max_score);
    tracing::info!(
        user_id = %user.id,
        test_id,
        attempt_id = %attempt_id,
        score = graded.score,
        max_score = graded.max_score,
        action = "attempt_process",
        "Attempt graded"
    );

    Ok(details)
}

pub(crate) async fn get_attempt_by_id(
    db: &PgPool,
    attempt_id: &str,
    user: &User,
) -> Result<AttemptDetails, ServiceError> {
    let mut conn = db.acquire().await?;

    let attempt = repositories::attempts::find_by_id(&mut *conn, attempt_id)
        .await?
        .ok_or_else(|| ServiceError::missing("Attempt", attempt_id))?;

    let subject = repositories::subjects::find_by_id(&mut *conn, &attempt.subject_id).await?;
    ensure_can_view(&attempt, subject.as_ref(), user)?;

    let mut details = load_details(&mut conn, vec![attempt]).await?;
    details.pop().ok_or_else(|| ServiceError::missing("Attempt", attempt_id))
}

/// A subject that vanished from under its attempt is reported like any missing parent.
fn ensure_can_view(attempt: &AttemptRow, subject: Option<&Subject>, user: &User) -> Result<(), ServiceError> {
    let subject = subject.ok_or_else(|| ServiceError::missing("Subject", &attempt.subject_id))?;

    if !access::can_view_attempt(&attempt.user_id, &subject.educator_id, user) {
        tracing::warn!(user_id = %user.id, attempt_id = %attempt.id, action = "attempt_view", "Rejected: no access");
        return Err(ServiceError::Forbidden(
            "Not enough permissions to access the attempt result".to_string(),
        ));
    }
    Ok(())
}

/// All attempts against a test, for the educator owning the test's subject. Deleted tests
/// keep their attempts readable.
pub(crate) async fn get_attempts_by_test_id(
    db: &PgPool,
    test_id: &str,
    user: &User,
) -> Result<Vec<AttemptDetails>, ServiceError> {
    let mut conn = db.acquire().await?;

    let test = repositories::tests::find_by_id(&mut *conn, test_id)
        .await?
        .ok_or_else(|| ServiceError::missing("Test", test_id))?;
    let subject = repositories::subjects::find_by_id(&mut *conn, &test.subject_id)
        .await?
        .ok_or_else(|| ServiceError::missing("Subject", &test.subject_id))?;

    if !access::owns_subject(&subject, user) {
        tracing::warn!(user_id = %user.id, test_id, action = "attempt_list", "Rejected: not the owner");
        return Err(ServiceError::Forbidden("Not an educator of the test subject".to_string()));
    }

    let rows = repositories::attempts::list_by_test(&mut *conn, &test.id).await?;
    load_details(&mut conn, rows).await
}

pub(crate) async fn get_attempts_by_user(
    db: &PgPool,
    user: &User,
) -> Result<Vec<AttemptDetails>, ServiceError> {
    let mut conn = db.acquire().await?;
    let rows = repositories::attempts::list_by_user(&mut *conn, &user.id).await?;
    load_details(&mut conn, rows).await
}

async fn load_single(
    conn: &mut PgConnection,
    attempt_id: &str,
) -> Result<AttemptDetails, ServiceError> {
    let attempt = repositories::attempts::find_by_id(&mut *conn, attempt_id)
        .await?
        .ok_or_else(|| ServiceError::missing("Attempt", attempt_id))?;
    let mut details = load_details(conn, vec![attempt]).await?;
    details.pop().ok_or_else(|| ServiceError::missing("Attempt", attempt_id))
}

async fn load_details(
    conn: &mut PgConnection,
    attempts: Vec<AttemptRow>,
) -> Result<Vec<AttemptDetails>, ServiceError> {
    let ids: Vec<String> = attempts.iter().map(|attempt| attempt.id.clone()).collect();
    let questions = repositories::attempts::list_questions_for_attempts(&mut *conn, &ids).await?;
    let answers = repositories::attempts::list_answers_for_attempts(&mut *conn, &ids).await?;
    Ok(assemble(attempts, questions, answers))
}

fn assemble(
    attempts: Vec<AttemptRow>,
    questions: Vec<AttemptQuestionRow>,
    answers: Vec<AttemptAnswerRow>,
) -> Vec<AttemptDetails> {
    let mut answers_by_question: HashMap<i64, Vec<AttemptAnswerRow>> = HashMap::new();
    for answer in answers {
        answers_by_question.entry(answer.attempt_question_id).or_default().push(answer);
    }

    let mut questions_by_attempt: HashMap<String, Vec<AttemptQuestionDetails>> = HashMap::new();
    for question in questions {
        let answers = answers_by_question.remove(&question.id).unwrap_or_default();
        questions_by_attempt
            .entry(question.attempt_id.clone())
            .or_default()
            .push(AttemptQuestionDetails { question, answers });
    }

    attempts
        .into_iter()
        .map(|attempt| {
            let questions = questions_by_attempt.remove(&attempt.id).unwrap_or_default();
            AttemptDetails { attempt, questions }
        })
        .collect()
}
