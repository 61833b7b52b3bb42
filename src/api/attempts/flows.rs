use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::db::models::{Subject, User};
use crate::db::types::UserRole;
use crate::services::tests::TestSnapshot;
use crate::test_support::{self, TestContext};

struct Fixture {
    educator: User,
    student: User,
    subject: Subject,
    snapshot: TestSnapshot,
}

impl Fixture {
    async fn seed(ctx: &TestContext) -> Self {
        let db = ctx.state.db();
        let educator = test_support::insert_user(db, "edu@example.com", UserRole::Educator).await;
        let student = test_support::insert_user(db, "stud@example.com", UserRole::Student).await;
        let subject = test_support::insert_subject(db, &educator, "Math").await;
        let snapshot = test_support::insert_test(
            db,
            &subject,
            &educator,
            &test_support::two_question_drafts(),
        )
        .await;
        Self { educator, student, subject, snapshot }
    }

    /// Option ids of question `index`, correct ones first as seeded.
    fn options(&self, index: usize) -> Vec<i64> {
        self.snapshot.questions[index].options.iter().map(|option| option.id).collect()
    }

    fn question_id(&self, index: usize) -> i64 {
        self.snapshot.questions[index].question.id
    }

    fn answers(&self, picks: &[(usize, Vec<i64>)]) -> Value {
        let questions: Vec<Value> = picks
            .iter()
            .map(|(index, option_ids)| {
                json!({
                    "question_id": self.question_id(*index),
                    "answers": option_ids
                        .iter()
                        .map(|option_id| json!({ "option_id": option_id }))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        json!({ "questions": questions })
    }
}

async fn submit(ctx: &TestContext, user: &User, test_id: &str, body: Value) -> (StatusCode, Value) {
    let token = test_support::bearer_token(&user.id, ctx.state.settings());
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            &format!("/api/v1/tests/{test_id}/attempts"),
            Some(&token),
            Some(body),
        ))
        .await
        .expect("submit attempt");
    let status = response.status();
    (status, test_support::read_json(response).await)
}

async fn get(ctx: &TestContext, user: &User, uri: &str) -> (StatusCode, Value) {
    let token = test_support::bearer_token(&user.id, ctx.state.settings());
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, uri, Some(&token), None))
        .await
        .expect("get");
    let status = response.status();
    (status, test_support::read_json(response).await)
}

async fn stored_attempts(ctx: &TestContext) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM attempt_results")
        .fetch_one(ctx.state.db())
        .await
        .expect("count attempts")
}

#[tokio::test]
async fn all_correct_answers_score_full_marks() {
    let Some(ctx) = test_support::setup_test_context().await else {
        return;
    };
    let fx = Fixture::seed(&ctx).await;
    let (q1, q2) = (fx.options(0), fx.options(1));

    let body = fx.answers(&[(0, vec![q1[0]]), (1, vec![q2[0], q2[1]])]);
    let (status, attempt) = submit(&ctx, &fx.student, &fx.snapshot.test.id, body).await;

    assert_eq!(status, StatusCode::CREATED, "response: {attempt}");
    assert_eq!(attempt["score"], 3);
    assert_eq!(attempt["max_score"], 3);
    assert_eq!(attempt["user_id"], fx.student.id.as_str());
    assert_eq!(attempt["test_name"], "Seeded test");
    assert_eq!(attempt["questions"][1]["answers"].as_array().expect("answers").len(), 2);
    assert_eq!(attempt["questions"][1]["answers"][0]["correct"], true);
}

#[tokio::test]
async fn partially_correct_answers_score_partially() {
    let Some(ctx) = test_support::setup_test_context().await else {
        return;
    };
    let fx = Fixture::seed(&ctx).await;
    let (q1, q2) = (fx.options(0), fx.options(1));

    let body = fx.answers(&[(0, vec![q1[0]]), (1, vec![q2[0]])]);
    let (status, attempt) = submit(&ctx, &fx.student, &fx.snapshot.test.id, body).await;

    assert_eq!(status, StatusCode::CREATED, "response: {attempt}");
    assert_eq!(attempt["score"], 2);
    assert_eq!(attempt["max_score"], 3);
    assert_eq!(attempt["questions"][1]["score"], 1);
    assert_eq!(attempt["questions"][1]["max_score"], 2);
}

#[tokio::test]
async fn too_many_answers_rejects_without_persisting() {
    let Some(ctx) = test_support::setup_test_context().await else {
        return;
    };
    let fx = Fixture::seed(&ctx).await;
    let (q1, q2) = (fx.options(0), fx.options(1));

    let body = fx.answers(&[(0, vec![q1[0]]), (1, vec![q2[0], q2[1], q2[2]])]);
    let (status, error) = submit(&ctx, &fx.student, &fx.snapshot.test.id, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["detail"], "Invalid number of answers. Require no more than 2");
    assert_eq!(stored_attempts(&ctx).await, 0);
}

#[tokio::test]
async fn flooded_answer_list_is_rejected_by_validation() {
    let Some(ctx) = test_support::setup_test_context().await else {
        return;
    };
    let fx = Fixture::seed(&ctx).await;

    let flood: Vec<i64> = (1..=10_000).collect();
    let body = fx.answers(&[(0, flood)]);
    let (status, error) = submit(&ctx, &fx.student, &fx.snapshot.test.id, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["detail"].as_str().unwrap_or_default().contains("Too many answers"), "{error}");
    assert_eq!(stored_attempts(&ctx).await, 0);
}

#[tokio::test]
async fn option_from_another_question_rejects_without_persisting() {
    let Some(ctx) = test_support::setup_test_context().await else {
        return;
    };
    let fx = Fixture::seed(&ctx).await;
    let (q1, q2) = (fx.options(0), fx.options(1));

    let body = fx.answers(&[(0, vec![q2[0]]), (1, vec![q2[1]])]);
    let (status, error) = submit(&ctx, &fx.student, &fx.snapshot.test.id, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["detail"], format!("No such option: {}", q2[0]));
    assert_eq!(stored_attempts(&ctx).await, 0);
    assert!(!q1.contains(&q2[0]));
}

#[tokio::test]
async fn unanswered_questions_score_zero() {
    let Some(ctx) = test_support::setup_test_context().await else {
        return;
    };
    let fx = Fixture::seed(&ctx).await;

    let (status, attempt) =
        submit(&ctx, &fx.student, &fx.snapshot.test.id, json!({ "questions": [] })).await;

    assert_eq!(status, StatusCode::CREATED, "response: {attempt}");
    assert_eq!(attempt["score"], 0);
    assert_eq!(attempt["max_score"], 3);
    assert_eq!(attempt["questions"].as_array().expect("questions").len(), 2);
}

#[tokio::test]
async fn attempt_visibility_is_limited_to_taker_and_owner() {
    let Some(ctx) = test_support::setup_test_context().await else {
        return;
    };
    let fx = Fixture::seed(&ctx).await;
    let outsider =
        test_support::insert_user(ctx.state.db(), "out@example.com", UserRole::Student).await;
    let q1 = fx.options(0);

    let (_, attempt) =
        submit(&ctx, &fx.student, &fx.snapshot.test.id, fx.answers(&[(0, vec![q1[0]])])).await;
    let uri = format!("/api/v1/attempts/{}", attempt["id"].as_str().expect("attempt id"));

    let (status, error) = get(&ctx, &outsider, &uri).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["detail"], "Not enough permissions to access the attempt result");

    let (status, seen) = get(&ctx, &fx.educator, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(seen["score"], 1);

    let (status, _) = get(&ctx, &fx.student, &uri).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&ctx, &fx.student, "/api/v1/attempts/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn attempts_by_test_are_for_the_owning_educator_only() {
    let Some(ctx) = test_support::setup_test_context().await else {
        return;
    };
    let fx = Fixture::seed(&ctx).await;
    let other =
        test_support::insert_user(ctx.state.db(), "other@example.com", UserRole::Educator).await;
    let test_id = fx.snapshot.test.id.clone();

    submit(&ctx, &fx.student, &test_id, json!({})).await;
    submit(&ctx, &fx.student, &test_id, json!({})).await;

    let uri = format!("/api/v1/tests/{test_id}/attempts");
    for caller in [&fx.student, &other] {
        let (status, error) = get(&ctx, caller, &uri).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(error["detail"], "Not an educator of the test subject");
    }

    let (status, listed) = get(&ctx, &fx.educator, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().expect("attempts").len(), 2);

    let (status, mine) = get(&ctx, &fx.student, "/api/v1/attempts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().expect("attempts").len(), 2);

    let (_, none) = get(&ctx, &other, "/api/v1/attempts").await;
    assert!(none.as_array().expect("attempts").is_empty());
}

#[tokio::test]
async fn attempts_survive_test_deletion() {
    let Some(ctx) = test_support::setup_test_context().await else {
        return;
    };
    let fx = Fixture::seed(&ctx).await;
    let test_id = fx.snapshot.test.id.clone();

    let (_, attempt) = submit(&ctx, &fx.student, &test_id, json!({})).await;
    let attempt_uri = format!("/api/v1/attempts/{}", attempt["id"].as_str().expect("id"));

    let token = test_support::bearer_token(&fx.educator.id, ctx.state.settings());
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::DELETE,
            &format!("/api/v1/subjects/{}/tests/{test_id}", fx.subject.id),
            Some(&token),
            None,
        ))
        .await
        .expect("delete test");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (status, _) = get(&ctx, &fx.student, &attempt_uri).await;
    assert_eq!(status, StatusCode::OK);

    let (status, listed) = get(&ctx, &fx.educator, &format!("/api/v1/tests/{test_id}/attempts")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().expect("attempts").len(), 1);

    let (status, error) = submit(&ctx, &fx.student, &test_id, json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["detail"], format!("Test with id '{test_id}' doesn't exist"));
}
