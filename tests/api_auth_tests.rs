// SPDX-License-Identifier: MIT

//! API authentication and task-endpoint gating tests.
//!
//! These tests verify that:
//! 1. Protected routes reject requests without valid tokens
//! 2. Protected routes accept cookie and Bearer tokens
//! 3. Scheduler task routes reject requests without the job header

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use gymbox_api::middleware::auth::create_jwt;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_protected_route_rejects_missing_token() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/membership")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_rejects_garbage_token() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/membership")
                .header(header::AUTHORIZATION, "Bearer not.a.jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_accepts_bearer_token() {
    let (app, state) = common::create_test_app();
    let token = create_jwt("user-1", &state.config.jwt_signing_key).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/membership")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Auth passes; the offline mock db then fails the lookup.
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_protected_route_accepts_cookie_token() {
    let (app, state) = common::create_test_app();
    let token = create_jwt("user-1", &state.config.jwt_signing_key).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/membership")
                .header(header::COOKIE, format!("gym_token={}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_token_signed_with_wrong_key_rejected() {
    let (app, _state) = common::create_test_app();
    let token = create_jwt("user-1", b"completely_different_signing_key").unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/membership")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_task_route_rejects_missing_job_header() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/tasks/issue-codes")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_task_route_rejects_wrong_job_name() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/tasks/suspend-overdue")
                .header("x-cloudscheduler-jobname", "some-other-job")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_health_is_public() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
