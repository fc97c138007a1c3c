//! Full HTTP flows through the request gate
//!
//! Register -> login -> bearer-authenticated verification workflow, driven
//! through the actix service with the in-memory store.

use crate::common::{test_config, TEST_PASSWORD};
use actix_web::{test, web, App};
use scenico::core::models::user::UserRole;
use scenico::server::middleware::RequestGate;
use scenico::server::routes;
use scenico::server::state::AppState;
use scenico::storage::memory::MemoryStore;
use scenico::utils::crypto;
use std::sync::Arc;

fn test_state() -> web::Data<AppState> {
    let store = Arc::new(MemoryStore::new());
    web::Data::new(AppState::new(test_config(), store).unwrap())
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .wrap(RequestGate)
                .configure(routes::configure),
        )
        .await
    };
}

macro_rules! register {
    ($app:expr, $email:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/users/register")
            .set_json(serde_json::json!({
                "username": $email.split('@').next().unwrap(),
                "email": $email,
                "password": TEST_PASSWORD,
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json($app, req).await;
        body
    }};
}

macro_rules! login {
    ($app:expr, $email:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/users/login")
            .set_json(serde_json::json!({
                "email": $email,
                "password": TEST_PASSWORD,
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json($app, req).await;
        assert_eq!(body["success"], true);
        body["data"]["token"].as_str().unwrap().to_string()
    }};
}

async fn seed_admin(state: &AppState) {
    let mut admin = scenico::core::models::user::User::new(
        "admin".to_string(),
        "admin@example.com".to_string(),
        crypto::hash_password(TEST_PASSWORD).unwrap(),
    );
    admin.role = UserRole::Admin;
    state.store.create_user(&admin).await.unwrap();
}

#[actix_web::test]
async fn test_register_login_and_me() {
    let state = test_state();
    let app = test_app!(state);

    let registered = register!(&app, "ana@example.com");
    assert_eq!(registered["success"], true);
    assert_eq!(registered["data"]["role"], "USER");
    assert_eq!(registered["data"]["verified"], false);

    let token = login!(&app, "ana@example.com");

    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(("authorization", format!("Bearer {}", token)))
        .to_request();
    let me: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(me["data"]["email"], "ana@example.com");
    assert_eq!(me["data"]["uuid"], registered["data"]["uuid"]);
}

#[actix_web::test]
async fn test_duplicate_registration_conflicts() {
    let state = test_state();
    let app = test_app!(state);
    register!(&app, "ana@example.com");

    let req = test::TestRequest::post()
        .uri("/api/v1/users/register")
        .set_json(serde_json::json!({
            "username": "ana2",
            "email": "ana@example.com",
            "password": TEST_PASSWORD,
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), actix_web::http::StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_verification_lifecycle_over_http() {
    let state = test_state();
    seed_admin(&state).await;
    let app = test_app!(state);

    register!(&app, "ana@example.com");
    let user_token = login!(&app, "ana@example.com");
    let admin_token = login!(&app, "admin@example.com");

    // Submit a role application as the user.
    let req = test::TestRequest::post()
        .uri("/api/v1/verifications")
        .insert_header(("authorization", format!("Bearer {}", user_token)))
        .set_json(serde_json::json!({
            "requested_role": "ENTERPRISE",
            "justification": "5 years touring",
        }))
        .to_request();
    let submitted: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(submitted["data"]["status"], "PENDING");
    let request_id = submitted["data"]["id"].as_str().unwrap().to_string();

    // A second submission while one is pending conflicts.
    let req = test::TestRequest::post()
        .uri("/api/v1/verifications")
        .insert_header(("authorization", format!("Bearer {}", user_token)))
        .set_json(serde_json::json!({
            "requested_role": "ARTIST",
            "justification": "also this",
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), actix_web::http::StatusCode::CONFLICT);

    // Resolution endpoints are admin-only.
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/verifications/{}/approve", request_id))
        .insert_header(("authorization", format!("Bearer {}", user_token)))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), actix_web::http::StatusCode::FORBIDDEN);

    // Admin approves; role and verified flag change together.
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/verifications/{}/approve", request_id))
        .insert_header(("authorization", format!("Bearer {}", admin_token)))
        .to_request();
    let approved: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(approved["data"]["status"], "ACCEPTED");

    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(("authorization", format!("Bearer {}", user_token)))
        .to_request();
    let me: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(me["data"]["role"], "ENTERPRISE");
    assert_eq!(me["data"]["verified"], true);

    // Terminal state: approving again conflicts.
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/verifications/{}/approve", request_id))
        .insert_header(("authorization", format!("Bearer {}", admin_token)))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), actix_web::http::StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_reject_requires_note_over_http() {
    let state = test_state();
    seed_admin(&state).await;
    let app = test_app!(state);

    register!(&app, "ana@example.com");
    let user_token = login!(&app, "ana@example.com");
    let admin_token = login!(&app, "admin@example.com");

    let req = test::TestRequest::post()
        .uri("/api/v1/verifications")
        .insert_header(("authorization", format!("Bearer {}", user_token)))
        .set_json(serde_json::json!({
            "requested_role": "ARTIST",
            "justification": "reel attached",
        }))
        .to_request();
    let submitted: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let request_id = submitted["data"]["id"].as_str().unwrap().to_string();

    // Blank note is a bad request and leaves the request pending.
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/verifications/{}/reject", request_id))
        .insert_header(("authorization", format!("Bearer {}", admin_token)))
        .set_json(serde_json::json!({ "note": "" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/verifications/{}/reject", request_id))
        .insert_header(("authorization", format!("Bearer {}", admin_token)))
        .set_json(serde_json::json!({ "note": "portfolio is empty" }))
        .to_request();
    let rejected: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(rejected["data"]["status"], "REJECTED");
    assert_eq!(rejected["data"]["admin_note"], "portfolio is empty");

    // Rejection leaves the identity untouched.
    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(("authorization", format!("Bearer {}", user_token)))
        .to_request();
    let me: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(me["data"]["role"], "USER");
    assert_eq!(me["data"]["verified"], false);
}

#[actix_web::test]
async fn test_mine_listing_and_public_profile() {
    let state = test_state();
    let app = test_app!(state);

    let registered = register!(&app, "ana@example.com");
    let uuid = registered["data"]["uuid"].as_str().unwrap().to_string();
    let token = login!(&app, "ana@example.com");

    let req = test::TestRequest::post()
        .uri("/api/v1/verifications")
        .insert_header(("authorization", format!("Bearer {}", token)))
        .set_json(serde_json::json!({
            "requested_role": "ARTIST",
            "justification": "reel attached",
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), actix_web::http::StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/api/v1/verifications/mine")
        .insert_header(("authorization", format!("Bearer {}", token)))
        .to_request();
    let mine: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(mine["data"].as_array().unwrap().len(), 1);

    // Public profile needs no token and carries no email.
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/users/uuid/{}", uuid))
        .to_request();
    let profile: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(profile["data"]["username"], "ana");
    assert!(profile["data"].get("email").is_none());
}

#[actix_web::test]
async fn test_password_reset_over_http() {
    let state = test_state();
    let app = test_app!(state);
    register!(&app, "ana@example.com");

    // The response is the same whether or not the account exists.
    for email in ["ana@example.com", "ghost@example.com"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/users/forgot-password")
            .set_json(serde_json::json!({ "email": email }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
    }
}
