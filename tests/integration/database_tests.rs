//! SeaORM storage backend tests over in-memory SQLite

use crate::common::{seed_user, test_database};
use scenico::core::models::user::UserRole;
use scenico::core::models::verification::{RequestStatus, VerificationRequest};
use scenico::storage::IdentityStore;
use scenico::utils::error::AppError;

#[tokio::test]
async fn test_health_check() {
    let db = test_database().await;
    assert!(db.health_check().await.is_ok());
}

#[tokio::test]
async fn test_user_round_trip() {
    let db = test_database().await;
    let user = seed_user(&db, "ana@example.com", UserRole::User).await;

    let by_email = db
        .find_user_by_email("ana@example.com")
        .await
        .unwrap()
        .expect("user should be found by email");
    assert_eq!(by_email.uuid, user.uuid);
    assert_eq!(by_email.role, UserRole::User);
    assert!(!by_email.verified);

    let by_uuid = db
        .find_user_by_uuid(user.uuid)
        .await
        .unwrap()
        .expect("user should be found by uuid");
    assert_eq!(by_uuid.email, user.email);

    assert!(db.find_user_by_email("ghost@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let db = test_database().await;
    seed_user(&db, "ana@example.com", UserRole::User).await;

    let dup = scenico::core::models::user::User::new(
        "other".to_string(),
        "ana@example.com".to_string(),
        "hash".to_string(),
    );

    assert!(matches!(
        db.create_user(&dup).await,
        Err(AppError::Conflict(_))
    ));
}

#[tokio::test]
async fn test_one_pending_request_enforced() {
    let db = test_database().await;
    let user = seed_user(&db, "ana@example.com", UserRole::User).await;

    let first = VerificationRequest::new(user.uuid, UserRole::Artist, "first".to_string(), None);
    db.create_request(&first).await.unwrap();

    let second =
        VerificationRequest::new(user.uuid, UserRole::Enterprise, "second".to_string(), None);
    assert!(matches!(
        db.create_request(&second).await,
        Err(AppError::PendingRequestExists)
    ));
}

#[tokio::test]
async fn test_approval_is_atomic_and_single_shot() {
    let db = test_database().await;
    let user = seed_user(&db, "ana@example.com", UserRole::User).await;

    let request = VerificationRequest::new(
        user.uuid,
        UserRole::Enterprise,
        "5 years touring".to_string(),
        None,
    );
    db.create_request(&request).await.unwrap();

    let resolved = db
        .approve_request(request.id, UserRole::Enterprise)
        .await
        .unwrap();
    assert_eq!(resolved.status, RequestStatus::Accepted);
    assert!(resolved.resolved_at.is_some());

    let owner = db.find_user_by_uuid(user.uuid).await.unwrap().unwrap();
    assert_eq!(owner.role, UserRole::Enterprise);
    assert!(owner.verified);

    // The pending-state compare-and-set admits exactly one resolution.
    assert!(matches!(
        db.approve_request(request.id, UserRole::Enterprise).await,
        Err(AppError::NotPending)
    ));
    assert!(matches!(
        db.reject_request(request.id, "late").await,
        Err(AppError::NotPending)
    ));
}

#[tokio::test]
async fn test_rejection_records_note_and_spares_user() {
    let db = test_database().await;
    let user = seed_user(&db, "ana@example.com", UserRole::User).await;

    let request =
        VerificationRequest::new(user.uuid, UserRole::Artist, "portfolio".to_string(), None);
    db.create_request(&request).await.unwrap();

    let resolved = db
        .reject_request(request.id, "evidence link is dead")
        .await
        .unwrap();
    assert_eq!(resolved.status, RequestStatus::Rejected);
    assert_eq!(resolved.admin_note.as_deref(), Some("evidence link is dead"));

    let owner = db.find_user_by_uuid(user.uuid).await.unwrap().unwrap();
    assert_eq!(owner.role, UserRole::User);
    assert!(!owner.verified);

    // A resolved request frees the pending slot.
    let next =
        VerificationRequest::new(user.uuid, UserRole::Artist, "better reel".to_string(), None);
    assert!(db.create_request(&next).await.is_ok());
}

#[tokio::test]
async fn test_listing_filters() {
    let db = test_database().await;
    let ana = seed_user(&db, "ana@example.com", UserRole::User).await;
    let bea = seed_user(&db, "bea@example.com", UserRole::User).await;

    let first = VerificationRequest::new(ana.uuid, UserRole::Artist, "reel".to_string(), None);
    db.create_request(&first).await.unwrap();
    let second =
        VerificationRequest::new(bea.uuid, UserRole::Enterprise, "papers".to_string(), None);
    db.create_request(&second).await.unwrap();
    db.approve_request(first.id, UserRole::Artist).await.unwrap();

    let pending = db.list_requests(Some(RequestStatus::Pending)).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].user_uuid, bea.uuid);

    let all = db.list_requests(None).await.unwrap();
    assert_eq!(all.len(), 2);

    let anas = db.list_requests_for_user(ana.uuid).await.unwrap();
    assert_eq!(anas.len(), 1);
    assert_eq!(anas[0].status, RequestStatus::Accepted);
}

#[tokio::test]
async fn test_reset_token_lifecycle() {
    let db = test_database().await;
    let user = seed_user(&db, "ana@example.com", UserRole::User).await;

    let expires = chrono::Utc::now() + chrono::Duration::hours(1);
    db.store_reset_token(user.uuid, "tok123", expires)
        .await
        .unwrap();

    assert_eq!(
        db.consume_reset_token("tok123").await.unwrap(),
        Some(user.uuid)
    );
    assert_eq!(db.consume_reset_token("tok123").await.unwrap(), None);
    assert_eq!(db.consume_reset_token("never-issued").await.unwrap(), None);
}
