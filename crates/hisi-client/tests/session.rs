//! Session store behaviour against a scripted backend.

mod common;

use std::sync::Arc;

use chrono::Utc;
use common::*;
use hisi_client::{AuthFailureKind, ClientError, MemoryStorage, SessionStorage};
use hisi_core::{ProfileUpdate, RegistrationRequest, Role, TOKEN_KEY, USER_KEY};
use http::Method;
use jsonwebtoken::{EncodingKey, Header};
use serde_json::json;

fn jwt(exp: i64) -> String {
    jsonwebtoken::encode(
        &Header::default(),
        &json!({"sub": "u-1", "exp": exp}),
        &EncodingKey::from_secret(b"server-secret"),
    )
    .unwrap()
}

fn persisted(token: &str, role: &str) -> Arc<MemoryStorage> {
    Arc::new(MemoryStorage::with_entries([
        (TOKEN_KEY, token.to_string()),
        (USER_KEY, user_json("u-1", role).to_string()),
    ]))
}

// =============================================================================
// Login / Register
// =============================================================================

#[tokio::test]
async fn test_login_establishes_session_and_persists() {
    let transport = ScriptedTransport::new();
    let storage = Arc::new(MemoryStorage::new());
    let store = store(&transport, &storage);

    transport.respond(200, auth_body("u-1", "customer", "token-abc"));
    let user = store.login("  amani@example.com ", "Secret123").await.unwrap();

    assert_eq!(user.id, "u-1");
    assert!(store.is_authenticated().await);
    assert_eq!(store.token().await.as_deref(), Some("token-abc"));
    assert_eq!(store.current_user().await, Some(user));

    assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("token-abc"));
    let saved = storage.get(USER_KEY).unwrap().unwrap();
    let saved: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(saved["email"], "amani@example.com");

    let request = transport.last_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.url.path(), "/api/v1/auth/login");
    assert_eq!(
        request.json_body().unwrap(),
        json!({"email": "amani@example.com", "password": "Secret123"})
    );
    assert!(request.header("authorization").is_none());
}

#[tokio::test]
async fn test_login_accepts_token_field_name() {
    let transport = ScriptedTransport::new();
    let storage = Arc::new(MemoryStorage::new());
    let store = store(&transport, &storage);

    transport.respond(200, json!({"user": user_json("u-2", "super_admin"), "token": "legacy"}));
    store.login("amani@example.com", "Secret123").await.unwrap();

    assert_eq!(store.token().await.as_deref(), Some("legacy"));
    assert_eq!(store.role().await, Some(Role::SuperAdmin));
}

#[tokio::test]
async fn test_login_with_blank_token_is_refused() {
    let transport = ScriptedTransport::new();
    let storage = persisted("token-old", "customer");
    let store = store(&transport, &storage);

    transport.respond(200, auth_body("u-9", "super_admin", ""));
    let failure = store.login("amani@example.com", "Secret123").await.unwrap_err();

    assert_eq!(failure.kind, AuthFailureKind::Invalid);
    assert_eq!(failure.message, "Login failed");
    assert_eq!(store.token().await.as_deref(), Some("token-old"));
    assert_eq!(store.role().await, Some(Role::Customer));
    assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("token-old"));
}

#[tokio::test]
async fn test_register_with_blank_token_stays_anonymous() {
    let transport = ScriptedTransport::new();
    let storage = Arc::new(MemoryStorage::new());
    let store = store(&transport, &storage);

    transport.respond(201, auth_body("u-3", "customer", "   "));
    let request = RegistrationRequest {
        email: "wanjiru@example.com".into(),
        password: "Secret123".into(),
        first_name: "Wanjiru".into(),
        last_name: "Kamau".into(),
        phone: None,
    };
    let failure = store.register(&request).await.unwrap_err();

    assert_eq!(failure.kind, AuthFailureKind::Invalid);
    assert_eq!(failure.message, "Registration failed");
    assert!(!store.is_authenticated().await);
    assert!(!storage.contains(TOKEN_KEY));
    assert!(!storage.contains(USER_KEY));
}

#[tokio::test]
async fn test_failed_login_keeps_prior_session() {
    let transport = ScriptedTransport::new();
    let storage = persisted("token-old", "customer");
    let store = store(&transport, &storage);

    transport.respond(401, json!({"error": "Invalid credentials"}));
    let err = store.login("amani@example.com", "wrong").await.unwrap_err();

    assert_eq!(err.kind, AuthFailureKind::Rejected);
    assert_eq!(err.message, "Invalid credentials");
    assert_eq!(store.token().await.as_deref(), Some("token-old"));
    assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("token-old"));
}

#[tokio::test]
async fn test_failed_login_without_message_uses_fallback() {
    let transport = ScriptedTransport::new();
    let storage = Arc::new(MemoryStorage::new());
    let store = store(&transport, &storage);

    transport.respond_raw(500, "<html>Internal Server Error</html>");
    let err = store.login("amani@example.com", "Secret123").await.unwrap_err();

    assert_eq!(err.kind, AuthFailureKind::Rejected);
    assert_eq!(err.message, "Login failed");
    assert!(!store.is_authenticated().await);
}

#[tokio::test]
async fn test_network_failure_has_generic_message() {
    let transport = ScriptedTransport::new();
    let storage = Arc::new(MemoryStorage::new());
    let store = store(&transport, &storage);

    transport.fail(ClientError::Network("connection refused".into()));
    let err = store.login("amani@example.com", "Secret123").await.unwrap_err();
    assert_eq!(err.kind, AuthFailureKind::Network);
    assert_eq!(err.message, "Network error. Please try again.");

    transport.fail(ClientError::Timeout(30));
    let err = store.login("amani@example.com", "Secret123").await.unwrap_err();
    assert_eq!(err.message, "Network error. Please try again.");
}

#[tokio::test]
async fn test_invalid_input_sends_nothing() {
    let transport = ScriptedTransport::new();
    let storage = Arc::new(MemoryStorage::new());
    let store = store(&transport, &storage);

    let err = store.login("", "Secret123").await.unwrap_err();
    assert_eq!(err.kind, AuthFailureKind::Invalid);

    let weak = RegistrationRequest {
        email: "amani@example.com".into(),
        password: "short".into(),
        first_name: "Amani".into(),
        last_name: "Wanjiru".into(),
        phone: None,
    };
    let err = store.register(&weak).await.unwrap_err();
    assert_eq!(err.kind, AuthFailureKind::Invalid);

    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_register_signs_in() {
    let transport = ScriptedTransport::new();
    let storage = Arc::new(MemoryStorage::new());
    let store = store(&transport, &storage);

    transport.respond(201, auth_body("u-9", "customer", "token-new"));
    let request = RegistrationRequest {
        email: " wanjiru@example.com ".into(),
        password: "Secret123".into(),
        first_name: " Amani ".into(),
        last_name: "Wanjiru".into(),
        phone: Some("+254700123456".into()),
    };
    let user = store.register(&request).await.unwrap();

    assert_eq!(user.id, "u-9");
    assert!(store.is_customer().await);

    let sent = transport.last_request();
    assert_eq!(sent.url.path(), "/api/v1/auth/register");
    let body = sent.json_body().unwrap();
    assert_eq!(body["email"], "wanjiru@example.com");
    assert_eq!(body["first_name"], "Amani");
}

// =============================================================================
// Logout
// =============================================================================

#[tokio::test]
async fn test_logout_clears_memory_and_storage() {
    let transport = ScriptedTransport::new();
    let storage = persisted("token-abc", "content_manager");
    let store = store(&transport, &storage);
    assert!(store.is_admin().await);

    store.logout().await;

    assert!(!store.is_authenticated().await);
    assert_eq!(store.current_user().await, None);
    assert!(!storage.contains(TOKEN_KEY));
    assert!(!storage.contains(USER_KEY));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_login_resolving_after_logout_is_dropped() {
    let transport = ScriptedTransport::new();
    let storage = Arc::new(MemoryStorage::new());
    let store = store(&transport, &storage);

    let gate = transport.respond_gated(200, auth_body("u-1", "customer", "token-late"));
    let pending = tokio::spawn({
        let store = store.clone();
        async move { store.login("amani@example.com", "Secret123").await }
    });

    transport.wait_for_requests(1).await;
    store.logout().await;
    gate.notify_one();

    let err = pending.await.unwrap().unwrap_err();
    assert_eq!(err.kind, AuthFailureKind::Superseded);
    assert!(!store.is_authenticated().await);
    assert!(!storage.contains(TOKEN_KEY));
    assert!(!storage.contains(USER_KEY));
}

#[tokio::test]
async fn test_older_login_cannot_overwrite_newer() {
    let transport = ScriptedTransport::new();
    let storage = Arc::new(MemoryStorage::new());
    let store = store(&transport, &storage);

    let gate = transport.respond_gated(200, auth_body("u-old", "customer", "token-old"));
    let first = tokio::spawn({
        let store = store.clone();
        async move { store.login("old@example.com", "Secret123").await }
    });
    transport.wait_for_requests(1).await;

    transport.respond(200, auth_body("u-new", "super_admin", "token-new"));
    store.login("new@example.com", "Secret123").await.unwrap();
    gate.notify_one();

    let err = first.await.unwrap().unwrap_err();
    assert_eq!(err.kind, AuthFailureKind::Superseded);
    assert_eq!(store.token().await.as_deref(), Some("token-new"));
    assert!(store.is_super_admin().await);
}

// =============================================================================
// Profile
// =============================================================================

#[tokio::test]
async fn test_update_profile_replaces_user_keeps_token() {
    let transport = ScriptedTransport::new();
    let storage = persisted("token-abc", "customer");
    let store = store(&transport, &storage);

    let mut updated = user_json("u-1", "customer");
    updated["first_name"] = json!("Achieng");
    transport.respond(200, json!({"message": "Profile updated", "user": updated}));

    let update = ProfileUpdate {
        first_name: Some("Achieng".into()),
        ..ProfileUpdate::default()
    };
    let user = store.update_profile(&update).await.unwrap();

    assert_eq!(user.first_name.as_deref(), Some("Achieng"));
    assert_eq!(store.current_user().await.unwrap().first_name.as_deref(), Some("Achieng"));
    assert_eq!(store.token().await.as_deref(), Some("token-abc"));
    assert!(storage.get(USER_KEY).unwrap().unwrap().contains("Achieng"));

    let sent = transport.last_request();
    assert_eq!(sent.method, Method::PUT);
    assert_eq!(sent.url.path(), "/api/v1/auth/me");
    assert_eq!(sent.header("authorization"), Some("Bearer token-abc"));
    assert_eq!(sent.json_body().unwrap(), json!({"first_name": "Achieng"}));
}

#[tokio::test]
async fn test_update_profile_requires_session() {
    let transport = ScriptedTransport::new();
    let storage = Arc::new(MemoryStorage::new());
    let store = store(&transport, &storage);

    let update = ProfileUpdate {
        phone: Some("+254700123456".into()),
        ..ProfileUpdate::default()
    };
    let err = store.update_profile(&update).await.unwrap_err();
    assert_eq!(err.kind, AuthFailureKind::NotAuthenticated);
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_rejected_profile_update_leaves_user() {
    let transport = ScriptedTransport::new();
    let storage = persisted("token-abc", "customer");
    let store = store(&transport, &storage);
    let before = store.current_user().await;

    transport.respond(400, json!({"message": "Phone number already in use"}));
    let update = ProfileUpdate {
        phone: Some("+254700123456".into()),
        ..ProfileUpdate::default()
    };
    let err = store.update_profile(&update).await.unwrap_err();

    assert_eq!(err.message, "Phone number already in use");
    assert_eq!(store.current_user().await, before);
}

#[tokio::test]
async fn test_change_password_leaves_session() {
    let transport = ScriptedTransport::new();
    let storage = persisted("token-abc", "customer");
    let store = store(&transport, &storage);

    transport.respond(200, json!({"message": "Password changed successfully"}));
    let message = store.change_password("Secret123", "Better456").await.unwrap();

    assert_eq!(message, "Password changed successfully");
    assert_eq!(store.token().await.as_deref(), Some("token-abc"));
    let body = transport.last_request().json_body().unwrap();
    assert_eq!(body, json!({"current_password": "Secret123", "new_password": "Better456"}));

    let err = store.change_password("Secret123", "weak").await.unwrap_err();
    assert_eq!(err.kind, AuthFailureKind::Invalid);
    assert_eq!(transport.request_count(), 1);
}

// =============================================================================
// Roles
// =============================================================================

#[tokio::test]
async fn test_role_predicates() {
    let cases = [
        ("customer", false, false, true),
        ("content_manager", true, false, false),
        ("super_admin", true, true, false),
    ];

    for (role, admin, super_admin, customer) in cases {
        let transport = ScriptedTransport::new();
        let store = store(&transport, &persisted("token-abc", role));
        assert_eq!(store.is_admin().await, admin, "{}", role);
        assert_eq!(store.is_super_admin().await, super_admin, "{}", role);
        assert_eq!(store.is_customer().await, customer, "{}", role);
    }

    let transport = ScriptedTransport::new();
    let anonymous = store(&transport, &Arc::new(MemoryStorage::new()));
    assert!(!anonymous.is_admin().await);
    assert!(!anonymous.is_customer().await);
    assert_eq!(anonymous.role().await, None);
}

// =============================================================================
// Hydration
// =============================================================================

#[tokio::test]
async fn test_hydrates_persisted_session() {
    let transport = ScriptedTransport::new();
    let live = jwt(Utc::now().timestamp() + 3600);
    let store = store(&transport, &persisted(&live, "content_manager"));

    assert!(store.is_authenticated().await);
    assert_eq!(store.token().await, Some(live));
    assert_eq!(store.role().await, Some(Role::ContentManager));
}

#[tokio::test]
async fn test_corrupted_user_is_discarded() {
    let transport = ScriptedTransport::new();
    let storage = Arc::new(MemoryStorage::with_entries([
        (TOKEN_KEY, "token-abc"),
        (USER_KEY, "{not json"),
    ]));
    let store = store(&transport, &storage);

    assert!(!store.is_authenticated().await);
    assert!(!storage.contains(TOKEN_KEY));
    assert!(!storage.contains(USER_KEY));
}

#[tokio::test]
async fn test_half_persisted_session_is_discarded() {
    let transport = ScriptedTransport::new();
    let storage = Arc::new(MemoryStorage::with_entries([(TOKEN_KEY, "token-abc")]));
    let store = store(&transport, &storage);

    assert!(!store.is_authenticated().await);
    assert!(!storage.contains(TOKEN_KEY));
}

#[tokio::test]
async fn test_blank_persisted_token_is_discarded() {
    let transport = ScriptedTransport::new();
    let storage = persisted("", "customer");
    let store = store(&transport, &storage);

    assert!(!store.is_authenticated().await);
    assert_eq!(store.current_user().await, None);
    assert!(!storage.contains(TOKEN_KEY));
    assert!(!storage.contains(USER_KEY));
}

#[tokio::test]
async fn test_expired_token_is_discarded() {
    let transport = ScriptedTransport::new();
    let expired = jwt(Utc::now().timestamp() - 60);
    let storage = persisted(&expired, "customer");
    let store = store(&transport, &storage);

    assert!(!store.is_authenticated().await);
    assert!(!storage.contains(TOKEN_KEY));
    assert!(!storage.contains(USER_KEY));
}
