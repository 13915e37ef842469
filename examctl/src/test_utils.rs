//! Test utilities for integration testing.

use crate::{
    api::models::users::{CurrentUser, Role},
    auth::session,
    store::{handlers::Repository, models::users::UserCreateStoreRequest},
    AppState, Application, Config,
};
use axum::http::{header, HeaderName, HeaderValue};
use axum_test::TestServer;

/// A configuration suitable for tests: ephemeral port, fixed signing key
pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        secret_key: Some("test-secret-key-for-testing-only".to_string()),
        ..Default::default()
    }
}

/// Spin up the full application against a fresh store.
///
/// Returns the test server plus the application state so tests can seed
/// records directly.
pub async fn create_test_app() -> (TestServer, AppState) {
    let app = Application::new(create_test_config())
        .await
        .expect("Failed to create application");
    let state = app.app_state().clone();
    (app.into_test_server(), state)
}

/// Create a user directly in the store and return the session view of it
pub async fn create_test_user(state: &AppState, role: Role) -> CurrentUser {
    let mut users = state.store.users();
    let user = users
        .create(&UserCreateStoreRequest {
            email: format!("testuser_{}@example.com", uuid::Uuid::new_v4().simple()),
            name: "Test User".to_string(),
            role,
            mobile: None,
        })
        .await
        .expect("Failed to create test user");
    CurrentUser::from(user)
}

/// Same as [`create_test_user`] but with a complete profile
pub async fn create_test_user_with_mobile(state: &AppState, role: Role) -> CurrentUser {
    let mut users = state.store.users();
    let user = users
        .create(&UserCreateStoreRequest {
            email: format!("testuser_{}@example.com", uuid::Uuid::new_v4().simple()),
            name: "Test User".to_string(),
            role,
            mobile: Some("9876543210".to_string()),
        })
        .await
        .expect("Failed to create test user");
    CurrentUser::from(user)
}

/// Mint a bearer authorization header for the given user
pub fn auth_header(user: &CurrentUser) -> (HeaderName, HeaderValue) {
    let token = session::create_session_token(user, &create_test_config()).expect("Failed to create session token");
    (
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).expect("Failed to build authorization header"),
    )
}
