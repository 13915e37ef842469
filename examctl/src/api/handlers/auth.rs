use axum::{extract::State, Json};

use crate::{
    api::models::{
        auth::{AuthResponse, GoogleLoginRequest, MobileUpdateRequest},
        registrations::RegistrationResponse,
        users::{CurrentUser, Role, UserResponse},
    },
    auth::session,
    errors::Error,
    store::{
        handlers::{registrations::RegistrationFilter, Repository},
        models::users::{UserCreateStoreRequest, UserUpdateStoreRequest},
    },
    AppState,
};

/// Log in with a Google-asserted identity, creating the account on first
/// login. Always issues a fresh session token.
#[tracing::instrument(skip_all)]
pub async fn google_login(State(state): State<AppState>, Json(request): Json<GoogleLoginRequest>) -> Result<Json<AuthResponse>, Error> {
    let email = request.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(Error::InvalidInput {
            message: "A valid email address is required".to_string(),
        });
    }

    let name = request.name.trim().to_string();
    if name.is_empty() {
        return Err(Error::InvalidInput {
            message: "Name must not be empty".to_string(),
        });
    }

    let mut users = state.store.users();
    let user = users
        .get_or_create_by_email(&UserCreateStoreRequest {
            email,
            name,
            role: Role::User,
            mobile: None,
        })
        .await?;

    let current_user = CurrentUser::from(user.clone());
    let access_token = session::create_session_token(&current_user, &state.config)?;

    Ok(Json(AuthResponse {
        access_token,
        token_type: "bearer".to_string(),
        user: UserResponse::from(user),
    }))
}

/// The authenticated caller's profile
#[tracing::instrument(skip_all)]
pub async fn me(State(state): State<AppState>, user: CurrentUser) -> Result<Json<UserResponse>, Error> {
    let mut users = state.store.users();
    let record = users.get_by_id(user.id).await?.ok_or(Error::NotFound {
        resource: "User".to_string(),
        id: user.id.to_string(),
    })?;

    Ok(Json(UserResponse::from(record)))
}

/// Complete the caller's profile with a mobile number
#[tracing::instrument(skip_all)]
pub async fn update_mobile(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<MobileUpdateRequest>,
) -> Result<Json<UserResponse>, Error> {
    let mobile = normalize_mobile(&request.mobile)?;

    let mut users = state.store.users();
    let record = users
        .update(
            user.id,
            &UserUpdateStoreRequest {
                mobile: Some(mobile),
                ..Default::default()
            },
        )
        .await?;

    Ok(Json(UserResponse::from(record)))
}

/// The caller's own registrations, newest first
#[tracing::instrument(skip_all)]
pub async fn my_registrations(State(state): State<AppState>, user: CurrentUser) -> Result<Json<Vec<RegistrationResponse>>, Error> {
    let mut registrations = state.store.registrations();
    let records = registrations
        .list(&RegistrationFilter {
            exam_id: None,
            user_id: Some(user.id),
        })
        .await?;

    Ok(Json(records.into_iter().map(RegistrationResponse::from).collect()))
}

/// Strip separators and validate a 10-digit mobile number
fn normalize_mobile(raw: &str) -> Result<String, Error> {
    let digits: String = raw.chars().filter(|c| !c.is_whitespace() && *c != '-').collect();
    if digits.len() != 10 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidInput {
            message: "Mobile number must be exactly 10 digits".to_string(),
        });
    }
    Ok(digits)
}
