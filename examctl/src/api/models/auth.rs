//! API request/response models for authentication.

use crate::api::models::users::UserResponse;
use serde::{Deserialize, Serialize};

/// Login request carrying the identity asserted by Google sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleLoginRequest {
    pub email: String,
    pub name: String,
}

/// Session token plus the resolved account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserResponse,
}

/// Profile completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MobileUpdateRequest {
    pub mobile: String,
}
