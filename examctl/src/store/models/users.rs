//! Store models for users.

use crate::api::models::users::Role;
use crate::types::UserId;
use chrono::{DateTime, Utc};

/// Store request for creating a new user
#[derive(Debug, Clone)]
pub struct UserCreateStoreRequest {
    pub email: String,
    pub name: String,
    pub role: Role,
    pub mobile: Option<String>,
}

/// Store request for updating a user
#[derive(Debug, Clone, Default)]
pub struct UserUpdateStoreRequest {
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub role: Option<Role>,
}

/// Store response for a user
#[derive(Debug, Clone)]
pub struct UserStoreResponse {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub mobile: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserStoreResponse {
    /// Registration requires a mobile number on file
    pub fn is_profile_complete(&self) -> bool {
        self.mobile.is_some()
    }
}
