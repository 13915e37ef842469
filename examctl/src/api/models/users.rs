//! API request/response models for users.

use crate::store::models::users::UserStoreResponse;
use crate::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// Role enum for platform access levels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "USER"),
            Role::Admin => write!(f, "ADMIN"),
        }
    }
}

// User response models
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub mobile: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    /// Whether the profile carries everything registration requires
    pub is_profile_complete: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub mobile: Option<String>,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Registration requires a mobile number on file
    pub fn is_profile_complete(&self) -> bool {
        self.mobile.is_some()
    }
}

impl From<UserStoreResponse> for UserResponse {
    fn from(record: UserStoreResponse) -> Self {
        let is_profile_complete = record.is_profile_complete();
        Self {
            id: record.id,
            email: record.email,
            name: record.name,
            mobile: record.mobile,
            role: record.role,
            created_at: record.created_at,
            is_profile_complete,
        }
    }
}

impl From<UserStoreResponse> for CurrentUser {
    fn from(record: UserStoreResponse) -> Self {
        Self {
            id: record.id,
            email: record.email,
            name: record.name,
            role: record.role,
            mobile: record.mobile,
        }
    }
}
