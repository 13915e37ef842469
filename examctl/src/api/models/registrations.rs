//! API request/response models for exam registrations.

use crate::store::models::registrations::RegistrationStoreResponse;
use crate::store::models::users::UserStoreResponse;
use crate::types::{ExamId, RegistrationId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Registration lifecycle status. Moves forward only:
/// REGISTERED → PAYMENT_PENDING → PAID → ENROLLED, with admin enrollment
/// allowed from any pre-ENROLLED status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    Registered,
    PaymentPending,
    Paid,
    Enrolled,
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationStatus::Registered => write!(f, "REGISTERED"),
            RegistrationStatus::PaymentPending => write!(f, "PAYMENT_PENDING"),
            RegistrationStatus::Paid => write!(f, "PAID"),
            RegistrationStatus::Enrolled => write!(f, "ENROLLED"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub id: RegistrationId,
    pub user_id: UserId,
    pub exam_id: ExamId,
    pub status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
}

impl From<RegistrationStoreResponse> for RegistrationResponse {
    fn from(record: RegistrationStoreResponse) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            exam_id: record.exam_id,
            status: record.status,
            created_at: record.registered_at,
        }
    }
}

/// The candidate fields admins see in registration listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub mobile: Option<String>,
}

impl From<UserStoreResponse> for RegistrationUser {
    fn from(record: UserStoreResponse) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            mobile: record.mobile,
        }
    }
}

/// One row of an admin registration listing: the registration joined with its
/// candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamRegistrationResponse {
    pub registration_id: RegistrationId,
    pub user: RegistrationUser,
    pub status: RegistrationStatus,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationCountResponse {
    pub exam_id: ExamId,
    pub count: usize,
}
