//! API request/response models for enrollment.

use crate::api::models::registrations::RegistrationStatus;
use crate::types::RegistrationId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentResponse {
    pub registration_id: RegistrationId,
    pub status: RegistrationStatus,
    pub enrolled_at: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkEnrollmentRequest {
    pub registration_ids: Vec<RegistrationId>,
}

/// One registration that could not be enrolled, with the reason
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkEnrollmentFailure {
    pub registration_id: RegistrationId,
    pub reason: String,
}

/// Per-item outcomes of a bulk enrollment, in input order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkEnrollmentResponse {
    pub success: Vec<RegistrationId>,
    pub failed: Vec<BulkEnrollmentFailure>,
}
