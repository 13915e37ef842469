//! Store models for exam registrations.

use crate::api::models::registrations::RegistrationStatus;
use crate::types::{ExamId, RegistrationId, UserId};
use chrono::{DateTime, Utc};

/// Store request for creating a new registration.
///
/// Every registration starts in [`RegistrationStatus::Registered`]; later
/// statuses are reached only through [`RegistrationTransitionStoreRequest`].
#[derive(Debug, Clone)]
pub struct RegistrationCreateStoreRequest {
    pub exam_id: ExamId,
    pub user_id: UserId,
}

/// Store request for a status transition, applied as a compare-and-swap.
///
/// The update succeeds only if the record's current status is one of `from`;
/// otherwise the store reports the actual status so the caller can explain
/// the rejection.
#[derive(Debug, Clone)]
pub struct RegistrationTransitionStoreRequest {
    pub from: Vec<RegistrationStatus>,
    pub to: RegistrationStatus,
}

/// Store response for a registration
#[derive(Debug, Clone)]
pub struct RegistrationStoreResponse {
    pub id: RegistrationId,
    pub exam_id: ExamId,
    pub user_id: UserId,
    pub status: RegistrationStatus,
    pub registered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
