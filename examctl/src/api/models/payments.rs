//! API request/response models for payments.

use crate::api::models::registrations::RegistrationStatus;
use crate::types::RegistrationId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInitiationResponse {
    pub registration_id: RegistrationId,
    pub status: RegistrationStatus,
    pub payment_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfirmationResponse {
    pub registration_id: RegistrationId,
    pub status: RegistrationStatus,
    pub payment_id: String,
    pub confirmed_at: DateTime<Utc>,
    pub message: String,
}
