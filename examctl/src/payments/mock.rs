//! Mock payment provider implementation
//!
//! This provider accepts every payment without contacting any external
//! gateway. Useful for testing and development purposes.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::{
    payments::{PaymentIntent, PaymentProvider, PaymentReceipt, Result},
    types::{abbrev_uuid, RegistrationId},
};

/// Mock payment provider that treats every payment as successful
#[derive(Debug, Default)]
pub struct MockProvider;

impl MockProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentProvider for MockProvider {
    async fn initiate(&self, registration_id: RegistrationId, amount: Decimal) -> Result<PaymentIntent> {
        let payment_id = uuid::Uuid::new_v4().to_string();

        tracing::info!(
            "Mock provider initiated payment {} of {} for registration {}",
            payment_id,
            amount,
            abbrev_uuid(&registration_id)
        );

        Ok(PaymentIntent {
            payment_id,
            message: "Payment initiated successfully. Please confirm payment.".to_string(),
        })
    }

    async fn confirm(&self, registration_id: RegistrationId) -> Result<PaymentReceipt> {
        let payment_id = uuid::Uuid::new_v4().to_string();

        tracing::info!(
            "Mock provider confirmed payment {} for registration {}",
            payment_id,
            abbrev_uuid(&registration_id)
        );

        Ok(PaymentReceipt {
            payment_id,
            confirmed_at: Utc::now(),
            message: "Payment confirmed successfully.".to_string(),
        })
    }
}
