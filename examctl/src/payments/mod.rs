//! Payment provider abstraction layer.
//!
//! The registration lifecycle owns the status transitions; a provider only
//! supplies the presentation data for a payment (ids, receipts, messages).
//! Keeping the seam here means a real gateway can be added without touching
//! the lifecycle engine.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::types::RegistrationId;

pub mod mock;

pub use mock::MockProvider;

/// Type alias for payment operation results
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Errors a payment provider can report
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The provider rejected or failed the operation
    #[error("Payment provider error: {0}")]
    Provider(String),
}

/// Presentation data for a newly initiated payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub payment_id: String,
    pub message: String,
}

/// Presentation data for a confirmed payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub payment_id: String,
    pub confirmed_at: DateTime<Utc>,
    pub message: String,
}

/// A payment gateway the platform can collect exam fees through
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Start collecting the fee for a registration.
    ///
    /// Returns presentation data only; the lifecycle transition to
    /// PAYMENT_PENDING happens in the registration engine before this call.
    async fn initiate(&self, registration_id: RegistrationId, amount: Decimal) -> Result<PaymentIntent>;

    /// Acknowledge the payment for a registration as settled
    async fn confirm(&self, registration_id: RegistrationId) -> Result<PaymentReceipt>;
}

/// Single construction point for payment providers.
///
/// A real gateway means adding a config variant and a match arm here.
/// Future providers: Stripe, Razorpay.
pub fn create_provider() -> Arc<dyn PaymentProvider> {
    Arc::new(MockProvider::new())
}
