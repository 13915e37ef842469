//! HTTP handlers for payment endpoints.
//!
//! Both endpoints move the registration through a compare-and-swap
//! transition before talking to the payment provider, so two racing
//! requests can never both charge the same registration.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    api::models::{
        exams::ExamStatus,
        payments::{PaymentConfirmationResponse, PaymentInitiationResponse},
        registrations::RegistrationStatus,
        users::CurrentUser,
    },
    auth::permissions::{authorize, require_owner},
    errors::Error,
    store::{
        errors::StoreError,
        handlers::Repository,
        models::registrations::RegistrationTransitionStoreRequest,
    },
    types::{Operation, RegistrationId},
    AppState,
};

/// Move a registration from REGISTERED to PAYMENT_PENDING and hand back
/// the provider's payment intent.
#[tracing::instrument(skip_all)]
pub async fn initiate_payment(
    State(state): State<AppState>,
    Path(registration_id): Path<RegistrationId>,
    user: CurrentUser,
) -> Result<Json<PaymentInitiationResponse>, Error> {
    authorize(&user, Operation::InitiatePayment)?;

    let mut registrations = state.store.registrations();
    let registration = registrations.get_by_id(registration_id).await?.ok_or(Error::NotFound {
        resource: "Registration".to_string(),
        id: registration_id.to_string(),
    })?;
    require_owner(&user, registration.user_id, Operation::InitiatePayment)?;

    let mut exams = state.store.exams();
    let exam = exams.get_by_id(registration.exam_id).await?.ok_or(Error::NotFound {
        resource: "Exam".to_string(),
        id: registration.exam_id.to_string(),
    })?;
    if exam.status != ExamStatus::Active {
        return Err(Error::InvalidState {
            message: "Payment cannot be initiated for an exam that is not active".to_string(),
        });
    }

    let updated = registrations
        .update(
            registration_id,
            &RegistrationTransitionStoreRequest {
                from: vec![RegistrationStatus::Registered],
                to: RegistrationStatus::PaymentPending,
            },
        )
        .await
        .map_err(|e| match e {
            StoreError::InvalidTransition { current } => Error::InvalidState {
                message: format!("Payment can only be initiated for registrations in REGISTERED status (current: {current})"),
            },
            StoreError::NotFound => Error::NotFound {
                resource: "Registration".to_string(),
                id: registration_id.to_string(),
            },
            other => other.into(),
        })?;

    let intent = state.payments.initiate(registration_id, exam.fee).await?;

    Ok(Json(PaymentInitiationResponse {
        registration_id,
        status: updated.status,
        payment_id: intent.payment_id,
        message: intent.message,
    }))
}

/// Move a registration from PAYMENT_PENDING to PAID. Exactly one of two
/// racing confirmations wins; the loser sees a conflict.
#[tracing::instrument(skip_all)]
pub async fn confirm_payment(
    State(state): State<AppState>,
    Path(registration_id): Path<RegistrationId>,
    user: CurrentUser,
) -> Result<Json<PaymentConfirmationResponse>, Error> {
    authorize(&user, Operation::ConfirmPayment)?;

    let mut registrations = state.store.registrations();
    let registration = registrations.get_by_id(registration_id).await?.ok_or(Error::NotFound {
        resource: "Registration".to_string(),
        id: registration_id.to_string(),
    })?;
    require_owner(&user, registration.user_id, Operation::ConfirmPayment)?;

    let updated = registrations
        .update(
            registration_id,
            &RegistrationTransitionStoreRequest {
                from: vec![RegistrationStatus::PaymentPending],
                to: RegistrationStatus::Paid,
            },
        )
        .await
        .map_err(|e| match e {
            StoreError::InvalidTransition { current } => Error::InvalidState {
                message: format!("Payment can only be confirmed for registrations in PAYMENT_PENDING status (current: {current})"),
            },
            StoreError::NotFound => Error::NotFound {
                resource: "Registration".to_string(),
                id: registration_id.to_string(),
            },
            other => other.into(),
        })?;

    let receipt = state.payments.confirm(registration_id).await?;

    Ok(Json(PaymentConfirmationResponse {
        registration_id,
        status: updated.status,
        payment_id: receipt.payment_id,
        confirmed_at: receipt.confirmed_at,
        message: receipt.message,
    }))
}
