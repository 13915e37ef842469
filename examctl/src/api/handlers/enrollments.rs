//! Admin enrollment endpoints.
//!
//! Enrollment is the terminal transition of the registration lifecycle.
//! Admins may enroll registrations that have not finished the payment
//! flow; the manual override covers fee waivers and payments collected
//! out of band.

use axum::{
    extract::{Path, State},
    Json,
};
use futures::{stream, StreamExt};

use crate::{
    api::models::{
        enrollments::{BulkEnrollmentFailure, BulkEnrollmentRequest, BulkEnrollmentResponse, EnrollmentResponse},
        registrations::RegistrationStatus,
        users::CurrentUser,
    },
    auth::permissions::authorize,
    errors::Error,
    store::{
        errors::StoreError,
        handlers::Repository,
        models::registrations::RegistrationTransitionStoreRequest,
    },
    types::{Operation, RegistrationId},
    AppState,
};

/// Statuses an admin may enroll from. ENROLLED itself is excluded so the
/// transition stays one-way.
const ENROLLABLE: &[RegistrationStatus] = &[
    RegistrationStatus::Registered,
    RegistrationStatus::PaymentPending,
    RegistrationStatus::Paid,
];

async fn enroll_one(state: &AppState, registration_id: RegistrationId) -> Result<EnrollmentResponse, Error> {
    let mut registrations = state.store.registrations();
    let updated = registrations
        .update(
            registration_id,
            &RegistrationTransitionStoreRequest {
                from: ENROLLABLE.to_vec(),
                to: RegistrationStatus::Enrolled,
            },
        )
        .await
        .map_err(|e| match e {
            StoreError::InvalidTransition { current } => Error::InvalidState {
                message: format!("Cannot enroll a registration in {current} status"),
            },
            StoreError::NotFound => Error::NotFound {
                resource: "Registration".to_string(),
                id: registration_id.to_string(),
            },
            other => other.into(),
        })?;

    Ok(EnrollmentResponse {
        registration_id,
        status: updated.status,
        enrolled_at: updated.updated_at,
        message: "Registration enrolled successfully.".to_string(),
    })
}

#[tracing::instrument(skip_all)]
pub async fn enroll_registration(
    State(state): State<AppState>,
    Path(registration_id): Path<RegistrationId>,
    user: CurrentUser,
) -> Result<Json<EnrollmentResponse>, Error> {
    authorize(&user, Operation::Enroll)?;

    let enrollment = enroll_one(&state, registration_id).await?;
    Ok(Json(enrollment))
}

/// Enroll a batch of registrations, reporting a per-item outcome. One bad
/// id never blocks the rest, and outcomes come back in request order.
#[tracing::instrument(skip_all)]
pub async fn bulk_enroll(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<BulkEnrollmentRequest>,
) -> Result<Json<BulkEnrollmentResponse>, Error> {
    authorize(&user, Operation::BulkEnroll)?;

    let results = stream::iter(request.registration_ids.iter().copied().map(|id| {
        let state = state.clone();
        async move { (id, enroll_one(&state, id).await) }
    }))
    .buffered(state.config.bulk_enroll_concurrency)
    .collect::<Vec<_>>()
    .await;

    let mut success = Vec::new();
    let mut failed = Vec::new();
    for (registration_id, result) in results {
        match result {
            Ok(_) => success.push(registration_id),
            Err(e) => failed.push(BulkEnrollmentFailure {
                registration_id,
                reason: e.user_message(),
            }),
        }
    }

    tracing::info!(succeeded = success.len(), failed = failed.len(), "Bulk enrollment complete");

    Ok(Json(BulkEnrollmentResponse { success, failed }))
}
