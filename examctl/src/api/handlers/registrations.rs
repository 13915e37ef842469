//! Admin views over an exam's registrations, joined with owner profiles.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    api::models::{
        registrations::{ExamRegistrationResponse, RegistrationCountResponse, RegistrationUser},
        users::CurrentUser,
    },
    auth::permissions::authorize,
    errors::Error,
    store::handlers::{registrations::RegistrationFilter, Repository},
    types::{ExamId, Operation},
    AppState,
};

/// All registrations for one exam with their owners' profiles, newest
/// first. Shared with the CSV export so both surfaces serialize the same
/// rows in the same order.
pub(crate) async fn exam_registration_rows(state: &AppState, exam_id: ExamId) -> Result<Vec<ExamRegistrationResponse>, Error> {
    let mut exams = state.store.exams();
    if exams.get_by_id(exam_id).await?.is_none() {
        return Err(Error::NotFound {
            resource: "Exam".to_string(),
            id: exam_id.to_string(),
        });
    }

    let mut registrations = state.store.registrations();
    let records = registrations
        .list(&RegistrationFilter {
            exam_id: Some(exam_id),
            user_id: None,
        })
        .await?;

    let mut users = state.store.users();
    let owners = users.get_bulk(records.iter().map(|r| r.user_id).collect()).await?;

    let mut rows = Vec::with_capacity(records.len());
    for registration in records {
        // Registrations never outlive their owner; a miss here is a bug
        let owner = owners.get(&registration.user_id).ok_or_else(|| Error::Internal {
            operation: format!(
                "resolve user {} for registration {}",
                registration.user_id, registration.id
            ),
        })?;
        rows.push(ExamRegistrationResponse {
            registration_id: registration.id,
            user: RegistrationUser::from(owner.clone()),
            status: registration.status,
            registered_at: registration.registered_at,
        });
    }

    Ok(rows)
}

#[tracing::instrument(skip_all)]
pub async fn list_exam_registrations(
    State(state): State<AppState>,
    Path(exam_id): Path<ExamId>,
    user: CurrentUser,
) -> Result<Json<Vec<ExamRegistrationResponse>>, Error> {
    authorize(&user, Operation::ListExamRegistrations)?;

    let rows = exam_registration_rows(&state, exam_id).await?;
    Ok(Json(rows))
}

#[tracing::instrument(skip_all)]
pub async fn count_exam_registrations(
    State(state): State<AppState>,
    Path(exam_id): Path<ExamId>,
    user: CurrentUser,
) -> Result<Json<RegistrationCountResponse>, Error> {
    authorize(&user, Operation::CountExamRegistrations)?;

    let mut exams = state.store.exams();
    if exams.get_by_id(exam_id).await?.is_none() {
        return Err(Error::NotFound {
            resource: "Exam".to_string(),
            id: exam_id.to_string(),
        });
    }

    let mut registrations = state.store.registrations();
    let count = registrations
        .count(&RegistrationFilter {
            exam_id: Some(exam_id),
            user_id: None,
        })
        .await?;

    Ok(Json(RegistrationCountResponse { exam_id, count }))
}
