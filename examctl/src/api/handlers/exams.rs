use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::models::{
        exams::{ExamCreate, ExamResponse, ExamStatus, ExamUpdate},
        registrations::RegistrationResponse,
        users::CurrentUser,
    },
    auth::permissions::authorize,
    errors::Error,
    store::{
        errors::StoreError,
        handlers::{exams::ExamFilter, Repository},
        models::{
            exams::{ExamCreateStoreRequest, ExamUpdateStoreRequest},
            registrations::RegistrationCreateStoreRequest,
        },
    },
    types::{ExamId, Operation},
    AppState,
};

/// Create an exam. New exams default to DRAFT and stay invisible to
/// regular users until activated.
#[tracing::instrument(skip_all)]
pub async fn create_exam(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<ExamCreate>,
) -> Result<(StatusCode, Json<ExamResponse>), Error> {
    authorize(&user, Operation::CreateExam)?;

    if request.title.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "Exam title must not be empty".to_string(),
        });
    }
    if request.end_date <= request.start_date {
        return Err(Error::InvalidInput {
            message: "start_date must be before end_date".to_string(),
        });
    }
    if request.fee < rust_decimal::Decimal::ZERO {
        return Err(Error::InvalidInput {
            message: "Exam fee must not be negative".to_string(),
        });
    }

    let mut exams = state.store.exams();
    let exam = exams.create(&ExamCreateStoreRequest::from(request)).await?;

    Ok((StatusCode::CREATED, Json(ExamResponse::from(exam))))
}

/// List exams. Admins see everything; regular users only see ACTIVE exams.
#[tracing::instrument(skip_all)]
pub async fn list_exams(State(state): State<AppState>, user: CurrentUser) -> Result<Json<Vec<ExamResponse>>, Error> {
    let filter = if user.is_admin() {
        ExamFilter { status: None }
    } else {
        ExamFilter {
            status: Some(ExamStatus::Active),
        }
    };

    let mut exams = state.store.exams();
    let records = exams.list(&filter).await?;

    Ok(Json(records.into_iter().map(ExamResponse::from).collect()))
}

#[tracing::instrument(skip_all)]
pub async fn get_exam(
    State(state): State<AppState>,
    Path(exam_id): Path<ExamId>,
    user: CurrentUser,
) -> Result<Json<ExamResponse>, Error> {
    let mut exams = state.store.exams();
    let exam = exams.get_by_id(exam_id).await?.ok_or(Error::NotFound {
        resource: "Exam".to_string(),
        id: exam_id.to_string(),
    })?;

    // Return 404 to avoid leaking draft exams to regular users
    if exam.status == ExamStatus::Draft && !user.is_admin() {
        return Err(Error::NotFound {
            resource: "Exam".to_string(),
            id: exam_id.to_string(),
        });
    }

    Ok(Json(ExamResponse::from(exam)))
}

/// Update an exam. Fields left out of the request keep their current value.
#[tracing::instrument(skip_all)]
pub async fn update_exam(
    State(state): State<AppState>,
    Path(exam_id): Path<ExamId>,
    user: CurrentUser,
    Json(request): Json<ExamUpdate>,
) -> Result<Json<ExamResponse>, Error> {
    authorize(&user, Operation::UpdateExam)?;

    if let Some(title) = &request.title {
        if title.trim().is_empty() {
            return Err(Error::InvalidInput {
                message: "Exam title must not be empty".to_string(),
            });
        }
    }
    if let Some(fee) = request.fee {
        if fee < rust_decimal::Decimal::ZERO {
            return Err(Error::InvalidInput {
                message: "Exam fee must not be negative".to_string(),
            });
        }
    }

    let mut exams = state.store.exams();
    let current = exams.get_by_id(exam_id).await?.ok_or(Error::NotFound {
        resource: "Exam".to_string(),
        id: exam_id.to_string(),
    })?;

    // Validate date ordering against the values that will end up stored
    if request.start_date.is_some() || request.end_date.is_some() {
        let start = request.start_date.unwrap_or(current.start_date);
        let end = request.end_date.unwrap_or(current.end_date);
        if end <= start {
            return Err(Error::InvalidInput {
                message: "start_date must be before end_date".to_string(),
            });
        }
    }

    let exam = exams
        .update(exam_id, &ExamUpdateStoreRequest::from(request))
        .await
        .map_err(|e| match e {
            StoreError::NotFound => Error::NotFound {
                resource: "Exam".to_string(),
                id: exam_id.to_string(),
            },
            other => other.into(),
        })?;

    Ok(Json(ExamResponse::from(exam)))
}

/// Register the caller for an exam. Only regular users register; admins
/// manage exams but do not sit them.
#[tracing::instrument(skip_all)]
pub async fn register_for_exam(
    State(state): State<AppState>,
    Path(exam_id): Path<ExamId>,
    user: CurrentUser,
) -> Result<(StatusCode, Json<RegistrationResponse>), Error> {
    authorize(&user, Operation::RegisterForExam)?;

    if !user.is_profile_complete() {
        return Err(Error::InvalidInput {
            message: "Complete your profile (mobile number) before registering for an exam".to_string(),
        });
    }

    let mut exams = state.store.exams();
    let exam = exams.get_by_id(exam_id).await?.ok_or(Error::NotFound {
        resource: "Exam".to_string(),
        id: exam_id.to_string(),
    })?;
    if exam.status != ExamStatus::Active {
        return Err(Error::InvalidInput {
            message: "Exam is not open for registration".to_string(),
        });
    }

    let mut registrations = state.store.registrations();
    let registration = registrations
        .create(&RegistrationCreateStoreRequest {
            exam_id,
            user_id: user.id,
        })
        .await
        .map_err(|e| match e {
            StoreError::UniqueViolation { .. } => Error::Conflict {
                message: "You are already registered for this exam".to_string(),
            },
            other => other.into(),
        })?;

    Ok((StatusCode::CREATED, Json(RegistrationResponse::from(registration))))
}
