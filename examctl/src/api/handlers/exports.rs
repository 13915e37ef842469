//! CSV export of an exam's registrations, served as a file download.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    api::{
        handlers::registrations::exam_registration_rows,
        models::{registrations::RegistrationStatus, users::CurrentUser},
    },
    auth::permissions::authorize,
    errors::Error,
    types::{ExamId, Operation},
    AppState,
};

/// One line of the export. The column order is part of the download
/// contract; reorder fields here and every downstream spreadsheet breaks.
#[derive(Debug, Serialize)]
struct ExportRow {
    name: String,
    email: String,
    mobile: String,
    status: RegistrationStatus,
    registered_at: DateTime<Utc>,
}

#[tracing::instrument(skip_all)]
pub async fn export_exam_registrations(
    State(state): State<AppState>,
    Path(exam_id): Path<ExamId>,
    user: CurrentUser,
) -> Result<Response, Error> {
    authorize(&user, Operation::ExportExamRegistrations)?;

    let rows = exam_registration_rows(&state, exam_id).await?;

    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    // Written explicitly so the header row survives empty exports
    writer
        .write_record(["name", "email", "mobile", "status", "registered_at"])
        .map_err(|e| anyhow::anyhow!("write registration export header: {e}"))?;
    for row in rows {
        writer
            .serialize(ExportRow {
                name: row.user.name,
                email: row.user.email,
                mobile: row.user.mobile.unwrap_or_default(),
                status: row.status,
                registered_at: row.registered_at,
            })
            .map_err(|e| anyhow::anyhow!("serialize registration export row: {e}"))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flush registration export: {e}"))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"exam_{exam_id}_registrations.csv\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use crate::{
        api::models::{exams::ExamStatus, users::Role},
        store::models::{exams::ExamCreateStoreRequest, registrations::RegistrationCreateStoreRequest},
        test_utils::{auth_header, create_test_app, create_test_user, create_test_user_with_mobile},
        types::{ExamId, UserId},
        AppState,
    };
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    async fn seed_active_exam(state: &AppState) -> ExamId {
        let mut exams = state.store.exams();
        exams
            .create(&ExamCreateStoreRequest {
                title: "Sample Exam".to_string(),
                description: None,
                start_date: Utc::now() + Duration::days(30),
                end_date: Utc::now() + Duration::days(31),
                fee: Decimal::new(500, 0),
                status: ExamStatus::Active,
            })
            .await
            .expect("create exam")
            .id
    }

    async fn seed_registration(state: &AppState, exam_id: ExamId, user_id: UserId) {
        let mut registrations = state.store.registrations();
        registrations
            .create(&RegistrationCreateStoreRequest { exam_id, user_id })
            .await
            .expect("create registration");
    }

    // Test: the export carries a header row plus one line per registration
    #[tokio::test]
    async fn test_export_csv_contents() {
        let (server, state) = create_test_app().await;
        let admin = create_test_user(&state, Role::Admin).await;
        let exam_id = seed_active_exam(&state).await;
        let user = create_test_user_with_mobile(&state, Role::User).await;
        seed_registration(&state, exam_id, user.id).await;

        let (name, value) = auth_header(&admin);
        let response = server
            .get(&format!("/admin/exams/{exam_id}/registrations/export"))
            .add_header(name, value)
            .await;

        response.assert_status_ok();
        let body = response.text();
        let mut lines = body.lines();
        assert_eq!(lines.next(), Some("name,email,mobile,status,registered_at"));
        let row = lines.next().expect("one registration row");
        assert!(row.contains(&user.email));
        assert!(row.contains("9876543210"));
        assert!(row.contains("REGISTERED"));
        assert_eq!(lines.next(), None);
    }

    // Test: the download headers name the file after the exam
    #[tokio::test]
    async fn test_export_response_headers() {
        let (server, state) = create_test_app().await;
        let admin = create_test_user(&state, Role::Admin).await;
        let exam_id = seed_active_exam(&state).await;

        let (name, value) = auth_header(&admin);
        let response = server
            .get(&format!("/admin/exams/{exam_id}/registrations/export"))
            .add_header(name, value)
            .await;

        response.assert_status_ok();
        let headers = response.headers();
        assert_eq!(
            headers.get("content-type").expect("content type").to_str().expect("ascii"),
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            headers
                .get("content-disposition")
                .expect("content disposition")
                .to_str()
                .expect("ascii"),
            format!("attachment; filename=\"exam_{exam_id}_registrations.csv\"")
        );
    }

    // Test: an exam with no registrations still exports the header row
    #[tokio::test]
    async fn test_export_empty_exam() {
        let (server, state) = create_test_app().await;
        let admin = create_test_user(&state, Role::Admin).await;
        let exam_id = seed_active_exam(&state).await;

        let (name, value) = auth_header(&admin);
        let response = server
            .get(&format!("/admin/exams/{exam_id}/registrations/export"))
            .add_header(name, value)
            .await;

        response.assert_status_ok();
        assert_eq!(response.text().trim_end(), "name,email,mobile,status,registered_at");
    }

    // Test: the export is admin-only
    #[tokio::test]
    async fn test_export_requires_admin() {
        let (server, state) = create_test_app().await;
        let exam_id = seed_active_exam(&state).await;
        let user = create_test_user_with_mobile(&state, Role::User).await;
        let (name, value) = auth_header(&user);

        let response = server
            .get(&format!("/admin/exams/{exam_id}/registrations/export"))
            .add_header(name, value)
            .await;

        response.assert_status_forbidden();
    }

    // Test: exporting a missing exam returns 404
    #[tokio::test]
    async fn test_export_unknown_exam() {
        let (server, state) = create_test_app().await;
        let admin = create_test_user(&state, Role::Admin).await;
        let (name, value) = auth_header(&admin);

        let response = server
            .get(&format!("/admin/exams/{}/registrations/export", uuid::Uuid::new_v4()))
            .add_header(name, value)
            .await;

        response.assert_status_not_found();
    }
}
