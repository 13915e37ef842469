//! Store models for exams.

use crate::api::models::exams::{ExamCreate, ExamStatus, ExamUpdate};
use crate::types::ExamId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Store request for creating a new exam
#[derive(Debug, Clone)]
pub struct ExamCreateStoreRequest {
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub fee: Decimal,
    pub status: ExamStatus,
}

impl From<ExamCreate> for ExamCreateStoreRequest {
    fn from(api: ExamCreate) -> Self {
        Self {
            title: api.title,
            description: api.description,
            start_date: api.start_date,
            end_date: api.end_date,
            fee: api.fee,
            // New exams start hidden unless the admin publishes them up front
            status: api.status.unwrap_or(ExamStatus::Draft),
        }
    }
}

/// Store request for updating an exam
#[derive(Debug, Clone, Default)]
pub struct ExamUpdateStoreRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub fee: Option<Decimal>,
    pub status: Option<ExamStatus>,
}

impl From<ExamUpdate> for ExamUpdateStoreRequest {
    fn from(api: ExamUpdate) -> Self {
        Self {
            title: api.title,
            description: api.description,
            start_date: api.start_date,
            end_date: api.end_date,
            fee: api.fee,
            status: api.status,
        }
    }
}

/// Store response for an exam
#[derive(Debug, Clone)]
pub struct ExamStoreResponse {
    pub id: ExamId,
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub fee: Decimal,
    pub status: ExamStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
