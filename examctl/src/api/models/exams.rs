//! API request/response models for exams.

use crate::store::models::exams::ExamStoreResponse;
use crate::types::ExamId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Exam visibility status. DRAFT exams exist only for admins; ACTIVE exams
/// are listed publicly and open for registration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExamStatus {
    Draft,
    Active,
}

impl fmt::Display for ExamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamStatus::Draft => write!(f, "DRAFT"),
            ExamStatus::Active => write!(f, "ACTIVE"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamCreate {
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub fee: Decimal,
    /// Defaults to DRAFT when omitted
    pub status: Option<ExamStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExamUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub fee: Option<Decimal>,
    pub status: Option<ExamStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamResponse {
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

impl From<ExamStoreResponse> for ExamResponse {
    fn from(record: ExamStoreResponse) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            start_date: record.start_date,
            end_date: record.end_date,
            fee: record.fee,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
