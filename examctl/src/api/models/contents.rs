//! API request/response models for CMS content.

use crate::store::models::contents::ContentStoreResponse;
use crate::types::ContentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The kinds of content the CMS carries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContentType {
    Course,
    Blog,
    Gallery,
}

/// Publication status. One-way: DRAFT → PUBLISHED.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContentStatus {
    Draft,
    Published,
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentStatus::Draft => write!(f, "DRAFT"),
            ContentStatus::Published => write!(f, "PUBLISHED"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentCreate {
    pub title: String,
    pub body: String,
    pub content_type: ContentType,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
    #[serde(default)]
    pub seo_meta: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContentUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
    pub metadata: Option<Map<String, Value>>,
    pub seo_meta: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentResponse {
    pub id: ContentId,
    pub content_type: ContentType,
    pub title: String,
    pub body: String,
    pub metadata: Map<String, Value>,
    pub status: ContentStatus,
    pub seo_meta: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ContentStoreResponse> for ContentResponse {
    fn from(record: ContentStoreResponse) -> Self {
        Self {
            id: record.id,
            content_type: record.content_type,
            title: record.title,
            body: record.body,
            metadata: record.metadata,
            status: record.status,
            seo_meta: record.seo_meta,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Query parameters for content listings
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ContentQuery {
    pub content_type: Option<ContentType>,
}
