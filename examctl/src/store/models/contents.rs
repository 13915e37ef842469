//! Store models for CMS content.

use crate::api::models::contents::{ContentStatus, ContentType};
use crate::types::ContentId;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Store request for creating a new content item (always starts as a draft)
#[derive(Debug, Clone)]
pub struct ContentCreateStoreRequest {
    pub content_type: ContentType,
    pub title: String,
    pub body: String,
    pub metadata: Map<String, Value>,
    pub seo_meta: Map<String, Value>,
}

/// Store request for updating a draft content item
#[derive(Debug, Clone, Default)]
pub struct ContentUpdateStoreRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub metadata: Option<Map<String, Value>>,
    pub seo_meta: Option<Map<String, Value>>,
}

/// Store response for a content item
#[derive(Debug, Clone)]
pub struct ContentStoreResponse {
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
