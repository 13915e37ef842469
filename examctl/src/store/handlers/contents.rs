//! Store repository for CMS content.
//!
//! Drafts are mutable; published content is frozen. Both the publish
//! transition and draft edits check status while the record's shard entry is
//! held, so an edit can never land on content that just went public.

use crate::types::{abbrev_uuid, ContentId};
use crate::{
    api::models::contents::{ContentStatus, ContentType},
    store::{
        errors::{Result, StoreError},
        handlers::repository::Repository,
        models::contents::{ContentCreateStoreRequest, ContentStoreResponse, ContentUpdateStoreRequest},
        Store,
    },
};
use chrono::Utc;
use std::collections::HashMap;
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing content
#[derive(Debug, Clone, Default)]
pub struct ContentFilter {
    pub content_type: Option<ContentType>,
    pub status: Option<ContentStatus>,
}

pub struct Contents<'a> {
    store: &'a Store,
}

impl<'a> Contents<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Move a draft to PUBLISHED. One-way: publishing twice is rejected.
    #[instrument(skip(self), fields(content_id = %abbrev_uuid(&id)), err)]
    pub async fn publish(&mut self, id: ContentId) -> Result<ContentStoreResponse> {
        match self.store.inner.contents.get_mut(&id) {
            Some(mut entry) => {
                let content = entry.value_mut();
                if content.status != ContentStatus::Draft {
                    return Err(StoreError::InvalidTransition {
                        current: content.status.to_string(),
                    });
                }
                content.status = ContentStatus::Published;
                content.updated_at = Utc::now();
                Ok(content.clone())
            }
            None => Err(StoreError::NotFound),
        }
    }
}

#[async_trait::async_trait]
impl<'a> Repository for Contents<'a> {
    type CreateRequest = ContentCreateStoreRequest;
    type UpdateRequest = ContentUpdateStoreRequest;
    type Response = ContentStoreResponse;
    type Id = ContentId;
    type Filter = ContentFilter;

    #[instrument(skip(self, request), fields(title = %request.title, content_type = ?request.content_type), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let now = Utc::now();
        let content = ContentStoreResponse {
            id: Uuid::new_v4(),
            content_type: request.content_type,
            title: request.title.clone(),
            body: request.body.clone(),
            metadata: request.metadata.clone(),
            status: ContentStatus::Draft,
            seo_meta: request.seo_meta.clone(),
            created_at: now,
            updated_at: now,
        };
        self.store.inner.contents.insert(content.id, content.clone());
        Ok(content)
    }

    #[instrument(skip(self), fields(content_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        Ok(self.store.inner.contents.get(&id).map(|entry| entry.value().clone()))
    }

    #[instrument(skip(self, ids), fields(count = ids.len()), err)]
    async fn get_bulk(&mut self, ids: Vec<ContentId>) -> Result<HashMap<Self::Id, Self::Response>> {
        let mut result = HashMap::new();
        for id in ids {
            if let Some(entry) = self.store.inner.contents.get(&id) {
                result.insert(id, entry.value().clone());
            }
        }
        Ok(result)
    }

    #[instrument(skip(self, filter), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut contents: Vec<ContentStoreResponse> = self
            .store
            .inner
            .contents
            .iter()
            .filter(|entry| {
                filter.content_type.is_none_or(|t| entry.value().content_type == t)
                    && filter.status.is_none_or(|s| entry.value().status == s)
            })
            .map(|entry| entry.value().clone())
            .collect();
        // Newest first, with the id as a stable tiebreaker
        contents.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(contents)
    }

    /// Apply a draft edit. Rejected once the content is published.
    #[instrument(skip(self, request), fields(content_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        match self.store.inner.contents.get_mut(&id) {
            Some(mut entry) => {
                let content = entry.value_mut();
                if content.status != ContentStatus::Draft {
                    return Err(StoreError::InvalidTransition {
                        current: content.status.to_string(),
                    });
                }
                if let Some(title) = &request.title {
                    content.title = title.clone();
                }
                if let Some(body) = &request.body {
                    content.body = body.clone();
                }
                if let Some(metadata) = &request.metadata {
                    content.metadata = metadata.clone();
                }
                if let Some(seo_meta) = &request.seo_meta {
                    content.seo_meta = seo_meta.clone();
                }
                content.updated_at = Utc::now();
                Ok(content.clone())
            }
            None => Err(StoreError::NotFound),
        }
    }
}
