//! Store repository for exams.

use crate::types::{abbrev_uuid, ExamId};
use crate::{
    api::models::exams::ExamStatus,
    store::{
        errors::{Result, StoreError},
        handlers::repository::Repository,
        models::exams::{ExamCreateStoreRequest, ExamStoreResponse, ExamUpdateStoreRequest},
        Store,
    },
};
use chrono::Utc;
use std::collections::HashMap;
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing exams
#[derive(Debug, Clone, Default)]
pub struct ExamFilter {
    pub status: Option<ExamStatus>,
}

pub struct Exams<'a> {
    store: &'a Store,
}

impl<'a> Exams<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl<'a> Repository for Exams<'a> {
    type CreateRequest = ExamCreateStoreRequest;
    type UpdateRequest = ExamUpdateStoreRequest;
    type Response = ExamStoreResponse;
    type Id = ExamId;
    type Filter = ExamFilter;

    #[instrument(skip(self, request), fields(title = %request.title), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let now = Utc::now();
        let exam = ExamStoreResponse {
            id: Uuid::new_v4(),
            title: request.title.clone(),
            description: request.description.clone(),
            start_date: request.start_date,
            end_date: request.end_date,
            fee: request.fee,
            status: request.status,
            created_at: now,
            updated_at: now,
        };
        self.store.inner.exams.insert(exam.id, exam.clone());
        Ok(exam)
    }

    #[instrument(skip(self), fields(exam_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        Ok(self.store.inner.exams.get(&id).map(|entry| entry.value().clone()))
    }

    #[instrument(skip(self, ids), fields(count = ids.len()), err)]
    async fn get_bulk(&mut self, ids: Vec<ExamId>) -> Result<HashMap<Self::Id, Self::Response>> {
        let mut result = HashMap::new();
        for id in ids {
            if let Some(entry) = self.store.inner.exams.get(&id) {
                result.insert(id, entry.value().clone());
            }
        }
        Ok(result)
    }

    #[instrument(skip(self, filter), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut exams: Vec<ExamStoreResponse> = self
            .store
            .inner
            .exams
            .iter()
            .filter(|entry| filter.status.is_none_or(|status| entry.value().status == status))
            .map(|entry| entry.value().clone())
            .collect();
        // Newest first, with the id as a stable tiebreaker
        exams.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(exams)
    }

    #[instrument(skip(self, request), fields(exam_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        match self.store.inner.exams.get_mut(&id) {
            Some(mut entry) => {
                let exam = entry.value_mut();
                if let Some(title) = &request.title {
                    exam.title = title.clone();
                }
                if let Some(description) = &request.description {
                    exam.description = Some(description.clone());
                }
                if let Some(start_date) = request.start_date {
                    exam.start_date = start_date;
                }
                if let Some(end_date) = request.end_date {
                    exam.end_date = end_date;
                }
                if let Some(fee) = request.fee {
                    exam.fee = fee;
                }
                if let Some(status) = request.status {
                    exam.status = status;
                }
                exam.updated_at = Utc::now();
                Ok(exam.clone())
            }
            None => Err(StoreError::NotFound),
        }
    }
}
