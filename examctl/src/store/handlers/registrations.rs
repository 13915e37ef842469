//! Store repository for exam registrations.
//!
//! Registration status only moves forward. Every transition is a
//! compare-and-swap: the expected pre-states are checked and the new status
//! written while the record's shard entry is held, so two racing writers can
//! never both apply the same transition.

use crate::types::{abbrev_uuid, ExamId, RegistrationId, UserId};
use crate::{
    api::models::registrations::RegistrationStatus,
    store::{
        errors::{Result, StoreError},
        handlers::repository::Repository,
        models::registrations::{
            RegistrationCreateStoreRequest, RegistrationStoreResponse, RegistrationTransitionStoreRequest,
        },
        Store,
    },
};
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use std::collections::HashMap;
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing registrations
#[derive(Debug, Clone, Default)]
pub struct RegistrationFilter {
    pub exam_id: Option<ExamId>,
    pub user_id: Option<UserId>,
}

pub struct Registrations<'a> {
    store: &'a Store,
}

impl<'a> Registrations<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Count registrations matching the filter without cloning records
    #[instrument(skip(self, filter), err)]
    pub async fn count(&mut self, filter: &RegistrationFilter) -> Result<usize> {
        Ok(self
            .store
            .inner
            .registrations
            .iter()
            .filter(|entry| matches_filter(entry.value(), filter))
            .count())
    }
}

fn matches_filter(registration: &RegistrationStoreResponse, filter: &RegistrationFilter) -> bool {
    filter.exam_id.is_none_or(|exam_id| registration.exam_id == exam_id)
        && filter.user_id.is_none_or(|user_id| registration.user_id == user_id)
}

#[async_trait::async_trait]
impl<'a> Repository for Registrations<'a> {
    type CreateRequest = RegistrationCreateStoreRequest;
    type UpdateRequest = RegistrationTransitionStoreRequest;
    type Response = RegistrationStoreResponse;
    type Id = RegistrationId;
    type Filter = RegistrationFilter;

    #[instrument(
        skip(self, request),
        fields(exam_id = %abbrev_uuid(&request.exam_id), user_id = %abbrev_uuid(&request.user_id)),
        err
    )]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        // The (exam, user) index entry is held while inserting, so concurrent
        // duplicate registrations cannot both succeed
        match self
            .store
            .inner
            .registrations_by_exam_user
            .entry((request.exam_id, request.user_id))
        {
            Entry::Occupied(_) => Err(StoreError::UniqueViolation {
                constraint: "registrations_exam_user_unique".to_string(),
                message: "A registration for this exam and user already exists".to_string(),
            }),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let registration = RegistrationStoreResponse {
                    id: Uuid::new_v4(),
                    exam_id: request.exam_id,
                    user_id: request.user_id,
                    status: RegistrationStatus::Registered,
                    registered_at: now,
                    updated_at: now,
                };
                self.store.inner.registrations.insert(registration.id, registration.clone());
                slot.insert(registration.id);
                Ok(registration)
            }
        }
    }

    #[instrument(skip(self), fields(registration_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        Ok(self.store.inner.registrations.get(&id).map(|entry| entry.value().clone()))
    }

    #[instrument(skip(self, ids), fields(count = ids.len()), err)]
    async fn get_bulk(&mut self, ids: Vec<RegistrationId>) -> Result<HashMap<Self::Id, Self::Response>> {
        let mut result = HashMap::new();
        for id in ids {
            if let Some(entry) = self.store.inner.registrations.get(&id) {
                result.insert(id, entry.value().clone());
            }
        }
        Ok(result)
    }

    #[instrument(skip(self, filter), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut registrations: Vec<RegistrationStoreResponse> = self
            .store
            .inner
            .registrations
            .iter()
            .filter(|entry| matches_filter(entry.value(), filter))
            .map(|entry| entry.value().clone())
            .collect();
        // Newest first, with the id as a stable tiebreaker
        registrations.sort_by(|a, b| b.registered_at.cmp(&a.registered_at).then(b.id.cmp(&a.id)));
        Ok(registrations)
    }

    /// Apply a status transition as a compare-and-swap.
    ///
    /// Exactly one of two racing callers observes a pre-state in `from`; the
    /// other gets [`StoreError::InvalidTransition`] carrying the status the
    /// record actually had.
    #[instrument(
        skip(self, request),
        fields(registration_id = %abbrev_uuid(&id), to = %request.to),
        err
    )]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        match self.store.inner.registrations.get_mut(&id) {
            Some(mut entry) => {
                let registration = entry.value_mut();
                if !request.from.contains(&registration.status) {
                    return Err(StoreError::InvalidTransition {
                        current: registration.status.to_string(),
                    });
                }
                registration.status = request.to;
                registration.updated_at = Utc::now();
                Ok(registration.clone())
            }
            None => Err(StoreError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(from: Vec<RegistrationStatus>, to: RegistrationStatus) -> RegistrationTransitionStoreRequest {
        RegistrationTransitionStoreRequest { from, to }
    }

    async fn create_registration(store: &Store) -> RegistrationStoreResponse {
        let mut registrations = store.registrations();
        registrations
            .create(&RegistrationCreateStoreRequest {
                exam_id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
            })
            .await
            .unwrap()
    }

    // Test: new registrations start in REGISTERED
    #[tokio::test]
    async fn test_create_starts_registered() {
        let store = Store::new();
        let registration = create_registration(&store).await;
        assert_eq!(registration.status, RegistrationStatus::Registered);
    }

    // Test: a second registration for the same exam and user reports a unique violation
    #[tokio::test]
    async fn test_create_duplicate_fails() {
        let store = Store::new();
        let mut registrations = store.registrations();
        let request = RegistrationCreateStoreRequest {
            exam_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
        };

        registrations.create(&request).await.unwrap();
        let err = registrations.create(&request).await.unwrap_err();

        assert!(matches!(err, StoreError::UniqueViolation { .. }));
        assert_eq!(store.inner.registrations.len(), 1);
    }

    // Test: two concurrent creates for the same exam and user produce exactly one record
    #[test_log::test(tokio::test)]
    async fn test_concurrent_duplicate_create_single_winner() {
        let store = Store::new();
        let request = RegistrationCreateStoreRequest {
            exam_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
        };
        let store_a = store.clone();
        let store_b = store.clone();
        let request_a = request.clone();
        let request_b = request.clone();

        let (a, b) = tokio::join!(
            async move {
                let mut registrations = store_a.registrations();
                registrations.create(&request_a).await
            },
            async move {
                let mut registrations = store_b.registrations();
                registrations.create(&request_b).await
            }
        );

        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1, "exactly one create must win");
        assert_eq!(store.inner.registrations.len(), 1);
    }

    // Test: a transition from an unexpected state is rejected with the actual status
    #[tokio::test]
    async fn test_transition_from_wrong_state() {
        let store = Store::new();
        let registration = create_registration(&store).await;
        let mut registrations = store.registrations();

        let err = registrations
            .update(
                registration.id,
                &transition(vec![RegistrationStatus::PaymentPending], RegistrationStatus::Paid),
            )
            .await
            .unwrap_err();

        match err {
            StoreError::InvalidTransition { current } => assert_eq!(current, "REGISTERED"),
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
    }

    // Test: two concurrent identical transitions have exactly one winner
    #[test_log::test(tokio::test)]
    async fn test_concurrent_transition_single_winner() {
        let store = Store::new();
        let registration = create_registration(&store).await;

        let mut setup = store.registrations();
        setup
            .update(
                registration.id,
                &transition(vec![RegistrationStatus::Registered], RegistrationStatus::PaymentPending),
            )
            .await
            .unwrap();

        let store_a = store.clone();
        let store_b = store.clone();
        let confirm = transition(vec![RegistrationStatus::PaymentPending], RegistrationStatus::Paid);
        let confirm_a = confirm.clone();
        let confirm_b = confirm.clone();

        let (a, b) = tokio::join!(
            async move {
                let mut registrations = store_a.registrations();
                registrations.update(registration.id, &confirm_a).await
            },
            async move {
                let mut registrations = store_b.registrations();
                registrations.update(registration.id, &confirm_b).await
            }
        );

        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1, "exactly one transition must win");
        let loser = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
        assert!(matches!(loser, StoreError::InvalidTransition { .. }));

        let current = store.registrations().get_by_id(registration.id).await.unwrap().unwrap();
        assert_eq!(current.status, RegistrationStatus::Paid);
    }

    // Test: transitioning an unknown registration reports NotFound
    #[tokio::test]
    async fn test_transition_unknown_registration() {
        let store = Store::new();
        let mut registrations = store.registrations();

        let err = registrations
            .update(
                Uuid::new_v4(),
                &transition(vec![RegistrationStatus::Registered], RegistrationStatus::Enrolled),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound));
    }

    // Test: count respects the exam filter
    #[tokio::test]
    async fn test_count_with_filter() {
        let store = Store::new();
        let mut registrations = store.registrations();
        let exam_id = Uuid::new_v4();

        for _ in 0..3 {
            registrations
                .create(&RegistrationCreateStoreRequest {
                    exam_id,
                    user_id: Uuid::new_v4(),
                })
                .await
                .unwrap();
        }
        registrations
            .create(&RegistrationCreateStoreRequest {
                exam_id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
            })
            .await
            .unwrap();

        let count = registrations
            .count(&RegistrationFilter {
                exam_id: Some(exam_id),
                user_id: None,
            })
            .await
            .unwrap();
        assert_eq!(count, 3);

        let total = registrations.count(&RegistrationFilter::default()).await.unwrap();
        assert_eq!(total, 4);
    }

    // Test: list filters by user and returns newest first
    #[tokio::test]
    async fn test_list_by_user_newest_first() {
        let store = Store::new();
        let mut registrations = store.registrations();
        let user_id = Uuid::new_v4();

        let first = registrations
            .create(&RegistrationCreateStoreRequest {
                exam_id: Uuid::new_v4(),
                user_id,
            })
            .await
            .unwrap();
        let second = registrations
            .create(&RegistrationCreateStoreRequest {
                exam_id: Uuid::new_v4(),
                user_id,
            })
            .await
            .unwrap();

        let listed = registrations
            .list(&RegistrationFilter {
                exam_id: None,
                user_id: Some(user_id),
            })
            .await
            .unwrap();

        assert_eq!(listed.len(), 2);
        assert!(listed.iter().any(|r| r.id == first.id));
        assert_eq!(listed.last().map(|r| r.id), Some(first.id));
        assert_eq!(listed.first().map(|r| r.id), Some(second.id));
    }
}
