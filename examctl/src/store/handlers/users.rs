//! Store repository for users.

use crate::types::{abbrev_uuid, UserId};
use crate::{
    api::models::users::Role,
    store::{
        errors::{Result, StoreError},
        handlers::repository::Repository,
        models::users::{UserCreateStoreRequest, UserStoreResponse, UserUpdateStoreRequest},
        Store,
    },
};
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use std::collections::HashMap;
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing users
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<Role>,
}

pub struct Users<'a> {
    store: &'a Store,
}

impl<'a> Users<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Look up a user by email without creating one
    #[instrument(skip(self), err)]
    pub async fn get_by_email(&mut self, email: &str) -> Result<Option<UserStoreResponse>> {
        let Some(id) = self.store.inner.users_by_email.get(email).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        Ok(self.store.inner.users.get(&id).map(|entry| entry.value().clone()))
    }

    /// Return the user with this email, creating the account on first login.
    ///
    /// The email index entry is held while deciding, so two concurrent logins
    /// with the same address resolve to a single record.
    #[instrument(skip(self, request), fields(email = %request.email), err)]
    pub async fn get_or_create_by_email(&mut self, request: &UserCreateStoreRequest) -> Result<UserStoreResponse> {
        match self.store.inner.users_by_email.entry(request.email.clone()) {
            Entry::Occupied(entry) => {
                let id = *entry.get();
                // An index entry without a backing record means the store is corrupt
                self.store
                    .inner
                    .users
                    .get(&id)
                    .map(|entry| entry.value().clone())
                    .ok_or(StoreError::NotFound)
            }
            Entry::Vacant(slot) => {
                let user = new_user_record(request);
                self.store.inner.users.insert(user.id, user.clone());
                slot.insert(user.id);
                Ok(user)
            }
        }
    }
}

fn new_user_record(request: &UserCreateStoreRequest) -> UserStoreResponse {
    let now = Utc::now();
    UserStoreResponse {
        id: Uuid::new_v4(),
        email: request.email.clone(),
        name: request.name.clone(),
        role: request.role,
        mobile: request.mobile.clone(),
        created_at: now,
        updated_at: now,
    }
}

#[async_trait::async_trait]
impl<'a> Repository for Users<'a> {
    type CreateRequest = UserCreateStoreRequest;
    type UpdateRequest = UserUpdateStoreRequest;
    type Response = UserStoreResponse;
    type Id = UserId;
    type Filter = UserFilter;

    #[instrument(skip(self, request), fields(email = %request.email), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        match self.store.inner.users_by_email.entry(request.email.clone()) {
            Entry::Occupied(_) => Err(StoreError::UniqueViolation {
                constraint: "users_email_unique".to_string(),
                message: "An account with this email address already exists".to_string(),
            }),
            Entry::Vacant(slot) => {
                let user = new_user_record(request);
                self.store.inner.users.insert(user.id, user.clone());
                slot.insert(user.id);
                Ok(user)
            }
        }
    }

    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        Ok(self.store.inner.users.get(&id).map(|entry| entry.value().clone()))
    }

    #[instrument(skip(self, ids), fields(count = ids.len()), err)]
    async fn get_bulk(&mut self, ids: Vec<UserId>) -> Result<HashMap<Self::Id, Self::Response>> {
        let mut result = HashMap::new();
        for id in ids {
            if let Some(entry) = self.store.inner.users.get(&id) {
                result.insert(id, entry.value().clone());
            }
        }
        Ok(result)
    }

    #[instrument(skip(self, filter), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut users: Vec<UserStoreResponse> = self
            .store
            .inner
            .users
            .iter()
            .filter(|entry| filter.role.is_none_or(|role| entry.value().role == role))
            .map(|entry| entry.value().clone())
            .collect();
        // Newest first, with the id as a stable tiebreaker
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(users)
    }

    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        match self.store.inner.users.get_mut(&id) {
            Some(mut entry) => {
                let user = entry.value_mut();
                if let Some(name) = &request.name {
                    user.name = name.clone();
                }
                if let Some(mobile) = &request.mobile {
                    user.mobile = Some(mobile.clone());
                }
                if let Some(role) = request.role {
                    user.role = role;
                }
                user.updated_at = Utc::now();
                Ok(user.clone())
            }
            None => Err(StoreError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request(email: &str) -> UserCreateStoreRequest {
        UserCreateStoreRequest {
            email: email.to_string(),
            name: "Test User".to_string(),
            role: Role::User,
            mobile: None,
        }
    }

    // Test: creating two users with the same email reports a unique violation
    #[tokio::test]
    async fn test_create_duplicate_email_fails() {
        let store = Store::new();
        let mut users = store.users();

        users.create(&create_request("dup@example.com")).await.unwrap();
        let err = users.create(&create_request("dup@example.com")).await.unwrap_err();

        assert!(matches!(err, StoreError::UniqueViolation { .. }));
    }

    // Test: get_or_create returns the same record on repeat logins
    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let store = Store::new();
        let mut users = store.users();

        let first = users.get_or_create_by_email(&create_request("alice@example.com")).await.unwrap();
        let second = users.get_or_create_by_email(&create_request("alice@example.com")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(store.inner.users.len(), 1);
    }

    // Test: two concurrent first logins with the same email end up with one record
    #[test_log::test(tokio::test)]
    async fn test_concurrent_get_or_create_single_record() {
        let store = Store::new();
        let store_a = store.clone();
        let store_b = store.clone();

        let (a, b) = tokio::join!(
            async move {
                let mut users = store_a.users();
                users.get_or_create_by_email(&create_request("race@example.com")).await
            },
            async move {
                let mut users = store_b.users();
                users.get_or_create_by_email(&create_request("race@example.com")).await
            }
        );

        assert_eq!(a.unwrap().id, b.unwrap().id);
        assert_eq!(store.inner.users.len(), 1);
    }

    // Test: update applies partial fields and bumps updated_at
    #[tokio::test]
    async fn test_update_partial_fields() {
        let store = Store::new();
        let mut users = store.users();

        let user = users.create(&create_request("bob@example.com")).await.unwrap();
        let updated = users
            .update(
                user.id,
                &UserUpdateStoreRequest {
                    mobile: Some("9876543210".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Test User");
        assert_eq!(updated.mobile.as_deref(), Some("9876543210"));
        assert!(updated.is_profile_complete());
        assert!(updated.updated_at >= user.updated_at);
    }

    // Test: updating an unknown id reports NotFound
    #[tokio::test]
    async fn test_update_unknown_user() {
        let store = Store::new();
        let mut users = store.users();

        let err = users
            .update(Uuid::new_v4(), &UserUpdateStoreRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound));
    }

    // Test: list filters by role
    #[tokio::test]
    async fn test_list_filters_by_role() {
        let store = Store::new();
        let mut users = store.users();

        users.create(&create_request("user@example.com")).await.unwrap();
        let mut admin = create_request("admin@example.com");
        admin.role = Role::Admin;
        users.create(&admin).await.unwrap();

        let admins = users.list(&UserFilter { role: Some(Role::Admin) }).await.unwrap();
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].email, "admin@example.com");

        let everyone = users.list(&UserFilter::default()).await.unwrap();
        assert_eq!(everyone.len(), 2);
    }
}
