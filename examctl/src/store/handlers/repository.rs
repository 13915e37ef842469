//! Base repository trait for store operations.

use std::collections::HashMap;

/// Contains the Repository trait.
///
/// A repository is a data access layer for one entity collection in the store.
/// It provides methods for creating, reading, and updating entities, as well
/// as listing them with simple filters.
use crate::store::errors::Result;

/// Base repository trait providing common store operations
///
/// This trait has separate associated types for create requests, update requests, and responses.
/// There is deliberately no delete: registrations, exams, users, and content are records of what
/// happened and are never removed, only moved forward through their lifecycle.
#[async_trait::async_trait]
pub trait Repository {
    /// The request type for creating entities
    type CreateRequest;

    /// The request type for updating entities
    type UpdateRequest;

    /// The response/DTO type returned by operations
    type Response;

    /// The identifier type for lookups
    type Id: Send + Sync;

    /// The filter type for list operations
    type Filter: Send + Sync;

    /// Create a new entity
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response>;

    /// Get an entity by ID
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>>;

    /// Get lots of entities by their IDs, keyed by ID
    async fn get_bulk(&mut self, ids: Vec<Self::Id>) -> Result<HashMap<Self::Id, Self::Response>>;

    /// List entities with filtering
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>>;

    /// Update an entity by ID
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response>;
}
