//! In-memory store for data persistence and access.
//!
//! This module implements the data access layer over sharded concurrent maps.
//! It follows the Repository pattern to provide clean abstractions over store
//! operations, and is where every lifecycle transition is made atomic.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (store::handlers - invariants & transitions)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (store::models - stored records)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   DashMap   │  (sharded in-process maps)
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`handlers`]: Repository implementations for create/read/update operations
//! - [`models`]: Stored record structures
//! - [`errors`]: Store-specific error types
//!
//! # Atomicity
//!
//! Repositories never check a status and write it back in separate steps.
//! Uniqueness checks hold the index entry for the key being inserted, and
//! status transitions hold the record's shard entry, so racing operations
//! serialize per record and exactly one of two conflicting writers wins.

use crate::types::{ContentId, ExamId, RegistrationId, UserId};
use dashmap::DashMap;
use std::sync::Arc;

use crate::store::handlers::{Contents, Exams, Registrations, Users};
use crate::store::models::contents::ContentStoreResponse;
use crate::store::models::exams::ExamStoreResponse;
use crate::store::models::registrations::RegistrationStoreResponse;
use crate::store::models::users::UserStoreResponse;

pub mod errors;
pub mod handlers;
pub mod models;

/// Shared handle to the in-process store. Cheap to clone; all clones see the
/// same data.
#[derive(Clone, Debug, Default)]
pub struct Store {
    inner: Arc<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    users: DashMap<UserId, UserStoreResponse>,
    /// Email uniqueness index; the entry is held while deciding create-vs-load
    users_by_email: DashMap<String, UserId>,
    exams: DashMap<ExamId, ExamStoreResponse>,
    registrations: DashMap<RegistrationId, RegistrationStoreResponse>,
    /// One registration per (exam, user) pair
    registrations_by_exam_user: DashMap<(ExamId, UserId), RegistrationId>,
    contents: DashMap<ContentId, ContentStoreResponse>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository over user records
    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    /// Repository over exam records
    pub fn exams(&self) -> Exams<'_> {
        Exams::new(self)
    }

    /// Repository over registration records
    pub fn registrations(&self) -> Registrations<'_> {
        Registrations::new(self)
    }

    /// Repository over CMS content records
    pub fn contents(&self) -> Contents<'_> {
        Contents::new(self)
    }
}
