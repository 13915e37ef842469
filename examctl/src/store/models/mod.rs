//! Store record models.
//!
//! This module contains struct definitions for the records the store keeps.
//! These models are used by repositories to return query results and accept
//! insertion/update data.
//!
//! # Design Principles
//!
//! - **Separation**: Store models are distinct from API models to allow
//!   independent evolution of storage and API representations
//! - **Type Safety**: Uses type aliases for IDs (UserId, ExamId, etc.)
//! - **Immutable history**: No model carries deletion fields; records only
//!   ever move forward through their lifecycle
//!
//! # Model Categories
//!
//! - [`users`]: User accounts and profiles
//! - [`exams`]: Exam definitions and visibility status
//! - [`registrations`]: Exam registrations and their lifecycle status
//! - [`contents`]: CMS content items and publication status
//!
//! # Conversion to API Models
//!
//! Store models typically implement `From` or `Into` conversions to API models:
//!
//! ```ignore
//! use examctl::store::models::users::UserStoreResponse;
//! use examctl::api::models::users::UserResponse;
//!
//! let record: UserStoreResponse = /* ... */;
//! let api_response: UserResponse = record.into();
//! ```

pub mod contents;
pub mod exams;
pub mod registrations;
pub mod users;
