//! API request and response data models.
//!
//! This module contains the data structures used for HTTP request deserialization
//! and response serialization. These models define the public API contract.
//!
//! # Design Principles
//!
//! - **Separation of Concerns**: API models are distinct from store models,
//!   allowing independent evolution of API and storage representations
//! - **Validation**: Models use serde for deserialization; business rules are
//!   checked in the handlers
//! - **Type Safety**: Strong typing with type aliases for IDs
//!
//! # Model Categories
//!
//! ## Resource Models
//!
//! - [`users`]: User profiles and roles
//! - [`exams`]: Exam definitions and visibility status
//! - [`contents`]: CMS content items and publication status
//!
//! ## Lifecycle Models
//!
//! - [`registrations`]: Registration records and admin listing rows
//! - [`payments`]: Payment initiation and confirmation responses
//! - [`enrollments`]: Single and bulk enrollment outcomes
//!
//! ## Authentication Models
//!
//! - [`auth`]: Login and profile completion payloads
//!
//! # Example
//!
//! ```ignore
//! use examctl::api::models::exams::{ExamCreate, ExamResponse};
//!
//! // Deserialize from JSON
//! let create_req: ExamCreate = serde_json::from_str(json_str)?;
//!
//! // Serialize to JSON
//! let response = ExamResponse { /* ... */ };
//! let json = serde_json::to_string(&response)?;
//! ```

pub mod auth;
pub mod contents;
pub mod enrollments;
pub mod exams;
pub mod payments;
pub mod registrations;
pub mod users;
