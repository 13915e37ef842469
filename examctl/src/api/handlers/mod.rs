//! HTTP request handlers for all API endpoints.
//!
//! This module contains Axum route handlers organized by resource type.
//! Each handler is responsible for:
//! - Request validation and deserialization
//! - Authentication and authorization checks
//! - Business logic execution via store repositories
//! - Response serialization
//!
//! # Handler Modules
//!
//! - [`auth`]: Login, current profile, mobile completion, and the caller's registrations
//! - [`contents`]: CMS drafts, publishing, and public content reads
//! - [`enrollments`]: Admin enrollment of single registrations and bulk batches
//! - [`exams`]: Exam CRUD and candidate registration
//! - [`exports`]: CSV export of an exam's registrations
//! - [`health`]: Service banner and health endpoints
//! - [`payments`]: Fee initiation and confirmation for a registration
//! - [`registrations`]: Admin listing and counting of exam registrations
//!
//! # Authentication
//!
//! Protected handlers take the authenticated caller via the
//! [`crate::api::models::users::CurrentUser`] extractor, then check the
//! required permission before touching any record.
//!
//! # Error Handling
//!
//! Handlers return [`crate::errors::Error`] which automatically converts to
//! appropriate HTTP status codes and user-safe messages.

pub mod auth;
pub mod contents;
pub mod enrollments;
pub mod exams;
pub mod exports;
pub mod health;
pub mod payments;
pub mod registrations;
