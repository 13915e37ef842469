//! API layer for HTTP request handling and data models.
//!
//! This module contains the REST API implementation, organized into:
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! # API Structure
//!
//! The API is divided into several functional areas:
//!
//! - **Authentication** (`/auth/*`): Login, profile, and the caller's registrations
//! - **Exams** (`/exams/*`): Listing, detail, admin management, and registration
//! - **Payments** (`/payments/*`): Fee initiation and confirmation for a registration
//! - **Enrollment** (`/admin/registrations/*`): Single and bulk enrollment by admins
//! - **Registration views** (`/admin/exams/{exam_id}/registrations*`): Listing, count, CSV export
//! - **Content** (`/content`, `/admin/content/*`): Public reads and admin CMS workflow

pub mod handlers;
pub mod models;
