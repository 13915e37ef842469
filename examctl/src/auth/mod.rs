//! Authentication and authorization system.
//!
//! This module provides the auth system for the platform:
//! - Google-identity login that mints JWT session tokens
//! - Bearer-token authentication on every protected route
//! - Role-based permission checking and ownership checks
//!
//! # Authentication
//!
//! Clients log in via `/auth/google` and receive a JWT session token. The
//! token is passed in an `Authorization: Bearer <token>` header; the
//! [`current_user`] extractor verifies it and resolves the subject to a live
//! user record, so the stored role is always authoritative.
//!
//! # Authorization
//!
//! Access control is managed through:
//! - **Roles**: USER registers and pays for exams; ADMIN manages exams,
//!   enrollment, and content
//! - **Ownership**: payment operations only apply to the caller's own
//!   registration
//!
//! Authorization is always checked before any state guard, so a denied caller
//! learns nothing about the resource. See [`permissions`] for the table.
//!
//! # Modules
//!
//! - [`current_user`]: Extractor for getting the authenticated user in handlers
//! - [`permissions`]: Permission checking and access control logic
//! - [`session`]: JWT session token creation and verification
//!
//! # Usage in Handlers
//!
//! ```ignore
//! use examctl::api::models::users::CurrentUser;
//! use examctl::auth::permissions::authorize;
//! use examctl::types::Operation;
//!
//! async fn protected_handler(user: CurrentUser) -> Result<String, Error> {
//!     authorize(&user, Operation::CreateExam)?;
//!     Ok(format!("Hello, {}!", user.name))
//! }
//! ```

pub mod current_user;
pub mod permissions;
pub mod session;
