//! Repository implementations for store access.
//!
//! This module provides repository structs for each major entity in the system.
//! Repositories follow a consistent pattern and implement the [`Repository`] trait.
//!
//! # Design Pattern
//!
//! Each repository:
//! - Borrows the shared [`crate::store::Store`]
//! - Provides strongly-typed create/read/update operations
//! - Applies status transitions as compare-and-swaps while holding the
//!   record's shard entry
//! - Returns domain models from [`crate::store::models`]
//!
//! # Available Repositories
//!
//! - [`Users`]: User accounts and profiles
//! - [`Exams`]: Exam definitions and visibility
//! - [`Registrations`]: Registration lifecycle transitions
//! - [`Contents`]: CMS drafts and publishing
//!
//! # Common Pattern
//!
//! All repositories follow this usage pattern:
//!
//! ```ignore
//! use examctl::store::handlers::{Repository, Users};
//!
//! async fn example(store: &examctl::store::Store) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut repo = store.users();
//!     let users = repo.list(&Default::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod contents;
pub mod exams;
pub mod registrations;
pub mod repository;
pub mod users;

pub use contents::Contents;
pub use exams::Exams;
pub use registrations::Registrations;
pub use repository::Repository;
pub use users::Users;
