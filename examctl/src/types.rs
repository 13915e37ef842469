//! Common type definitions and permission system types.
//!
//! This module defines:
//! - Type aliases for entity IDs (UserId, ExamId, etc.)
//! - Operation and permission enums for access control
//!
//! # ID Types
//!
//! All entity IDs are UUIDs wrapped in type aliases for better type safety:
//!
//! - [`UserId`]: User account identifier
//! - [`ExamId`]: Exam identifier
//! - [`RegistrationId`]: Exam registration identifier
//! - [`ContentId`]: CMS content identifier
//!
//! # Authorization
//!
//! Every protected handler names the [`Operation`] it performs and the
//! permission table in [`crate::auth::permissions`] decides which role may
//! perform it. [`Permission`] is what a failed check reports back to the
//! caller.
//!
//! # Utility Functions
//!
//! - [`abbrev_uuid`]: Abbreviate UUIDs to first 8 chars for logging

use std::fmt;
use uuid::Uuid;

// Type aliases for IDs
pub type UserId = Uuid;
pub type ExamId = Uuid;
pub type RegistrationId = Uuid;
pub type ContentId = Uuid;

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}

// Operations that handlers perform on resources. Each maps to a required
// permission in the authorization table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    // Exams
    CreateExam,
    UpdateExam,
    // Registration lifecycle
    RegisterForExam,
    InitiatePayment,
    ConfirmPayment,
    Enroll,
    BulkEnroll,
    // Admin views over registrations
    ListExamRegistrations,
    CountExamRegistrations,
    ExportExamRegistrations,
    // CMS
    CreateContent,
    UpdateContent,
    PublishContent,
    ListAllContent,
}

// Permission levels for authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Requires the ADMIN role
    Admin,
    /// Requires the USER role (admins act on registrations through admin
    /// endpoints, never as participants)
    UserRole,
    /// Caller must own the resource instance; verified against the loaded record
    Owner,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::CreateExam => write!(f, "create exams"),
            Operation::UpdateExam => write!(f, "update exams"),
            Operation::RegisterForExam => write!(f, "register for exams"),
            Operation::InitiatePayment => write!(f, "initiate payment"),
            Operation::ConfirmPayment => write!(f, "confirm payment"),
            Operation::Enroll => write!(f, "enroll registrations"),
            Operation::BulkEnroll => write!(f, "bulk enroll registrations"),
            Operation::ListExamRegistrations => write!(f, "list exam registrations"),
            Operation::CountExamRegistrations => write!(f, "count exam registrations"),
            Operation::ExportExamRegistrations => write!(f, "export exam registrations"),
            Operation::CreateContent => write!(f, "create content"),
            Operation::UpdateContent => write!(f, "update content"),
            Operation::PublishContent => write!(f, "publish content"),
            Operation::ListAllContent => write!(f, "list all content"),
        }
    }
}
