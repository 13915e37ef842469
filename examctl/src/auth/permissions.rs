//! Permission checking and access control logic.

use crate::api::models::users::{CurrentUser, Role};
use crate::errors::{Error, Result};
use crate::types::{Operation, Permission, UserId};

/// The permission each operation requires.
///
/// Registration and payment operations belong to participants: admins manage
/// the platform through the admin endpoints instead of acting as candidates,
/// so those operations require the USER role rather than merely allowing it.
fn required_permission(action: Operation) -> Permission {
    match action {
        Operation::RegisterForExam | Operation::InitiatePayment | Operation::ConfirmPayment => Permission::UserRole,
        Operation::CreateExam
        | Operation::UpdateExam
        | Operation::Enroll
        | Operation::BulkEnroll
        | Operation::ListExamRegistrations
        | Operation::CountExamRegistrations
        | Operation::ExportExamRegistrations
        | Operation::CreateContent
        | Operation::UpdateContent
        | Operation::PublishContent
        | Operation::ListAllContent => Permission::Admin,
    }
}

/// Check that the user's role permits the operation.
///
/// Runs before any state guard so a denied caller learns nothing about the
/// resource's current status.
pub fn authorize(user: &CurrentUser, action: Operation) -> Result<()> {
    let required = required_permission(action);
    let allowed = match required {
        Permission::Admin => user.role == Role::Admin,
        Permission::UserRole => user.role == Role::User,
        // Ownership is verified separately against the loaded record
        Permission::Owner => false,
    };

    if allowed {
        Ok(())
    } else {
        Err(Error::Forbidden { required, action })
    }
}

/// Check that the caller owns the resource instance
pub fn require_owner(user: &CurrentUser, owner_id: UserId, action: Operation) -> Result<()> {
    if user.id == owner_id {
        Ok(())
    } else {
        Err(Error::Forbidden {
            required: Permission::Owner,
            action,
        })
    }
}
