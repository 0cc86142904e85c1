//! Authorization decisions.
//!
//! Pure functions over a [`Principal`]: no I/O, no state. Services call them
//! right before a mutating storage operation.

use super::errors::AccessError;
use super::models::Principal;
use super::models::Role;
use crate::domain::user::models::UserId;

/// Allow only principals holding exactly `role`.
///
/// # Errors
/// * `Forbidden` - Principal holds a different role
pub fn require_role(principal: &Principal, role: Role) -> Result<(), AccessError> {
    if principal.role == role {
        Ok(())
    } else {
        Err(AccessError::Forbidden(format!("requires role {}", role)))
    }
}

/// Allow administrators and the owner of the resource.
///
/// # Errors
/// * `Forbidden` - Principal is neither admin nor `owner_id`
pub fn require_owner_or_admin(principal: &Principal, owner_id: UserId) -> Result<(), AccessError> {
    if principal.is_admin() || principal.id == owner_id {
        Ok(())
    } else {
        Err(AccessError::Forbidden(
            "only the author or an administrator may modify this resource".to_string(),
        ))
    }
}
