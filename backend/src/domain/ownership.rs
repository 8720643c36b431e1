//! Ownership and admin authorisation checks.
//!
//! Reservations and tickets are readable by their owner and by admins only.
//! Ticket reads join through the reservation to find the owner; the owner is
//! dropped before the ticket leaves the domain.

use super::{Error, OwnedETicket, ETicket, Principal, UserId};

/// Result of an ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Authorized,
    Forbidden,
}

/// Stateless guard applied by read services.
#[derive(Debug, Default, Clone, Copy)]
pub struct OwnershipGuard;

impl OwnershipGuard {
    /// Authorised when the principal owns the resource or is an admin.
    #[must_use]
    pub fn check(principal: &Principal, owner: &UserId) -> Access {
        if principal.is_admin || &principal.id == owner {
            Access::Authorized
        } else {
            Access::Forbidden
        }
    }

    /// [`Self::check`] as a `Result`, with `resource` naming the target in
    /// the error message.
    ///
    /// # Errors
    /// Returns a `forbidden` error when access is denied.
    pub fn require(principal: &Principal, owner: &UserId, resource: &str) -> Result<(), Error> {
        match Self::check(principal, owner) {
            Access::Authorized => Ok(()),
            Access::Forbidden => Err(Error::forbidden(format!(
                "not authorised to access this {resource}"
            ))),
        }
    }

    /// Authorise a ticket read and strip the owner.
    ///
    /// # Errors
    /// Returns a `forbidden` error when the principal may not read it.
    pub fn release_ticket(principal: &Principal, owned: OwnedETicket) -> Result<ETicket, Error> {
        Self::require(principal, &owned.owner, "ticket")?;
        Ok(owned.ticket)
    }
}

/// Gate for back-office operations.
///
/// # Errors
/// Returns a `forbidden` error for non-admin principals.
pub fn require_admin(principal: &Principal) -> Result<(), Error> {
    if principal.is_admin {
        Ok(())
    } else {
        Err(Error::forbidden("admin privileges required"))
    }
}
