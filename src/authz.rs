//! Ownership and role checks for mutations on owned resources.

use crate::auth::extractors::AuthUser;
use crate::auth::repo_types::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Denied(DenyReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// Caller's role does not match the role the operation requires.
    WrongRole,
    /// The target resource does not exist. Collapsed into the same HTTP
    /// response as `NotOwner` so existence never leaks to non-owners.
    NotFound,
    /// Caller is not the recorded owner of the resource.
    NotOwner,
}

/// Decides whether `identity` may mutate a resource owned by
/// `resource_owner`. Checks are applied in a fixed order: role gate first,
/// then resource existence, then ownership.
///
/// `resource_owner` is `None` when the resource lookup found nothing.
pub fn authorize(
    identity: &AuthUser,
    resource_owner: Option<i64>,
    required_role: Option<Role>,
) -> Access {
    if let Some(required) = required_role {
        if identity.role != required {
            return Access::Denied(DenyReason::WrongRole);
        }
    }

    let Some(owner) = resource_owner else {
        return Access::Denied(DenyReason::NotFound);
    };

    if identity.id != owner {
        return Access::Denied(DenyReason::NotOwner);
    }

    Access::Allowed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employer(id: i64) -> AuthUser {
        AuthUser {
            id,
            role: Role::Employer,
        }
    }

    fn jobseeker(id: i64) -> AuthUser {
        AuthUser {
            id,
            role: Role::Jobseeker,
        }
    }

    #[test]
    fn owner_with_required_role_is_allowed() {
        let access = authorize(&employer(7), Some(7), Some(Role::Employer));
        assert_eq!(access, Access::Allowed);
    }

    #[test]
    fn non_owner_is_denied() {
        let access = authorize(&employer(8), Some(7), Some(Role::Employer));
        assert_eq!(access, Access::Denied(DenyReason::NotOwner));
    }

    #[test]
    fn missing_resource_is_denied() {
        let access = authorize(&employer(7), None, Some(Role::Employer));
        assert_eq!(access, Access::Denied(DenyReason::NotFound));
    }

    #[test]
    fn wrong_role_is_denied_before_ownership() {
        // A jobseeker who somehow owns the resource is still role-gated.
        let access = authorize(&jobseeker(7), Some(7), Some(Role::Employer));
        assert_eq!(access, Access::Denied(DenyReason::WrongRole));
    }

    #[test]
    fn role_gate_runs_before_existence_check() {
        let access = authorize(&jobseeker(7), None, Some(Role::Employer));
        assert_eq!(access, Access::Denied(DenyReason::WrongRole));
    }

    #[test]
    fn no_required_role_skips_role_gate() {
        let access = authorize(&jobseeker(7), Some(7), None);
        assert_eq!(access, Access::Allowed);
    }
}
