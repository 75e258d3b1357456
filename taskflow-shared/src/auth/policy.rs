/// Access policy engine
///
/// A pure decision function binding identity, tenancy, and role to an
/// intended action. Every resource-bearing operation in the API calls
/// [`authorize`] before touching the repository.
///
/// # Rules, in order
///
/// 1. **Tenancy**: the identity's organization must match the resource's
///    organization, for every action including reads.
/// 2. **Role**: mutating actions (create, update, delete) additionally
///    require `ADMIN`.
/// 3. Read actions pass with any authenticated role once tenancy passes.
///
/// The tenancy check runs unconditionally before the role check, so a
/// same-role user from another organization is denied for the correct reason
/// category, and new action types compose without reordering risk.
///
/// # Example
///
/// ```
/// use taskflow_shared::auth::jwt::Identity;
/// use taskflow_shared::auth::policy::{authorize, Action, PolicyError};
/// use taskflow_shared::models::user::Role;
///
/// let admin = Identity { subject_id: 1, org_id: 1, role: Role::Admin };
///
/// assert!(authorize(&admin, Action::CreateTask, 1).is_ok());
/// assert!(matches!(
///     authorize(&admin, Action::CreateTask, 2),
///     Err(PolicyError::CrossTenant { .. })
/// ));
/// ```
use crate::auth::jwt::Identity;
use crate::models::user::Role;

/// Actions subject to policy decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// List or get tasks
    ReadTask,

    /// Create a task
    CreateTask,

    /// Update a task's status
    UpdateTask,

    /// Delete a task
    DeleteTask,
}

impl Action {
    /// Whether this action mutates state and therefore requires ADMIN
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Action::CreateTask | Action::UpdateTask | Action::DeleteTask
        )
    }
}

/// Deny reasons from the policy engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    /// Identity's organization does not match the resource's organization
    #[error("Resource belongs to another organization")]
    CrossTenant {
        identity_org: i64,
        resource_org: i64,
    },

    /// Mutating action attempted without ADMIN role
    #[error("Admin privileges required")]
    InsufficientRole { actual: Role },
}

/// Decides whether `identity` may perform `action` on a resource owned by
/// `resource_org_id`
///
/// # Errors
///
/// - `PolicyError::CrossTenant` if the organizations differ (checked first)
/// - `PolicyError::InsufficientRole` if a non-admin attempts a mutation
pub fn authorize(
    identity: &Identity,
    action: Action,
    resource_org_id: i64,
) -> Result<(), PolicyError> {
    // Tenancy before role, always
    if identity.org_id != resource_org_id {
        return Err(PolicyError::CrossTenant {
            identity_org: identity.org_id,
            resource_org: resource_org_id,
        });
    }

    if action.is_mutating() && identity.role != Role::Admin {
        return Err(PolicyError::InsufficientRole {
            actual: identity.role,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTIONS: [Action; 4] = [
        Action::ReadTask,
        Action::CreateTask,
        Action::UpdateTask,
        Action::DeleteTask,
    ];

    fn identity(org_id: i64, role: Role) -> Identity {
        Identity {
            subject_id: 1,
            org_id,
            role,
        }
    }

    #[test]
    fn test_cross_tenant_denied_for_every_action_and_role() {
        for role in [Role::Admin, Role::User] {
            for action in ACTIONS {
                let result = authorize(&identity(1, role), action, 2);
                assert!(
                    matches!(result, Err(PolicyError::CrossTenant { .. })),
                    "org mismatch must deny {:?} for {:?}",
                    action,
                    role
                );
            }
        }
    }

    #[test]
    fn test_admin_allowed_on_all_actions_in_own_org() {
        for action in ACTIONS {
            assert!(authorize(&identity(1, Role::Admin), action, 1).is_ok());
        }
    }

    #[test]
    fn test_user_denied_on_mutations_in_own_org() {
        for action in [Action::CreateTask, Action::UpdateTask, Action::DeleteTask] {
            let result = authorize(&identity(1, Role::User), action, 1);
            assert!(matches!(
                result,
                Err(PolicyError::InsufficientRole { actual: Role::User })
            ));
        }
    }

    #[test]
    fn test_user_allowed_on_read_in_own_org() {
        assert!(authorize(&identity(1, Role::User), Action::ReadTask, 1).is_ok());
    }

    #[test]
    fn test_tenancy_checked_before_role() {
        // A USER from another org attempting a mutation fails the tenancy
        // check, not the role check
        let result = authorize(&identity(1, Role::User), Action::DeleteTask, 2);
        assert!(matches!(result, Err(PolicyError::CrossTenant { .. })));
    }

    #[test]
    fn test_action_mutability() {
        assert!(!Action::ReadTask.is_mutating());
        assert!(Action::CreateTask.is_mutating());
        assert!(Action::UpdateTask.is_mutating());
        assert!(Action::DeleteTask.is_mutating());
    }
}
