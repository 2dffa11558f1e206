use std::collections::BTreeSet;
use uuid::Uuid;

use crate::errors::{ServiceError, ServiceResult};

/// Represents the authentication context for the current request
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The ID of the authenticated user
    pub user_id: Uuid,

    /// Superusers pass every permission check
    pub superuser: bool,

    /// Permission codes granted to the user, e.g. `"crm.csv_contact"`
    perms: BTreeSet<String>,
}

impl AuthContext {
    /// Create a context with no granted permissions
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            superuser: false,
            perms: BTreeSet::new(),
        }
    }

    /// Create a superuser context, typically for internal system operations
    pub fn superuser(user_id: Uuid) -> Self {
        Self {
            user_id,
            superuser: true,
            perms: BTreeSet::new(),
        }
    }

    /// Grant a permission code to this context
    pub fn grant(&mut self, code: impl Into<String>) {
        self.perms.insert(code.into());
    }

    /// Builder-style variant of [`grant`](Self::grant)
    pub fn with_perm(mut self, code: impl Into<String>) -> Self {
        self.grant(code);
        self
    }

    /// Check if the user holds a specific permission code
    pub fn has_perm(&self, code: &str) -> bool {
        self.superuser || self.perms.contains(code)
    }

    /// Authorize a specific permission code, returning an error if not allowed
    pub fn authorize(&self, code: &str) -> ServiceResult<()> {
        if self.has_perm(code) {
            Ok(())
        } else {
            Err(ServiceError::PermissionDenied(format!(
                "User does not have permission: {}",
                code
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granted_permission_codes() {
        let ctx = AuthContext::new(Uuid::new_v4()).with_perm("crm.csv_contact");
        assert!(ctx.has_perm("crm.csv_contact"));
        assert!(!ctx.has_perm("crm.csv_lead"));
        assert!(ctx.authorize("crm.csv_contact").is_ok());
        assert!(ctx.authorize("crm.csv_lead").is_err());
    }

    #[test]
    fn test_superuser_passes_all_checks() {
        let ctx = AuthContext::superuser(Uuid::new_v4());
        assert!(ctx.has_perm("anything.at_all"));
    }
}
