//! Grants: a principal holding an entitlement.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{EntitlementId, Resource, ResourceId};

/// An assertion that `principal` holds `entitlement`.
///
/// ```rust
/// use googleads_connector::{Grant, Resource, ResourceId, ResourceType};
///
/// const ROLE: ResourceType = ResourceType::new("role", "Role", &[]);
///
/// let admin = Resource::new(&ROLE, "ADMIN", "admin");
/// let grant = Grant::new(&admin, "member", ResourceId::new("user", "1"));
/// assert_eq!(grant.id(), "role:ADMIN:member:user:1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grant {
    entitlement: EntitlementId,
    principal: ResourceId,
}

impl Grant {
    /// Creates a grant of `slug` on `resource` to `principal`.
    pub fn new(resource: &Resource, slug: impl Into<String>, principal: ResourceId) -> Self {
        Self {
            entitlement: EntitlementId::new(resource.id().clone(), slug),
            principal,
        }
    }

    /// Returns the granted entitlement.
    #[inline]
    pub fn entitlement(&self) -> &EntitlementId {
        &self.entitlement
    }

    /// Returns the principal holding the entitlement.
    #[inline]
    pub fn principal(&self) -> &ResourceId {
        &self.principal
    }

    /// Returns the stable grant id (`entitlement:principal`).
    pub fn id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Grant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.entitlement, self.principal)
    }
}
