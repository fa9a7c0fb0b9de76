//! Entitlements: capabilities a resource can grant.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Resource, ResourceId, ResourceType};

/// What holding an entitlement means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitlementPurpose {
    /// The principal is assigned to the resource (e.g., role membership).
    Assignment,
    /// The principal holds a permission on the resource.
    Permission,
}

/// Identifier of an entitlement: the resource that grants it plus a slug.
///
/// ```rust
/// use googleads_connector::{EntitlementId, ResourceId};
///
/// let id = EntitlementId::new(ResourceId::new("role", "ADMIN"), "member");
/// assert_eq!(id.to_string(), "role:ADMIN:member");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntitlementId {
    resource: ResourceId,
    slug: String,
}

impl EntitlementId {
    /// Creates an entitlement id.
    pub fn new(resource: ResourceId, slug: impl Into<String>) -> Self {
        Self {
            resource,
            slug: slug.into(),
        }
    }

    /// Returns the id of the resource granting the entitlement.
    #[inline]
    pub fn resource(&self) -> &ResourceId {
        &self.resource
    }

    /// Returns the slug.
    #[inline]
    pub fn slug(&self) -> &str {
        &self.slug
    }
}

impl fmt::Display for EntitlementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource, self.slug)
    }
}

/// A capability a resource can grant to principals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    resource: Resource,
    slug: String,
    display_name: String,
    description: String,
    purpose: EntitlementPurpose,
    grantable_to: Vec<String>,
}

impl Entitlement {
    /// Creates an assignment entitlement on `resource`.
    ///
    /// The display name defaults to the slug and the description is empty.
    pub fn assignment(resource: &Resource, slug: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            resource: resource.clone(),
            display_name: slug.clone(),
            slug,
            description: String::new(),
            purpose: EntitlementPurpose::Assignment,
            grantable_to: Vec::new(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Restricts the principal types this entitlement can be granted to.
    #[must_use]
    pub fn with_grantable_to(mut self, resource_type: &ResourceType) -> Self {
        self.grantable_to.push(resource_type.id().to_owned());
        self
    }

    /// Returns the entitlement id.
    pub fn id(&self) -> EntitlementId {
        EntitlementId::new(self.resource.id().clone(), self.slug.clone())
    }

    /// Returns the resource granting the entitlement.
    #[inline]
    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    /// Returns the slug.
    #[inline]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Returns the display name.
    #[inline]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the description.
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the purpose.
    #[inline]
    pub fn purpose(&self) -> EntitlementPurpose {
        self.purpose
    }

    /// Returns the type tags of principals that may hold this entitlement.
    ///
    /// Empty means unrestricted.
    #[inline]
    pub fn grantable_to(&self) -> &[String] {
        &self.grantable_to
    }

    /// Returns `true` if principals of `resource_type` may hold this entitlement.
    pub fn is_grantable_to(&self, resource_type: &str) -> bool {
        self.grantable_to.is_empty() || self.grantable_to.iter().any(|t| t == resource_type)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::ResourceTypeTrait;

    const ROLE: ResourceType = ResourceType::new("role", "Role", &[ResourceTypeTrait::Role]);
    const USER: ResourceType = ResourceType::new("user", "User", &[ResourceTypeTrait::User]);

    #[test]
    fn test_assignment_defaults() {
        let role = Resource::new(&ROLE, "ADMIN", "admin");
        let ent = Entitlement::assignment(&role, "member");

        assert_eq!(ent.slug(), "member");
        assert_eq!(ent.display_name(), "member");
        assert_eq!(ent.description(), "");
        assert_eq!(ent.purpose(), EntitlementPurpose::Assignment);
        assert!(ent.is_grantable_to("anything"));
        assert_eq!(ent.id().to_string(), "role:ADMIN:member");
    }

    #[test]
    fn test_grantable_to_restricts() {
        let role = Resource::new(&ROLE, "ADMIN", "admin");
        let ent = Entitlement::assignment(&role, "member").with_grantable_to(&USER);

        assert_eq!(ent.grantable_to(), ["user".to_string()]);
        assert!(ent.is_grantable_to("user"));
        assert!(!ent.is_grantable_to("account"));
    }
}
