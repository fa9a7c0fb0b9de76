//! Resources: the nodes of the synchronized identity graph.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Profile;

/// Capability marker carried by a resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceTypeTrait {
    /// Resources of this type are principals (people).
    User,
    /// Resources of this type are roles that can be granted.
    Role,
}

/// A kind of resource reported by a syncer.
///
/// Resource types are static descriptors; the connector defines one per
/// syncer (`account`, `user`, `role`).
///
/// ```rust
/// use googleads_connector::{ResourceType, ResourceTypeTrait};
///
/// const TEAM: ResourceType = ResourceType::new("team", "Team", &[]);
/// assert_eq!(TEAM.id(), "team");
/// assert!(!TEAM.has_trait(ResourceTypeTrait::User));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceType {
    id: &'static str,
    display_name: &'static str,
    traits: &'static [ResourceTypeTrait],
}

impl ResourceType {
    /// Creates a resource type descriptor.
    pub const fn new(
        id: &'static str,
        display_name: &'static str,
        traits: &'static [ResourceTypeTrait],
    ) -> Self {
        Self {
            id,
            display_name,
            traits,
        }
    }

    /// Returns the type tag (e.g., `"user"`).
    #[inline]
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Returns the human-readable name (e.g., `"User"`).
    #[inline]
    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// Returns the traits resources of this type carry.
    #[inline]
    pub fn traits(&self) -> &'static [ResourceTypeTrait] {
        self.traits
    }

    /// Returns `true` if resources of this type carry the given trait.
    pub fn has_trait(&self, resource_trait: ResourceTypeTrait) -> bool {
        self.traits.contains(&resource_trait)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id)
    }
}

/// Identifier of a resource: its type tag plus an id unique within that type.
///
/// ```rust
/// use googleads_connector::ResourceId;
///
/// let id = ResourceId::new("role", "ADMIN");
/// assert_eq!(id.to_string(), "role:ADMIN");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId {
    resource_type: String,
    resource: String,
}

impl ResourceId {
    /// Creates a resource id.
    pub fn new(resource_type: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            resource: resource.into(),
        }
    }

    /// Returns the type tag.
    #[inline]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Returns the id within the type.
    #[inline]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Returns `true` if this id belongs to the given resource type.
    pub fn is_type(&self, resource_type: &ResourceType) -> bool {
        self.resource_type == resource_type.id()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource_type, self.resource)
    }
}

/// An email address on a user resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserEmail {
    /// The address.
    pub address: String,
    /// Whether the upstream vouches for the address.
    pub verified: bool,
}

/// Trait data attached to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceTrait {
    /// The resource is a principal.
    User {
        /// Known email addresses, primary first.
        emails: Vec<UserEmail>,
    },
    /// The resource is a grantable role.
    Role,
}

/// A node of the identity graph (account, user or role).
///
/// Resources are built fresh on every sync pass. The id (and with it the
/// type) is fixed at construction; there is no way to change it afterwards.
///
/// ```rust
/// use googleads_connector::{Profile, Resource, ResourceType};
///
/// const ACCOUNT: ResourceType = ResourceType::new("account", "Account", &[]);
///
/// let account = Resource::new(&ACCOUNT, "customers/111", "customers/111");
/// assert_eq!(account.id().to_string(), "account:customers/111");
/// assert!(account.profile().is_empty());
/// assert!(account.parent_id().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    id: ResourceId,
    display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Profile::is_empty")]
    profile: Profile,
    #[serde(rename = "trait", default, skip_serializing_if = "Option::is_none")]
    resource_trait: Option<ResourceTrait>,
}

impl Resource {
    /// Creates a resource of the given type.
    pub fn new(
        resource_type: &ResourceType,
        id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: ResourceId::new(resource_type.id(), id),
            display_name: display_name.into(),
            parent_id: None,
            profile: Profile::new(),
            resource_trait: None,
        }
    }

    /// Sets the parent resource.
    #[must_use]
    pub fn with_parent(mut self, parent_id: Option<ResourceId>) -> Self {
        self.parent_id = parent_id;
        self
    }

    /// Sets the profile attributes.
    #[must_use]
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Sets the trait data.
    #[must_use]
    pub fn with_trait(mut self, resource_trait: ResourceTrait) -> Self {
        self.resource_trait = Some(resource_trait);
        self
    }

    /// Returns the resource id.
    #[inline]
    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    /// Returns the type tag.
    #[inline]
    pub fn resource_type(&self) -> &str {
        self.id.resource_type()
    }

    /// Returns the display name.
    #[inline]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the parent resource id, if any.
    #[inline]
    pub fn parent_id(&self) -> Option<&ResourceId> {
        self.parent_id.as_ref()
    }

    /// Returns the profile attributes.
    #[inline]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Returns the trait data, if any.
    #[inline]
    pub fn resource_trait(&self) -> Option<&ResourceTrait> {
        self.resource_trait.as_ref()
    }

    /// Returns the user email addresses, if this is a user resource.
    pub fn emails(&self) -> &[UserEmail] {
        match &self.resource_trait {
            Some(ResourceTrait::User { emails }) => emails,
            _ => &[],
        }
    }
}
