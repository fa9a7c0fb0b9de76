//! Core types of the synchronized identity graph.
//!
//! - [`Resource`]: an account, user or role, identified by [`ResourceId`]
//! - [`Entitlement`]: a capability a resource can grant (role membership)
//! - [`Grant`]: a principal holding an entitlement
//! - [`PageToken`] / [`Page`]: incremental pagination
//! - [`Annotations`]: side information returned with a page

mod annotations;
mod entitlement;
mod grant;
mod pagination;
mod profile;
mod resource;

pub use annotations::{Annotations, REQUEST_ID_ANNOTATION};
pub use entitlement::{Entitlement, EntitlementId, EntitlementPurpose};
pub use grant::Grant;
pub use pagination::{Page, PageToken};
pub use profile::{Profile, ProfileValue};
pub use resource::{Resource, ResourceId, ResourceTrait, ResourceType, ResourceTypeTrait, UserEmail};
