//! Roles: the fixed catalog of Google Ads access roles.

use tracing::Instrument;

use super::mapping::role_resource;
use super::syncer::{AdsSettings, ResourceSyncer};
use super::user::{search_users, user_access_query, ACCESS_ROLE_FIELD};
use super::{ROLE_RESOURCE_TYPE, USER_RESOURCE_TYPE};
use crate::context::SyncContext;
use crate::types::{Entitlement, Grant, Page, PageToken, Resource, ResourceId, ResourceType};
use crate::Error;

/// The only entitlement a role offers.
pub const ROLE_MEMBERSHIP: &str = "member";

/// Access roles as `(enum key, label)`, in listing order.
pub const ROLES: [(&str, &str); 5] = [
    ("UNKNOWN", "unknown"),
    ("ADMIN", "admin"),
    ("STANDARD", "standard"),
    ("READ_ONLY", "read_only"),
    ("EMAIL_ONLY", "email_only"),
];

/// Returns the label of a catalog role key.
pub fn role_label(key: &str) -> Option<&'static str> {
    ROLES
        .iter()
        .find(|(role_key, _)| *role_key == key)
        .map(|(_, label)| *label)
}

/// Reports the role catalog, one `member` entitlement per role, and the
/// users holding each role as grants.
#[derive(Debug, Clone)]
pub struct RoleSyncer {
    settings: AdsSettings,
}

impl RoleSyncer {
    pub(crate) fn new(settings: AdsSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl ResourceSyncer for RoleSyncer {
    fn resource_type(&self) -> &'static ResourceType {
        &ROLE_RESOURCE_TYPE
    }

    async fn list(
        &self,
        _ctx: &SyncContext,
        _parent: Option<&ResourceId>,
        _token: &PageToken,
    ) -> Result<Page<Resource>, Error> {
        let roles = ROLES
            .iter()
            .map(|(key, label)| role_resource(key, label))
            .collect();
        Ok(Page::last(roles))
    }

    async fn entitlements(
        &self,
        _ctx: &SyncContext,
        resource: &Resource,
        _token: &PageToken,
    ) -> Result<Page<Entitlement>, Error> {
        let display = resource.display_name();
        let membership = Entitlement::assignment(resource, ROLE_MEMBERSHIP)
            .with_grantable_to(&USER_RESOURCE_TYPE)
            .with_display_name(format!("{} Role {}", display, ROLE_MEMBERSHIP))
            .with_description(format!("Member of {} role", display));
        Ok(Page::last(vec![membership]))
    }

    async fn grants(
        &self,
        ctx: &SyncContext,
        resource: &Resource,
        token: &PageToken,
    ) -> Result<Page<Grant>, Error> {
        let key = resource.id().resource();
        if !resource.id().is_type(&ROLE_RESOURCE_TYPE) || role_label(key).is_none() {
            return Err(Error::invalid_argument(format!(
                "{} is not a Google Ads access role",
                resource.id()
            )));
        }

        let span = tracing::debug_span!("grants", resource_type = "role", role = key, page_token = %token);
        let query = user_access_query().where_eq(ACCESS_ROLE_FIELD, key);
        search_users(&self.settings, ctx, query, None, token, |user| {
            Grant::new(resource, ROLE_MEMBERSHIP, user.id().clone())
        })
        .instrument(span)
        .await
    }
}
