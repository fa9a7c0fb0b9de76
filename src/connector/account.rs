//! Accounts: customers reachable with the configured credentials.

use tracing::Instrument;

use super::mapping::account_resource;
use super::syncer::{AdsSettings, ResourceSyncer};
use super::ACCOUNT_RESOURCE_TYPE;
use crate::context::SyncContext;
use crate::types::{Entitlement, Grant, Page, PageToken, Resource, ResourceId, ResourceType};
use crate::Error;

/// Lists the accessible customers as `account` resources.
///
/// Accounts carry no entitlements or grants.
#[derive(Debug, Clone)]
pub struct AccountSyncer {
    settings: AdsSettings,
}

impl AccountSyncer {
    pub(crate) fn new(settings: AdsSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl ResourceSyncer for AccountSyncer {
    fn resource_type(&self) -> &'static ResourceType {
        &ACCOUNT_RESOURCE_TYPE
    }

    async fn list(
        &self,
        ctx: &SyncContext,
        _parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> Result<Page<Resource>, Error> {
        let span = tracing::debug_span!("list", resource_type = "account", page_token = %token);
        async {
            let call = self.settings.call(ctx);
            let client = self
                .settings
                .connect(&call, "creating customer client")
                .await?;

            let names = call
                .run(client.list_accessible_customers(&call))
                .await
                .map_err(|e| e.context("listing accounts"))?;

            let accounts: Vec<Resource> = names.iter().map(|name| account_resource(name)).collect();
            tracing::debug!(count = accounts.len(), "listed accounts");

            Ok::<_, Error>(Page::last(accounts))
        }
        .instrument(span)
        .await
    }

    async fn entitlements(
        &self,
        _ctx: &SyncContext,
        _resource: &Resource,
        _token: &PageToken,
    ) -> Result<Page<Entitlement>, Error> {
        Ok(Page::empty())
    }

    async fn grants(
        &self,
        _ctx: &SyncContext,
        _resource: &Resource,
        _token: &PageToken,
    ) -> Result<Page<Grant>, Error> {
        Ok(Page::empty())
    }
}
