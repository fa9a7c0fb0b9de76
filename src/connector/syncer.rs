//! The per-resource-type syncer contract and the state syncers share.

use std::fmt;
use std::sync::Arc;

use zeroize::Zeroizing;

use crate::context::{normalize_customer_id, CallContext, RequestMetadata, SyncContext};
use crate::transport::{AdsClient, AdsClientFactory};
use crate::types::{Entitlement, Grant, Page, PageToken, Resource, ResourceId, ResourceType};
use crate::Error;

/// Enumerates one resource type and its entitlements and grants.
///
/// The sync engine drives every syncer through [`list`](Self::list) (paged),
/// then [`entitlements`](Self::entitlements) and [`grants`](Self::grants)
/// for each listed resource. Each call performs at most one upstream
/// request and builds its own request state, so syncers can be shared
/// across tasks.
///
/// ```rust,ignore
/// let mut token = PageToken::start();
/// loop {
///     let page = syncer.list(&ctx, None, &token).await?;
///     // ...
///     match page.next_page_token {
///         Some(next) => token = next,
///         None => break,
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait ResourceSyncer: Send + Sync {
    /// Returns the resource type this syncer produces.
    fn resource_type(&self) -> &'static ResourceType;

    /// Lists one page of resources.
    async fn list(
        &self,
        ctx: &SyncContext,
        parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> Result<Page<Resource>, Error>;

    /// Lists one page of the entitlements `resource` offers.
    async fn entitlements(
        &self,
        ctx: &SyncContext,
        resource: &Resource,
        token: &PageToken,
    ) -> Result<Page<Entitlement>, Error>;

    /// Lists one page of the grants on `resource`.
    async fn grants(
        &self,
        ctx: &SyncContext,
        resource: &Resource,
        token: &PageToken,
    ) -> Result<Page<Grant>, Error>;
}

/// Immutable configuration every syncer holds.
#[derive(Clone)]
pub(crate) struct AdsSettings {
    factory: Arc<dyn AdsClientFactory>,
    developer_token: Arc<Zeroizing<String>>,
    customer_id: Option<String>,
}

impl AdsSettings {
    pub(crate) fn new(
        factory: Arc<dyn AdsClientFactory>,
        developer_token: &str,
        customer_id: Option<&str>,
    ) -> Self {
        Self {
            factory,
            developer_token: Arc::new(Zeroizing::new(developer_token.to_owned())),
            customer_id: customer_id
                .map(normalize_customer_id)
                .filter(|id| !id.is_empty()),
        }
    }

    /// Returns the configured customer id, if any.
    pub(crate) fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    /// Returns the customer id, failing when none is configured.
    pub(crate) fn require_customer_id(&self) -> Result<&str, Error> {
        self.customer_id().ok_or_else(|| {
            Error::configuration(
                "customer id is missing, please provide it via --customer-id flag or $GOOGLEADS_CUSTOMER_ID environment variable",
            )
        })
    }

    /// Builds the call context for one syncer call.
    pub(crate) fn call(&self, ctx: &SyncContext) -> CallContext {
        ctx.with_metadata(RequestMetadata::new(
            self.developer_token.as_str(),
            self.customer_id(),
        ))
    }

    /// Constructs a client for `call`, labelling failures with `stage`.
    pub(crate) async fn connect(
        &self,
        call: &CallContext,
        stage: &'static str,
    ) -> Result<Box<dyn AdsClient>, Error> {
        call.run(self.factory.connect(call))
            .await
            .map_err(|e| e.context(stage))
    }
}

impl fmt::Debug for AdsSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdsSettings")
            .field("developer_token", &"[REDACTED]")
            .field("customer_id", &self.customer_id)
            .finish_non_exhaustive()
    }
}
