//! Users: entries of the customer's `customer_user_access` table.

use futures::TryStreamExt;
use tracing::Instrument;

use super::mapping::user_resource_from_row;
use super::syncer::{AdsSettings, ResourceSyncer};
use super::USER_RESOURCE_TYPE;
use crate::context::SyncContext;
use crate::transport::{GoogleAdsRow, Query, SearchRequest};
use crate::types::{
    Annotations, Entitlement, Grant, Page, PageToken, Resource, ResourceId, ResourceType,
    REQUEST_ID_ANNOTATION,
};
use crate::Error;

/// The resource user access rows are read from.
pub(super) const USER_ACCESS_RESOURCE: &str = "customer_user_access";

/// The access role column, used to filter rows by role.
pub(crate) const ACCESS_ROLE_FIELD: &str = "customer_user_access.access_role";

const USER_ACCESS_FIELDS: [&str; 3] = [
    "customer_user_access.user_id",
    "customer_user_access.email_address",
    "customer_user_access.access_role",
];

/// Selects the id, email and role of every user with access to the customer.
pub(super) fn user_access_query() -> Query {
    Query::select(USER_ACCESS_FIELDS).from(USER_ACCESS_RESOURCE)
}

/// Fetches one page of `query` and maps every row to a user resource.
///
/// Rows are read until the page is exhausted; any stream or mapping
/// failure discards the whole page.
pub(super) async fn search_users<T, F>(
    settings: &AdsSettings,
    ctx: &SyncContext,
    query: Query,
    parent: Option<&ResourceId>,
    token: &PageToken,
    mut map: F,
) -> Result<Page<T>, Error>
where
    F: FnMut(Resource) -> T + Send,
    T: Send,
{
    let customer_id = settings.require_customer_id()?;
    let call = settings.call(ctx);
    let client = settings
        .connect(&call, "creating google ads client")
        .await?;

    let request = SearchRequest::new(customer_id, query).with_page_token(token.as_upstream());
    let results = call
        .run(client.search(&call, request))
        .await
        .map_err(|e| e.context("searching customer user access"))?;

    let (rows, next_page_token, request_id) = results.into_parts();
    let rows: Vec<GoogleAdsRow> = call
        .run(rows.try_collect())
        .await
        .map_err(|e| e.context("iterating search results"))?;

    let mut items = Vec::with_capacity(rows.len());
    for row in &rows {
        let user = user_resource_from_row(row, parent).map_err(|e| {
            tracing::warn!(error = %e, "failed to map user access row");
            e.context("creating user resource")
        })?;
        items.push(map(user));
    }

    let mut annotations = Annotations::new();
    if let Some(id) = request_id {
        annotations.insert(REQUEST_ID_ANNOTATION, id);
    }

    tracing::debug!(
        count = items.len(),
        has_next_page = next_page_token.is_some(),
        "fetched user access page"
    );

    Ok(Page::new(items, PageToken::next_from_upstream(next_page_token)).with_annotations(annotations))
}

/// Lists the users with access to the configured customer.
///
/// Requires a customer id. Users have no entitlements or grants of their
/// own; role membership is reported by the role syncer.
#[derive(Debug, Clone)]
pub struct UserSyncer {
    settings: AdsSettings,
}

impl UserSyncer {
    pub(crate) fn new(settings: AdsSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl ResourceSyncer for UserSyncer {
    fn resource_type(&self) -> &'static ResourceType {
        &USER_RESOURCE_TYPE
    }

    async fn list(
        &self,
        ctx: &SyncContext,
        parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> Result<Page<Resource>, Error> {
        let span = tracing::debug_span!("list", resource_type = "user", page_token = %token);
        search_users(&self.settings, ctx, user_access_query(), parent, token, |user| user)
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
