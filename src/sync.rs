//! Drives the syncers of a [`Connector`] through a full pass.
//!
//! For every syncer the runner pages through `list`, then through
//! `entitlements` and `grants` of each listed resource. Different syncers
//! run concurrently; pages of one syncer are fetched strictly in order.

use std::collections::HashSet;
use std::future::Future;

use futures::future::try_join_all;
use serde::Serialize;

use crate::connector::{Connector, ConnectorMetadata, ResourceSyncer};
use crate::context::SyncContext;
use crate::types::{Entitlement, Grant, Page, PageToken, Resource, ResourceType};
use crate::Error;

/// The identity graph produced by one sync pass.
#[derive(Debug, Clone, Serialize)]
pub struct SyncOutput {
    /// The connector's metadata.
    pub metadata: ConnectorMetadata,
    /// Resource types, in syncer order.
    pub resource_types: Vec<ResourceType>,
    /// Every listed resource.
    pub resources: Vec<Resource>,
    /// Every entitlement offered by a listed resource.
    pub entitlements: Vec<Entitlement>,
    /// Every grant on a listed resource.
    pub grants: Vec<Grant>,
}

impl SyncOutput {
    /// Returns the resources of one type.
    pub fn resources_of<'a>(
        &'a self,
        resource_type: &'a ResourceType,
    ) -> impl Iterator<Item = &'a Resource> {
        self.resources.iter().filter(move |r| r.id().is_type(resource_type))
    }
}

#[derive(Default)]
struct SyncedType {
    resources: Vec<Resource>,
    entitlements: Vec<Entitlement>,
    grants: Vec<Grant>,
}

/// Runs one sync pass over a connector.
///
/// ```rust,ignore
/// let output = SyncRunner::new(&connector, SyncContext::new()).run().await?;
/// println!("{}", serde_json::to_string_pretty(&output)?);
/// ```
#[derive(Debug)]
pub struct SyncRunner<'a> {
    connector: &'a Connector,
    ctx: SyncContext,
}

impl<'a> SyncRunner<'a> {
    /// Creates a runner for `connector` under `ctx`.
    pub fn new(connector: &'a Connector, ctx: SyncContext) -> Self {
        Self { connector, ctx }
    }

    /// Syncs every resource type and collects the graph.
    ///
    /// # Errors
    ///
    /// Fails with the first syncer error, or with a protocol error when a
    /// syncer hands back a page token it already returned.
    pub async fn run(&self) -> Result<SyncOutput, Error> {
        let syncers = self.connector.resource_syncers();
        let synced = try_join_all(
            syncers
                .iter()
                .map(|syncer| sync_resource_type(&self.ctx, syncer.as_ref())),
        )
        .await?;

        let mut output = SyncOutput {
            metadata: self.connector.metadata(),
            resource_types: syncers.iter().map(|s| *s.resource_type()).collect(),
            resources: Vec::new(),
            entitlements: Vec::new(),
            grants: Vec::new(),
        };
        for part in synced {
            output.resources.extend(part.resources);
            output.entitlements.extend(part.entitlements);
            output.grants.extend(part.grants);
        }

        tracing::info!(
            resources = output.resources.len(),
            entitlements = output.entitlements.len(),
            grants = output.grants.len(),
            "sync finished"
        );
        Ok(output)
    }
}

async fn sync_resource_type(
    ctx: &SyncContext,
    syncer: &dyn ResourceSyncer,
) -> Result<SyncedType, Error> {
    let resource_type = syncer.resource_type().id();
    let mut synced = SyncedType {
        resources: collect_pages(resource_type, |token| async move {
            syncer.list(ctx, None, &token).await
        })
        .await?,
        ..SyncedType::default()
    };

    for resource in &synced.resources {
        synced.entitlements.extend(
            collect_pages(resource_type, |token| async move {
                syncer.entitlements(ctx, resource, &token).await
            })
            .await?,
        );
        synced.grants.extend(
            collect_pages(resource_type, |token| async move {
                syncer.grants(ctx, resource, &token).await
            })
            .await?,
        );
    }

    tracing::info!(
        resource_type,
        resources = synced.resources.len(),
        entitlements = synced.entitlements.len(),
        grants = synced.grants.len(),
        "synced resource type"
    );
    Ok(synced)
}

/// Follows page tokens from the start until a page reports no successor.
async fn collect_pages<T, F, Fut>(resource_type: &str, mut fetch: F) -> Result<Vec<T>, Error>
where
    F: FnMut(PageToken) -> Fut,
    Fut: Future<Output = Result<Page<T>, Error>>,
{
    let mut items = Vec::new();
    let mut seen = HashSet::new();
    let mut token = PageToken::start();

    loop {
        let page = fetch(token).await?;
        items.extend(page.items);

        match page.next_page_token {
            None => return Ok(items),
            Some(next) if next.is_start() || !seen.insert(next.clone()) => {
                return Err(Error::protocol(format!(
                    "{} syncer returned page token {:?} twice",
                    resource_type,
                    next.as_str()
                )));
            }
            Some(next) => token = next,
        }
    }
}
