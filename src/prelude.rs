//! Prelude module for convenient imports.
//!
//! ```rust
//! use googleads_connector::prelude::*;
//! ```
//!
//! This provides access to:
//! - The connector, its syncers and the sync runner
//! - Error types
//! - Configuration and credentials
//! - The resource, entitlement and grant model

pub use crate::{
    auth::{BearerToken, CredentialsFile, CredentialsProvider},
    config::ConnectorConfig,
    connector::{Connector, ConnectorMetadata, ResourceSyncer},
    context::SyncContext,
    error::{Error, ErrorKind, Result},
    sync::{SyncOutput, SyncRunner},
    types::{Entitlement, Grant, Page, PageToken, Resource, ResourceId, ResourceType},
};
