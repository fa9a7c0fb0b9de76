//! # Google Ads connector
//!
//! Identity-governance connector that reads accounts, users and access
//! roles from Google Ads and reports them as resources, entitlements and
//! grants.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use googleads_connector::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), googleads_connector::Error> {
//!     let config = ConnectorConfig::builder()
//!         .credentials_json_file_path("/etc/googleads/credentials.json")
//!         .developer_token("your-developer-token")
//!         .customer_id("1234567890")
//!         .build();
//!
//!     let connector = Connector::from_config(&config)?;
//!     let output = SyncRunner::new(&connector, SyncContext::new()).run().await?;
//!     println!("{} grants", output.grants.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Syncers**: one [`ResourceSyncer`] per resource type (`user`, `account`, `role`)
//! - **Pagination**: every syncer call returns one [`Page`]; follow
//!   `next_page_token` until it is `None`
//! - **Per-call state**: request metadata and the upstream client are built
//!   inside each call and released when it returns
//! - **Cancellation**: every upstream call races the [`SyncContext`]'s
//!   cancellation token and deadline
//!
//! ## Features
//!
//! - `rest` (default): Google Ads REST data source via reqwest
//! - `rustls` (default): Use rustls for TLS
//! - `native-tls`: Use native TLS (OpenSSL on Linux, Secure Transport on macOS)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod auth;
pub mod config;
pub mod connector;
pub mod context;
pub mod error;
pub mod sync;
pub mod types;

// Data source layer
pub mod transport;

// Testing utilities
pub mod testing;

// Prelude for convenient imports
pub mod prelude;

#[cfg_attr(not(feature = "rest"), allow(dead_code))]
mod user_agent;

// Re-export main types at crate root for convenience
pub use auth::{BearerToken, CredentialsFile, CredentialsProvider};
pub use config::ConnectorConfig;
pub use connector::{
    AccountSyncer, Connector, ConnectorMetadata, ResourceSyncer, RoleSyncer, UserSyncer,
    ACCOUNT_RESOURCE_TYPE, ROLE_RESOURCE_TYPE, USER_RESOURCE_TYPE,
};
pub use context::{normalize_customer_id, CallContext, RequestMetadata, SyncContext};
pub use error::{Error, ErrorKind, Result};
pub use sync::{SyncOutput, SyncRunner};
pub use types::{
    Annotations, Entitlement, EntitlementId, EntitlementPurpose, Grant, Page, PageToken, Profile,
    ProfileValue, Resource, ResourceId, ResourceTrait, ResourceType, ResourceTypeTrait, UserEmail,
};
