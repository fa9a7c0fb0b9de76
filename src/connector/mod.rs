//! The Google Ads connector and its resource syncers.
//!
//! The [`Connector`] hands out one [`ResourceSyncer`] per resource type:
//!
//! | Type | Syncer | Upstream call | Entitlements | Grants |
//! |------|--------|---------------|--------------|--------|
//! | `user` | [`UserSyncer`] | `customer_user_access` search | none | none |
//! | `account` | [`AccountSyncer`] | list accessible customers | none | none |
//! | `role` | [`RoleSyncer`] | none (fixed catalog) | `member` | users per role |

mod account;
mod mapping;
mod role;
mod syncer;
mod user;

use std::sync::Arc;

use serde::Serialize;

use crate::config::ConnectorConfig;
use crate::context::SyncContext;
use crate::transport::AdsClientFactory;
use crate::types::{Annotations, ResourceType, ResourceTypeTrait};
use crate::Error;

pub use account::AccountSyncer;
pub use mapping::{account_resource, role_resource, user_resource, user_resource_from_row};
pub use role::{role_label, RoleSyncer, ROLES, ROLE_MEMBERSHIP};
pub use syncer::ResourceSyncer;
pub use user::UserSyncer;

pub(crate) use user::ACCESS_ROLE_FIELD;

use syncer::AdsSettings;

/// Google Ads customer accounts.
pub static ACCOUNT_RESOURCE_TYPE: ResourceType = ResourceType::new("account", "Account", &[]);

/// People with access to a customer.
pub static USER_RESOURCE_TYPE: ResourceType =
    ResourceType::new("user", "User", &[ResourceTypeTrait::User]);

/// Access roles.
pub static ROLE_RESOURCE_TYPE: ResourceType =
    ResourceType::new("role", "Role", &[ResourceTypeTrait::Role]);

/// Static description of the connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectorMetadata {
    /// Human-readable name.
    pub display_name: &'static str,
    /// One-line description.
    pub description: &'static str,
}

/// Syncs Google Ads accounts, users and access roles.
///
/// ## Example
///
/// ```rust
/// use googleads_connector::testing::MockAdsApi;
/// use googleads_connector::{Connector, ConnectorConfig};
///
/// let config = ConnectorConfig::builder()
///     .credentials_json_file_path("/etc/googleads/credentials.json")
///     .developer_token("dev-token")
///     .build();
///
/// let connector = Connector::new(&config, MockAdsApi::new());
/// let types: Vec<&str> = connector
///     .resource_syncers()
///     .iter()
///     .map(|s| s.resource_type().id())
///     .collect();
/// assert_eq!(types, ["user", "account", "role"]);
/// ```
#[derive(Debug, Clone)]
pub struct Connector {
    settings: AdsSettings,
}

impl Connector {
    /// Creates a connector reading from `factory`.
    pub fn new(config: &ConnectorConfig, factory: impl AdsClientFactory + 'static) -> Self {
        Self::with_factory(config, Arc::new(factory))
    }

    /// Creates a connector reading from a shared factory.
    pub fn with_factory(config: &ConnectorConfig, factory: Arc<dyn AdsClientFactory>) -> Self {
        Self {
            settings: AdsSettings::new(
                factory,
                config.developer_token(),
                config.customer_id.as_deref(),
            ),
        }
    }

    /// Validates `config` and creates a connector talking to the Google Ads
    /// REST API with the credentials file it names.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the config is incomplete or the
    /// HTTP client cannot be built.
    #[cfg(feature = "rest")]
    pub fn from_config(config: &ConnectorConfig) -> Result<Self, Error> {
        config.validate()?;
        let factory = crate::transport::RestClientFactory::builder()
            .credentials(config.credentials())
            .build()?;
        Ok(Self::new(config, factory))
    }

    /// Returns the syncers, in sync order: users, accounts, roles.
    pub fn resource_syncers(&self) -> Vec<Box<dyn ResourceSyncer>> {
        vec![
            Box::new(UserSyncer::new(self.settings.clone())),
            Box::new(AccountSyncer::new(self.settings.clone())),
            Box::new(RoleSyncer::new(self.settings.clone())),
        ]
    }

    /// Returns the resource types this connector reports.
    pub fn resource_types(&self) -> [&'static ResourceType; 3] {
        [&USER_RESOURCE_TYPE, &ACCOUNT_RESOURCE_TYPE, &ROLE_RESOURCE_TYPE]
    }

    /// Returns the connector's display name and description.
    pub fn metadata(&self) -> ConnectorMetadata {
        ConnectorMetadata {
            display_name: "Google Ads connector",
            description: "Connector syncing accounts, users and roles from Google Ads.",
        }
    }

    /// Checks the connector configuration.
    ///
    /// Credentials are not exercised here; problems with them surface on
    /// the first syncer call.
    pub async fn validate(&self, _ctx: &SyncContext) -> Result<Annotations, Error> {
        Ok(Annotations::new())
    }
}
