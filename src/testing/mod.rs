//! Testing utilities for the connector.
//!
//! [`MockAdsApi`] is an in-memory [`AdsClientFactory`](crate::transport::AdsClientFactory)
//! that serves accounts and user access rows, paginates, records requests
//! and injects failures.
//!
//! ## Quick Start
//!
//! ```rust
//! use googleads_connector::testing::MockAdsApi;
//! use googleads_connector::{Connector, ConnectorConfig};
//!
//! let api = MockAdsApi::new()
//!     .with_accounts(["customers/111"])
//!     .with_user(1, "alice@example.com", "ADMIN");
//!
//! let config = ConnectorConfig::builder()
//!     .credentials_json_file_path("/dev/null")
//!     .developer_token("dev-token")
//!     .customer_id("111")
//!     .build();
//!
//! let connector = Connector::new(&config, api);
//! assert_eq!(connector.resource_syncers().len(), 3);
//! ```

mod mock_api;

pub use mock_api::{MockAdsApi, RecordedMetadata};
