//! Shared fixtures for the integration tests.

use std::sync::Once;

use googleads_connector::testing::MockAdsApi;
use googleads_connector::{Connector, ConnectorConfig};

/// Customer id used by every fixture.
pub const CUSTOMER_ID: &str = "1112223333";

static TRACING: Once = Once::new();

/// Installs a test subscriber honoring `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A config with every setting present.
pub fn config() -> ConnectorConfig {
    ConnectorConfig::builder()
        .credentials_json_file_path("/etc/googleads/credentials.json")
        .developer_token("integration-dev-token")
        .customer_id(CUSTOMER_ID)
        .build()
}

/// Two accounts and four users across three roles.
pub fn populated_api() -> MockAdsApi {
    MockAdsApi::new()
        .with_accounts(["customers/111", "customers/222"])
        .with_user(1, "alice@example.com", "ADMIN")
        .with_user(2, "bob@example.com", "ADMIN")
        .with_user(3, "carol@example.com", "STANDARD")
        .with_user(4, "dave@example.com", "READ_ONLY")
}

/// A connector over `api` configured with [`config`].
pub fn connector(api: &MockAdsApi) -> Connector {
    init_tracing();
    Connector::new(&config(), api.clone())
}
