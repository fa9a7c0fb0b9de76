//! Connector configuration.

use std::fmt;
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use crate::auth::CredentialsFile;
use crate::Error;

/// Flag naming the credentials JSON file.
pub const CREDENTIALS_JSON_FILE_PATH_FLAG: &str = "credentials-json-file-path";
/// Environment variable naming the credentials JSON file.
pub const CREDENTIALS_JSON_FILE_PATH_ENV: &str = "GOOGLEADS_CREDENTIALS_JSON_FILE_PATH";
/// Flag carrying the developer token.
pub const DEVELOPER_TOKEN_FLAG: &str = "developer-token";
/// Environment variable carrying the developer token.
pub const DEVELOPER_TOKEN_ENV: &str = "GOOGLEADS_DEVELOPER_TOKEN";
/// Flag carrying the customer id.
pub const CUSTOMER_ID_FLAG: &str = "customer-id";
/// Environment variable carrying the customer id.
pub const CUSTOMER_ID_ENV: &str = "GOOGLEADS_CUSTOMER_ID";

/// Settings shared by every syncer.
///
/// ## Example
///
/// ```rust
/// use googleads_connector::ConnectorConfig;
///
/// let config = ConnectorConfig::builder()
///     .credentials_json_file_path("/etc/googleads/credentials.json")
///     .developer_token("dev-token")
///     .customer_id("1234567890")
///     .build();
///
/// assert!(config.validate().is_ok());
/// assert!(!format!("{:?}", config).contains("dev-token"));
/// ```
#[derive(Clone, bon::Builder)]
pub struct ConnectorConfig {
    /// Path of the JSON credentials file for the Google Ads account.
    #[builder(into)]
    credentials_json_file_path: PathBuf,

    /// The Google Ads developer token.
    #[builder(with = |token: impl Into<String>| Zeroizing::new(token.into()))]
    developer_token: Zeroizing<String>,

    /// Customer id to query. When using a manager account to reach a client
    /// account, this is also sent as the login customer id.
    #[builder(into)]
    pub customer_id: Option<String>,
}

impl ConnectorConfig {
    /// Returns the developer token.
    pub fn developer_token(&self) -> &str {
        &self.developer_token
    }

    /// Returns the credentials file path.
    pub fn credentials_json_file_path(&self) -> &Path {
        &self.credentials_json_file_path
    }

    /// Returns a token provider reading the configured credentials file.
    pub fn credentials(&self) -> CredentialsFile {
        CredentialsFile::new(&self.credentials_json_file_path)
    }

    /// Checks that the required settings are present.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the flag and environment
    /// variable of the first missing setting.
    pub fn validate(&self) -> Result<(), Error> {
        if self.credentials_json_file_path.as_os_str().is_empty() {
            return Err(missing(
                "credentials json file path",
                CREDENTIALS_JSON_FILE_PATH_FLAG,
                CREDENTIALS_JSON_FILE_PATH_ENV,
            ));
        }
        if self.developer_token.is_empty() {
            return Err(missing(
                "developer token",
                DEVELOPER_TOKEN_FLAG,
                DEVELOPER_TOKEN_ENV,
            ));
        }
        Ok(())
    }
}

fn missing(what: &str, flag: &str, env: &str) -> Error {
    Error::configuration(format!(
        "{} is missing, please provide it via --{} flag or ${} environment variable",
        what, flag, env
    ))
}

impl fmt::Debug for ConnectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorConfig")
            .field("credentials_json_file_path", &self.credentials_json_file_path)
            .field("developer_token", &"[REDACTED]")
            .field("customer_id", &self.customer_id)
            .finish()
    }
}
