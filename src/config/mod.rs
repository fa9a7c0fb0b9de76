//! Configuration types for the connector.
//!
//! - [`ConnectorConfig`]: credentials path, developer token and customer id
//!
//! Each setting has a command-line flag and an environment variable; the
//! names are exported so front ends and error messages agree.

mod connector;

pub use connector::{
    ConnectorConfig, CREDENTIALS_JSON_FILE_PATH_ENV, CREDENTIALS_JSON_FILE_PATH_FLAG,
    CUSTOMER_ID_ENV, CUSTOMER_ID_FLAG, DEVELOPER_TOKEN_ENV, DEVELOPER_TOKEN_FLAG,
};
