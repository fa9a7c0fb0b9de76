//! OAuth bearer tokens for Google Ads requests.
//!
//! - [`CredentialsProvider`]: trait for custom token sources
//! - [`CredentialsFile`]: reads `access_token` from the configured JSON file
//! - [`BearerToken`]: a fixed token
//!
//! How tokens are minted is outside this crate; providers only hand them
//! over when a client is constructed.

mod credentials;
mod provider;

pub use credentials::CredentialsFile;
pub use provider::{BearerToken, CredentialsFuture, CredentialsProvider};
