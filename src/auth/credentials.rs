//! Credentials loaded from the configured JSON file.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{CredentialsFuture, CredentialsProvider};
use crate::Error;

/// Token provider backed by the credentials JSON file.
///
/// The file is read on every call, so a token rotated on disk is picked up
/// by the next client construction. The file must contain an
/// `access_token` field; other credential types (service accounts,
/// installed-app refresh tokens) need a custom [`CredentialsProvider`].
///
/// ```rust,ignore
/// use googleads_connector::auth::CredentialsFile;
///
/// let credentials = CredentialsFile::new("/etc/googleads/credentials.json");
/// let token = credentials.get_token().await?;
/// ```
#[derive(Clone)]
pub struct CredentialsFile {
    path: PathBuf,
}

#[derive(Deserialize)]
struct CredentialsJson {
    #[serde(rename = "type")]
    kind: Option<String>,
    access_token: Option<String>,
}

impl CredentialsFile {
    /// Creates a provider reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the credentials file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<String, Error> {
        let contents = tokio::fs::read(&self.path).await.map_err(|e| {
            Error::from(e).context(format!(
                "reading credentials file {}",
                self.path.display()
            ))
        })?;

        let parsed: CredentialsJson = serde_json::from_slice(&contents).map_err(|e| {
            Error::configuration(format!(
                "credentials file {} is not valid JSON: {}",
                self.path.display(),
                e
            ))
            .with_source(e)
        })?;

        match parsed.access_token.filter(|t| !t.is_empty()) {
            Some(token) => Ok(token),
            None => Err(Error::configuration(format!(
                "credentials file {} has no access_token (type: {}); provide a custom credentials provider for this credential type",
                self.path.display(),
                parsed.kind.as_deref().unwrap_or("unknown"),
            ))),
        }
    }
}

impl fmt::Debug for CredentialsFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsFile")
            .field("path", &self.path)
            .finish()
    }
}

impl CredentialsProvider for CredentialsFile {
    fn get_token(&self) -> CredentialsFuture<'_> {
        Box::pin(self.load())
    }
}
