//! Credentials provider trait for OAuth bearer tokens.

use std::{fmt, future::Future, pin::Pin, sync::Arc};

use zeroize::Zeroizing;

use crate::Error;

/// A type alias for the boxed future returned by credentials providers.
pub type CredentialsFuture<'a> = Pin<Box<dyn Future<Output = Result<String, Error>> + Send + 'a>>;

/// Source of OAuth bearer tokens for Google Ads requests.
///
/// The data source asks for a token every time it constructs a client, so
/// a provider can rotate or refresh tokens however it likes. Acquiring
/// tokens (service accounts, refresh-token exchange) is left to
/// implementations.
///
/// ## Object Safety
///
/// This trait is object-safe and can be used as `Arc<dyn CredentialsProvider>`.
///
/// ## Example: Environment Variable Provider
///
/// ```rust
/// use googleads_connector::CredentialsProvider;
/// use googleads_connector::auth::CredentialsFuture;
///
/// struct EnvTokenProvider {
///     env_var: String,
/// }
///
/// impl CredentialsProvider for EnvTokenProvider {
///     fn get_token(&self) -> CredentialsFuture<'_> {
///         let env_var = self.env_var.clone();
///         Box::pin(async move {
///             std::env::var(&env_var).map_err(|_| {
///                 googleads_connector::Error::configuration(format!(
///                     "environment variable {} not set",
///                     env_var
///                 ))
///             })
///         })
///     }
/// }
/// ```
pub trait CredentialsProvider: Send + Sync {
    /// Returns a future that resolves to a bearer token.
    ///
    /// # Errors
    ///
    /// Return an error if the token cannot be obtained; it is propagated
    /// as a client construction failure.
    fn get_token(&self) -> CredentialsFuture<'_>;
}

impl<T: CredentialsProvider + ?Sized> CredentialsProvider for Arc<T> {
    fn get_token(&self) -> CredentialsFuture<'_> {
        (**self).get_token()
    }
}

impl<T: CredentialsProvider + ?Sized> CredentialsProvider for Box<T> {
    fn get_token(&self) -> CredentialsFuture<'_> {
        (**self).get_token()
    }
}

/// A provider that always returns the same token.
///
/// Useful for tests or when the token is managed outside the connector.
#[derive(Clone)]
pub struct BearerToken {
    token: Arc<Zeroizing<String>>,
}

impl BearerToken {
    /// Creates a new static token provider.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(Zeroizing::new(token.into())),
        }
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl CredentialsProvider for BearerToken {
    fn get_token(&self) -> CredentialsFuture<'_> {
        let token = self.token.clone();
        Box::pin(async move { Ok(token.as_str().to_owned()) })
    }
}
