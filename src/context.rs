//! Execution context for syncer calls.
//!
//! The caller owns cancellation and deadlines through a [`SyncContext`].
//! Each syncer call derives a [`CallContext`] by attaching freshly built
//! [`RequestMetadata`] (developer token and optional login customer id),
//! so concurrent calls from different syncers never share header state.
//!
//! ```rust
//! use std::time::Duration;
//! use googleads_connector::{RequestMetadata, SyncContext};
//!
//! let ctx = SyncContext::new().with_timeout(Duration::from_secs(30));
//! let call = ctx.with_metadata(RequestMetadata::new("dev-token", Some("1234567890")));
//! assert_eq!(call.metadata().login_customer_id(), Some("1234567890"));
//! ```

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use zeroize::Zeroizing;

use crate::Error;

/// Header carrying the Google Ads developer token.
pub const DEVELOPER_TOKEN_HEADER: &str = "developer-token";

/// Header carrying the manager account acting on behalf of a client account.
pub const LOGIN_CUSTOMER_ID_HEADER: &str = "login-customer-id";

/// Caller-supplied cancellation and deadline for syncer calls.
///
/// Cloning is cheap; clones share the same cancellation state.
#[derive(Debug, Clone, Default)]
pub struct SyncContext {
    cancellation: CancellationToken,
    deadline: Option<Instant>,
}

impl SyncContext {
    /// Creates a context that is never cancelled and has no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an existing cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Sets an absolute deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets a deadline relative to now.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Returns the cancellation token.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Returns the deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancels this context and every context cloned from it.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Returns `true` if the context has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Attaches per-call request metadata.
    pub fn with_metadata(&self, metadata: RequestMetadata) -> CallContext {
        CallContext {
            sync: self.clone(),
            metadata,
        }
    }

    /// Runs `fut`, aborting promptly when the context is cancelled or its
    /// deadline elapses. The future is dropped on abort.
    pub async fn run<F, T>(&self, fut: F) -> Result<T, Error>
    where
        F: Future<Output = Result<T, Error>>,
    {
        if self.is_cancelled() {
            return Err(Error::cancelled());
        }

        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    biased;
                    _ = self.cancellation.cancelled() => Err(Error::cancelled()),
                    result = tokio::time::timeout_at(deadline, fut) => match result {
                        Ok(inner) => inner,
                        Err(_) => Err(Error::timeout("deadline of the sync context elapsed")),
                    },
                }
            }
            None => {
                tokio::select! {
                    biased;
                    _ = self.cancellation.cancelled() => Err(Error::cancelled()),
                    result = fut => result,
                }
            }
        }
    }
}

/// Strips the dashes of a `123-456-7890` style customer id.
pub fn normalize_customer_id(id: &str) -> String {
    id.chars().filter(|c| *c != '-').collect()
}

/// Request-scoped headers sent with every Google Ads call.
#[derive(Clone)]
pub struct RequestMetadata {
    developer_token: Zeroizing<String>,
    login_customer_id: Option<String>,
}

impl RequestMetadata {
    /// Creates request metadata.
    ///
    /// The login customer id is sent without dashes; an empty id is
    /// treated as absent.
    pub fn new(developer_token: impl Into<String>, login_customer_id: Option<&str>) -> Self {
        Self {
            developer_token: Zeroizing::new(developer_token.into()),
            login_customer_id: login_customer_id
                .map(normalize_customer_id)
                .filter(|id| !id.is_empty()),
        }
    }

    /// Returns the developer token.
    pub fn developer_token(&self) -> &str {
        &self.developer_token
    }

    /// Returns the login (manager) customer id, if set.
    pub fn login_customer_id(&self) -> Option<&str> {
        self.login_customer_id.as_deref()
    }

    /// Returns the metadata as header name/value pairs.
    pub fn headers(&self) -> Vec<(&'static str, &str)> {
        let mut headers = vec![(DEVELOPER_TOKEN_HEADER, self.developer_token.as_str())];
        if let Some(ref id) = self.login_customer_id {
            headers.push((LOGIN_CUSTOMER_ID_HEADER, id.as_str()));
        }
        headers
    }
}

impl fmt::Debug for RequestMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestMetadata")
            .field("developer_token", &"[REDACTED]")
            .field("login_customer_id", &self.login_customer_id)
            .finish()
    }
}

/// A [`SyncContext`] carrying the metadata of one outgoing call.
#[derive(Debug, Clone)]
pub struct CallContext {
    sync: SyncContext,
    metadata: RequestMetadata,
}

impl CallContext {
    /// Returns the request metadata.
    pub fn metadata(&self) -> &RequestMetadata {
        &self.metadata
    }

    /// Returns the underlying sync context.
    pub fn sync_context(&self) -> &SyncContext {
        &self.sync
    }

    /// Runs `fut` under the cancellation and deadline of the sync context.
    pub async fn run<F, T>(&self, fut: F) -> Result<T, Error>
    where
        F: Future<Output = Result<T, Error>>,
    {
        self.sync.run(fut).await
    }
}
