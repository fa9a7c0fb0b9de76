//! Error kind enumeration for categorizing connector errors.

/// Categorization of connector errors.
///
/// The connector never retries on its own. The kind is reported so the
/// governance engine driving the sync can decide whether to retry the same
/// page token, back off, or abort.
///
/// | ErrorKind         | Retriable | Typical cause                          |
/// |-------------------|-----------|----------------------------------------|
/// | `Unavailable`     | Yes       | Google Ads 5xx                         |
/// | `Timeout`         | Yes       | Deadline of the sync context elapsed   |
/// | `RateLimited`     | Yes       | Quota exhausted                        |
/// | `Connection`      | Yes       | DNS, TLS or socket failure             |
/// | `Unauthorized`    | No        | Bad OAuth token or developer token     |
/// | `Forbidden`       | No        | Account not reachable from the manager |
/// | `Configuration`   | No        | Missing token, customer id or file     |
/// | `Mapping`         | No        | Malformed upstream row                 |
/// | `Cancelled`       | No        | Sync context cancelled                 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Authentication failed (invalid or expired OAuth token, bad developer token).
    ///
    /// HTTP: 401 Unauthorized
    #[error("unauthorized")]
    Unauthorized,

    /// Valid credentials without access to the requested customer.
    ///
    /// HTTP: 403 Forbidden
    #[error("forbidden")]
    Forbidden,

    /// Requested customer or endpoint does not exist.
    ///
    /// HTTP: 404 Not Found
    #[error("not found")]
    NotFound,

    /// Invalid request argument, query or page token.
    ///
    /// HTTP: 400 Bad Request
    #[error("invalid argument")]
    InvalidArgument,

    /// Rate limit or API quota exceeded.
    ///
    /// HTTP: 429 Too Many Requests
    ///
    /// **Retriable.** Use `Error::retry_after()` when present.
    #[error("rate limited")]
    RateLimited,

    /// Upstream temporarily unavailable.
    ///
    /// HTTP: 5xx
    ///
    /// **Retriable.**
    #[error("service unavailable")]
    Unavailable,

    /// The deadline carried by the sync context elapsed.
    ///
    /// **Retriable.**
    #[error("timeout")]
    Timeout,

    /// Internal error in the connector or upstream.
    #[error("internal error")]
    Internal,

    /// The sync context was cancelled by the caller.
    #[error("cancelled")]
    Cancelled,

    /// Connection error (DNS, TLS handshake, network unreachable).
    ///
    /// **Retriable.**
    #[error("connection error")]
    Connection,

    /// Protocol error (unexpected upstream behavior such as a page token
    /// that never advances).
    #[error("protocol error")]
    Protocol,

    /// Configuration error (missing developer token, customer id or
    /// credentials file).
    #[error("configuration error")]
    Configuration,

    /// An upstream row could not be mapped to a resource.
    ///
    /// The whole page is discarded; no partial resource is emitted.
    #[error("mapping error")]
    Mapping,

    /// Response body could not be parsed.
    #[error("invalid response")]
    InvalidResponse,

    /// Generic transport error for HTTP issues that don't fit
    /// more specific categories.
    #[error("transport error")]
    Transport,

    /// Unknown or unexpected error.
    #[error("unknown error")]
    Unknown,
}

impl ErrorKind {
    /// Returns `true` if this error kind is generally safe to retry.
    ///
    /// # Example
    ///
    /// ```rust
    /// use googleads_connector::ErrorKind;
    ///
    /// assert!(ErrorKind::Timeout.is_retriable());
    /// assert!(!ErrorKind::Mapping.is_retriable());
    /// ```
    #[inline]
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            ErrorKind::Unavailable
                | ErrorKind::Timeout
                | ErrorKind::RateLimited
                | ErrorKind::Connection
        )
    }

    /// Creates an `ErrorKind` from an HTTP status code returned by the
    /// Google Ads REST endpoints.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::InvalidArgument,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            429 => ErrorKind::RateLimited,
            500..=599 => ErrorKind::Unavailable,
            _ => ErrorKind::Transport,
        }
    }
}
