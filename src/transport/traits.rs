//! Data source trait definitions and common types.
//!
//! The syncers only talk to the Google Ads platform through
//! [`AdsClientFactory`] and [`AdsClient`]. A client is created per syncer
//! call and dropped when the call returns.

use std::fmt;
use std::sync::Arc;

use futures::stream::{self, BoxStream, Stream, StreamExt};

use super::query::Query;
use super::row::GoogleAdsRow;
use crate::context::CallContext;
use crate::Error;

// ============================================================================
// Search Request/Response
// ============================================================================

/// Request for one page of a search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Customer the query is scoped to (digits only).
    pub customer_id: String,
    /// The structured query.
    pub query: Query,
    /// Page to fetch; `None` fetches the first page.
    pub page_token: Option<String>,
}

impl SearchRequest {
    /// Creates a request for the first page.
    pub fn new(customer_id: impl Into<String>, query: Query) -> Self {
        Self {
            customer_id: customer_id.into(),
            query,
            page_token: None,
        }
    }

    /// Sets the page token. An empty token means the first page.
    #[must_use]
    pub fn with_page_token(mut self, token: Option<&str>) -> Self {
        self.page_token = token.filter(|t| !t.is_empty()).map(str::to_owned);
        self
    }
}

/// Stream of rows yielded by a search.
pub type RowStream = BoxStream<'static, Result<GoogleAdsRow, Error>>;

/// One page of search results.
///
/// Rows are consumed lazily; the stream ends when the page is exhausted.
/// A row-level `Err` means the stream failed part way through.
pub struct SearchResults {
    rows: RowStream,
    next_page_token: Option<String>,
    request_id: Option<String>,
}

impl SearchResults {
    /// Creates results from a row stream.
    pub fn new<S>(rows: S) -> Self
    where
        S: Stream<Item = Result<GoogleAdsRow, Error>> + Send + 'static,
    {
        Self {
            rows: rows.boxed(),
            next_page_token: None,
            request_id: None,
        }
    }

    /// Creates results from rows already in memory.
    pub fn from_rows(rows: Vec<GoogleAdsRow>) -> Self {
        Self::new(stream::iter(rows.into_iter().map(Ok)))
    }

    /// Sets the token of the following page. Empty tokens mean "no more pages".
    #[must_use]
    pub fn with_next_page_token(mut self, token: Option<String>) -> Self {
        self.next_page_token = token.filter(|t| !t.is_empty());
        self
    }

    /// Sets the upstream request id.
    #[must_use]
    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }

    /// Returns the token of the following page, if any.
    pub fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }

    /// Returns the upstream request id, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Splits the results into the row stream, next page token and request id.
    pub fn into_parts(self) -> (RowStream, Option<String>, Option<String>) {
        (self.rows, self.next_page_token, self.request_id)
    }
}

impl fmt::Debug for SearchResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchResults")
            .field("next_page_token", &self.next_page_token)
            .field("request_id", &self.request_id)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Client Traits
// ============================================================================

/// A connected Google Ads client.
///
/// Implementations are owned by a single syncer call; dropping the client
/// releases its resources.
#[async_trait::async_trait]
pub trait AdsClient: Send + Sync {
    /// Lists the resource names (`customers/{id}`) of every customer the
    /// credentials can access.
    async fn list_accessible_customers(&self, call: &CallContext) -> Result<Vec<String>, Error>;

    /// Runs a query and returns one page of rows.
    async fn search(&self, call: &CallContext, request: SearchRequest)
    -> Result<SearchResults, Error>;
}

/// Creates [`AdsClient`]s.
///
/// The factory owns the credentials handle; each call to
/// [`connect`](Self::connect) resolves credentials afresh.
#[async_trait::async_trait]
pub trait AdsClientFactory: Send + Sync {
    /// Constructs a client for one call.
    ///
    /// # Errors
    ///
    /// Fails with an authentication, configuration or connection error when
    /// the client cannot be built.
    async fn connect(&self, call: &CallContext) -> Result<Box<dyn AdsClient>, Error>;
}

#[async_trait::async_trait]
impl<T: AdsClientFactory + ?Sized> AdsClientFactory for Arc<T> {
    async fn connect(&self, call: &CallContext) -> Result<Box<dyn AdsClient>, Error> {
        (**self).connect(call).await
    }
}
