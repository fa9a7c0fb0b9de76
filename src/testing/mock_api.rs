//! In-memory Google Ads data source for tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use futures::stream;
use parking_lot::{Mutex, RwLock};

use crate::connector::ACCESS_ROLE_FIELD;
use crate::context::CallContext;
use crate::transport::{
    AdsClient, AdsClientFactory, CustomerUserAccess, GoogleAdsRow, SearchRequest, SearchResults,
};
use crate::Error;

/// A mock Google Ads API.
///
/// Serves accessible customers and `customer_user_access` rows from memory,
/// paginating with offset tokens. Failures are injected one-shot: each
/// `fail_next_*` error is returned by the next matching call only.
///
/// ## Example
///
/// ```rust
/// use googleads_connector::testing::MockAdsApi;
///
/// let api = MockAdsApi::new()
///     .with_accounts(["customers/111", "customers/222"])
///     .with_user(1, "alice@example.com", "ADMIN")
///     .with_page_size(10);
///
/// assert_eq!(api.connect_count(), 0);
/// ```
#[derive(Clone, Default)]
pub struct MockAdsApi {
    state: Arc<State>,
}

#[derive(Default)]
struct State {
    accounts: RwLock<Vec<String>>,
    rows: RwLock<Vec<GoogleAdsRow>>,
    page_size: RwLock<Option<usize>>,
    request_id: RwLock<Option<String>>,
    connect_failure: Mutex<Option<Error>>,
    list_failure: Mutex<Option<Error>>,
    search_failure: Mutex<Option<Error>>,
    stream_failure: Mutex<Option<(usize, Error)>>,
    stall: AtomicBool,
    connects: AtomicUsize,
    releases: AtomicUsize,
    searches: Mutex<Vec<SearchRequest>>,
    metadata: Mutex<Vec<RecordedMetadata>>,
}

/// Request metadata observed by the mock on one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedMetadata {
    /// The developer token header.
    pub developer_token: String,
    /// The login customer id header, if sent.
    pub login_customer_id: Option<String>,
}

impl MockAdsApi {
    /// Creates an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the accessible customer resource names.
    #[must_use]
    pub fn with_accounts<I, S>(self, accounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.state.accounts.write() = accounts.into_iter().map(Into::into).collect();
        self
    }

    /// Appends raw search rows.
    #[must_use]
    pub fn with_rows(self, rows: impl IntoIterator<Item = GoogleAdsRow>) -> Self {
        self.state.rows.write().extend(rows);
        self
    }

    /// Appends a user access row.
    #[must_use]
    pub fn with_user(self, user_id: i64, email: impl Into<String>, role: impl Into<String>) -> Self {
        self.with_rows([GoogleAdsRow::user_access(CustomerUserAccess {
            user_id: Some(user_id),
            email_address: Some(email.into()),
            access_role: Some(role.into()),
        })])
    }

    /// Limits the number of rows per page. Unlimited by default.
    #[must_use]
    pub fn with_page_size(self, page_size: usize) -> Self {
        *self.state.page_size.write() = Some(page_size.max(1));
        self
    }

    /// Sets the request id reported with every search page.
    #[must_use]
    pub fn with_request_id(self, request_id: impl Into<String>) -> Self {
        *self.state.request_id.write() = Some(request_id.into());
        self
    }

    /// Fails the next client construction.
    pub fn fail_next_connect(&self, error: Error) {
        *self.state.connect_failure.lock() = Some(error);
    }

    /// Fails the next accessible customer listing.
    pub fn fail_next_list(&self, error: Error) {
        *self.state.list_failure.lock() = Some(error);
    }

    /// Fails the next search before any row is returned.
    pub fn fail_next_search(&self, error: Error) {
        *self.state.search_failure.lock() = Some(error);
    }

    /// Makes the next search stream fail after yielding `rows` rows.
    pub fn fail_stream_after(&self, rows: usize, error: Error) {
        *self.state.stream_failure.lock() = Some((rows, error));
    }

    /// Makes every search hang until the caller gives up.
    pub fn stall_searches(&self) {
        self.state.stall.store(true, Ordering::SeqCst);
    }

    /// Returns the number of clients constructed.
    pub fn connect_count(&self) -> usize {
        self.state.connects.load(Ordering::SeqCst)
    }

    /// Returns the number of clients dropped.
    pub fn released_count(&self) -> usize {
        self.state.releases.load(Ordering::SeqCst)
    }

    /// Returns every search request received, in order.
    pub fn searches(&self) -> Vec<SearchRequest> {
        self.state.searches.lock().clone()
    }

    /// Returns the metadata seen on every client call, in order.
    pub fn recorded_metadata(&self) -> Vec<RecordedMetadata> {
        self.state.metadata.lock().clone()
    }

    fn record_metadata(&self, call: &CallContext) {
        self.state.metadata.lock().push(RecordedMetadata {
            developer_token: call.metadata().developer_token().to_owned(),
            login_customer_id: call.metadata().login_customer_id().map(str::to_owned),
        });
    }
}

#[async_trait::async_trait]
impl AdsClientFactory for MockAdsApi {
    async fn connect(&self, call: &CallContext) -> Result<Box<dyn AdsClient>, Error> {
        if let Some(error) = self.state.connect_failure.lock().take() {
            return Err(error);
        }
        self.record_metadata(call);
        self.state.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockAdsClient { api: self.clone() }))
    }
}

/// Client handed out by [`MockAdsApi`].
struct MockAdsClient {
    api: MockAdsApi,
}

impl Drop for MockAdsClient {
    fn drop(&mut self) {
        self.api.state.releases.fetch_add(1, Ordering::SeqCst);
        tracing::trace!("released mock Google Ads client");
    }
}

#[async_trait::async_trait]
impl AdsClient for MockAdsClient {
    async fn list_accessible_customers(&self, call: &CallContext) -> Result<Vec<String>, Error> {
        self.api.record_metadata(call);
        if let Some(error) = self.api.state.list_failure.lock().take() {
            return Err(error);
        }
        Ok(self.api.state.accounts.read().clone())
    }

    async fn search(
        &self,
        call: &CallContext,
        request: SearchRequest,
    ) -> Result<SearchResults, Error> {
        self.api.record_metadata(call);
        self.api.state.searches.lock().push(request.clone());

        if self.api.state.stall.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if let Some(error) = self.api.state.search_failure.lock().take() {
            return Err(error);
        }

        let role = request.query.condition(ACCESS_ROLE_FIELD);
        let matching: Vec<GoogleAdsRow> = self
            .api
            .state
            .rows
            .read()
            .iter()
            .filter(|row| match role {
                Some(role) => row
                    .customer_user_access
                    .as_ref()
                    .and_then(|access| access.access_role.as_deref())
                    == Some(role),
                None => true,
            })
            .cloned()
            .collect();

        let offset = match request.page_token.as_deref() {
            None => 0,
            Some(token) => token
                .parse::<usize>()
                .ok()
                .filter(|offset| *offset <= matching.len())
                .ok_or_else(|| {
                    Error::invalid_argument(format!("invalid page token {:?}", token))
                })?,
        };
        let end = match *self.api.state.page_size.read() {
            Some(size) => (offset + size).min(matching.len()),
            None => matching.len(),
        };
        let next_page_token = (end < matching.len()).then(|| end.to_string());
        let mut page: Vec<GoogleAdsRow> = matching[offset..end].to_vec();

        let request_id = self.api.state.request_id.read().clone();
        let results = match self.api.state.stream_failure.lock().take() {
            Some((after, error)) => {
                page.truncate(after);
                let rows = page
                    .into_iter()
                    .map(Ok)
                    .chain(std::iter::once(Err(error)))
                    .collect::<Vec<_>>();
                SearchResults::new(stream::iter(rows))
            }
            None => SearchResults::from_rows(page),
        };

        Ok(results
            .with_next_page_token(next_page_token)
            .with_request_id(request_id))
    }
}
