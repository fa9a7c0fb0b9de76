//! REST data source using reqwest.
//!
//! Talks to the Google Ads REST interface: accessible customers are listed
//! with `GET customers:listAccessibleCustomers`, queries run through
//! `POST customers/{id}/googleAds:search`.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, RETRY_AFTER};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::auth::CredentialsProvider;
use crate::context::{normalize_customer_id, CallContext};
use crate::error::ErrorKind;
use crate::transport::row::GoogleAdsRow;
use crate::transport::traits::{AdsClient, AdsClientFactory, SearchRequest, SearchResults};
use crate::user_agent;
use crate::Error;

/// Default Google Ads REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://googleads.googleapis.com/v17/";

/// Response header carrying the upstream request id.
const REQUEST_ID_HEADER: &str = "request-id";

// ============================================================================
// REST Client Factory
// ============================================================================

/// Builds [`RestAdsClient`]s sharing one HTTP connection pool.
///
/// Each [`connect`](AdsClientFactory::connect) asks the credentials provider
/// for a fresh bearer token.
#[derive(Clone)]
pub struct RestClientFactory {
    http: reqwest::Client,
    base_url: Url,
    credentials: Arc<dyn CredentialsProvider>,
}

impl std::fmt::Debug for RestClientFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClientFactory")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl RestClientFactory {
    /// Creates a new builder.
    pub fn builder() -> RestClientFactoryBuilder {
        RestClientFactoryBuilder::new()
    }

    /// Returns the base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl AdsClientFactory for RestClientFactory {
    async fn connect(&self, call: &CallContext) -> Result<Box<dyn AdsClient>, Error> {
        let token = call
            .run(self.credentials.get_token())
            .await
            .map_err(|e| e.context("fetching credentials"))?;

        let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| Error::unauthorized("bearer token contains invalid header characters"))?;

        tracing::trace!(base_url = %self.base_url, "constructed Google Ads REST client");

        Ok(Box::new(RestAdsClient {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            bearer,
        }))
    }
}

// ============================================================================
// REST Client Factory Builder
// ============================================================================

/// Builder for [`RestClientFactory`].
pub struct RestClientFactoryBuilder {
    base_url: Result<Url, Error>,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    timeout: Duration,
    connect_timeout: Duration,
}

impl RestClientFactoryBuilder {
    fn new() -> Self {
        Self {
            base_url: parse_base_url(DEFAULT_BASE_URL),
            credentials: None,
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Overrides the endpoint, e.g. to point at a test server.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Self {
        self.base_url = parse_base_url(url.as_ref());
        self
    }

    /// Sets the bearer token source.
    pub fn credentials(mut self, provider: impl CredentialsProvider + 'static) -> Self {
        self.credentials = Some(Arc::new(provider));
        self
    }

    /// Sets a shared bearer token source.
    pub fn credentials_arc(mut self, provider: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(provider);
        self
    }

    /// Sets the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the TCP connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Builds the factory.
    pub fn build(self) -> Result<RestClientFactory, Error> {
        let base_url = self.base_url?;
        let credentials = self
            .credentials
            .ok_or_else(|| Error::configuration("a credentials provider is required"))?;

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(user_agent::user_agent())
            .build()
            .map_err(|e| {
                Error::configuration(format!("failed to create HTTP client: {}", e)).with_source(e)
            })?;

        Ok(RestClientFactory {
            http,
            base_url,
            credentials,
        })
    }
}

/// Parses a base URL, making sure relative paths resolve below it.
fn parse_base_url(url: &str) -> Result<Url, Error> {
    let mut parsed =
        Url::parse(url).map_err(|e| Error::from(e).context(format!("base URL {:?}", url)))?;
    if !parsed.path().ends_with('/') {
        let path = format!("{}/", parsed.path());
        parsed.set_path(&path);
    }
    Ok(parsed)
}

// ============================================================================
// REST Client
// ============================================================================

/// A Google Ads client bound to one bearer token.
pub struct RestAdsClient {
    http: reqwest::Client,
    base_url: Url,
    bearer: HeaderValue,
}

impl std::fmt::Debug for RestAdsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestAdsClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl Drop for RestAdsClient {
    fn drop(&mut self) {
        tracing::trace!("released Google Ads REST client");
    }
}

impl RestAdsClient {
    /// Builds the headers of one request from the call metadata.
    fn build_headers(&self, call: &CallContext) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.bearer.clone());

        for (name, value) in call.metadata().headers() {
            let value = HeaderValue::from_str(value).map_err(|_| {
                Error::configuration(format!("{} contains invalid header characters", name))
            })?;
            headers.insert(HeaderName::from_static(name), value);
        }

        Ok(headers)
    }

    fn url(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(Error::from)
    }

    /// Sends a request and decodes a JSON body, returning the request id too.
    async fn execute<R>(&self, request: reqwest::RequestBuilder) -> Result<(R, Option<String>), Error>
    where
        R: serde::de::DeserializeOwned,
    {
        let response = request.send().await.map_err(Error::from)?;

        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(status = status.as_u16(), error = %e, "failed to read error body");
                    String::new()
                }
            };
            let mut err = map_status_error(status.as_u16(), &body);
            if let Some(id) = request_id {
                err = err.with_request_id(id);
            }
            if let Some(delay) = retry_after {
                err = err.with_retry_after(delay);
            }
            return Err(err);
        }

        let body = response.bytes().await.map_err(Error::from)?;
        let parsed = serde_json::from_slice::<R>(&body).map_err(|e| {
            Error::new(
                ErrorKind::InvalidResponse,
                format!("failed to parse response: {}", e),
            )
            .with_source(e)
        })?;

        Ok((parsed, request_id))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListAccessibleCustomersResponse {
    #[serde(default)]
    resource_names: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchApiRequest<'a> {
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_token: Option<&'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchApiResponse {
    #[serde(default)]
    results: Vec<GoogleAdsRow>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[async_trait::async_trait]
impl AdsClient for RestAdsClient {
    async fn list_accessible_customers(&self, call: &CallContext) -> Result<Vec<String>, Error> {
        // A leading "./" keeps the colon from being read as a URL scheme.
        let url = self.url("./customers:listAccessibleCustomers")?;
        let headers = self.build_headers(call)?;

        let (response, _) = self
            .execute::<ListAccessibleCustomersResponse>(self.http.get(url).headers(headers))
            .await?;

        Ok(response.resource_names)
    }

    async fn search(
        &self,
        call: &CallContext,
        request: SearchRequest,
    ) -> Result<SearchResults, Error> {
        let customer_id = normalize_customer_id(&request.customer_id);
        if customer_id.is_empty() {
            return Err(Error::invalid_argument("customer id is required for search"));
        }

        let url = self.url(&format!("customers/{}/googleAds:search", customer_id))?;
        let headers = self.build_headers(call)?;
        let body = SearchApiRequest {
            query: request.query.to_string(),
            page_token: request.page_token.as_deref(),
        };

        let (response, request_id) = self
            .execute::<SearchApiResponse>(self.http.post(url).headers(headers).json(&body))
            .await?;

        Ok(SearchResults::from_rows(response.results)
            .with_next_page_token(response.next_page_token)
            .with_request_id(request_id))
    }
}

/// Maps HTTP status codes to connector errors.
fn map_status_error(status: u16, body: &str) -> Error {
    let message = if body.is_empty() {
        format!("HTTP {}", status)
    } else if let Ok(error) = serde_json::from_str::<serde_json::Value>(body) {
        // Google APIs wrap failures as {"error": {"code", "message", "status"}}.
        error
            .get("error")
            .and_then(|e| e.get("message").and_then(|m| m.as_str()).or_else(|| e.as_str()))
            .unwrap_or(body)
            .to_string()
    } else {
        body.to_string()
    };

    Error::new(ErrorKind::from_http_status(status), message)
}

// ============================================================================
// Tests
// ============================================================================
