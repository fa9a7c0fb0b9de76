//! Data source layer for Google Ads communication.
//!
//! - [`AdsClientFactory`] / [`AdsClient`]: the seam the syncers depend on
//! - [`Query`]: structured GAQL statements
//! - [`GoogleAdsRow`]: typed search rows
//! - [`RestClientFactory`]: the REST implementation (feature `rest`)
//!
//! Tests substitute [`MockAdsApi`](crate::testing::MockAdsApi) for the
//! REST factory.
//!
//! ## Feature Flags
//!
//! - `rest` (default): Enable the reqwest-based data source

mod query;
mod row;
mod traits;

#[cfg(feature = "rest")]
mod rest;

pub use query::{Condition, Query};
pub use row::{CustomerUserAccess, GoogleAdsRow};
pub use traits::{AdsClient, AdsClientFactory, RowStream, SearchRequest, SearchResults};

#[cfg(feature = "rest")]
pub use rest::{RestAdsClient, RestClientFactory, RestClientFactoryBuilder, DEFAULT_BASE_URL};
