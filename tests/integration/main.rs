//! Integration tests for the Google Ads connector.
//!
//! The tests drive the public API end to end against the in-memory
//! [`MockAdsApi`](googleads_connector::testing::MockAdsApi) and, for the
//! REST data source, a local wiremock server. No Google Ads account is
//! needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration
//!
//! # With connector logs
//! RUST_LOG=googleads_connector=debug cargo test --test integration -- --nocapture
//! ```

mod common;
mod connector_tests;
#[cfg(feature = "rest")]
mod rest_tests;
mod sync_tests;
