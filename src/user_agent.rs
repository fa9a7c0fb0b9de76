//! User-Agent header sent with Google Ads requests.

use std::sync::OnceLock;

/// Connector name used in the User-Agent string.
const CONNECTOR_NAME: &str = "googleads-connector";

/// Connector version from Cargo.toml.
const CONNECTOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Cached User-Agent string (computed once on first access).
static USER_AGENT: OnceLock<String> = OnceLock::new();

/// Returns the User-Agent string for upstream requests.
///
/// Format: `googleads-connector/0.1.0 (rust/1.92; linux/x86_64)`
pub fn user_agent() -> &'static str {
    USER_AGENT.get_or_init(|| {
        format!(
            "{}/{} ({}; {}/{})",
            CONNECTOR_NAME,
            CONNECTOR_VERSION,
            rust_version(),
            os_name(),
            std::env::consts::ARCH,
        )
    })
}

/// Returns the minimum supported Rust version the crate was built for.
fn rust_version() -> &'static str {
    concat!("rust/", env!("CARGO_PKG_RUST_VERSION"))
}

/// Returns a normalized OS name.
fn os_name() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        os => os,
    }
}
