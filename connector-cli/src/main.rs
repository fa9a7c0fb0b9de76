//! Google Ads connector runner
//!
//! Runs one sync pass of the Google Ads connector and writes the resulting
//! resources, entitlements and grants as JSON.
//!
//! # Usage
//!
//! ```bash
//! googleads-connector \
//!     --credentials-json-file-path /etc/googleads/credentials.json \
//!     --developer-token <token> \
//!     --customer-id 1234567890 \
//!     --output graph.json
//! ```
//!
//! # Environment Variables
//!
//! - `GOOGLEADS_CREDENTIALS_JSON_FILE_PATH`, `GOOGLEADS_DEVELOPER_TOKEN`,
//!   `GOOGLEADS_CUSTOMER_ID`: fallbacks for the matching flags
//! - `RUST_LOG`: Control log verbosity (default: `info`)
//!
//! Logs go to stderr so stdout carries only the JSON document.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use googleads_connector::config::{
    CREDENTIALS_JSON_FILE_PATH_ENV, CREDENTIALS_JSON_FILE_PATH_FLAG, CUSTOMER_ID_ENV,
    CUSTOMER_ID_FLAG, DEVELOPER_TOKEN_ENV, DEVELOPER_TOKEN_FLAG,
};
use googleads_connector::{Connector, ConnectorConfig, SyncContext, SyncRunner};
use tokio::io::AsyncWriteExt;
use tracing_subscriber::EnvFilter;

/// Sync accounts, users and access roles from Google Ads
#[derive(Parser)]
#[command(name = "googleads-connector")]
#[command(about = "Sync accounts, users and access roles from Google Ads")]
#[command(version)]
struct Args {
    /// Path to the Google credentials JSON file
    #[arg(
        long = CREDENTIALS_JSON_FILE_PATH_FLAG,
        env = CREDENTIALS_JSON_FILE_PATH_ENV,
        value_name = "PATH"
    )]
    credentials_json_file_path: Option<PathBuf>,

    /// Google Ads developer token
    #[arg(
        long = DEVELOPER_TOKEN_FLAG,
        env = DEVELOPER_TOKEN_ENV,
        value_name = "TOKEN",
        hide_env_values = true
    )]
    developer_token: Option<String>,

    /// Customer whose users are synced; also sent as the login customer id
    #[arg(long = CUSTOMER_ID_FLAG, env = CUSTOMER_ID_ENV, value_name = "ID")]
    customer_id: Option<String>,

    /// Write the JSON document to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Abort the sync after this many seconds
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,
}

impl Args {
    /// Missing settings become empty values so `validate` can name the
    /// flag and environment variable to set.
    fn config(&self) -> ConnectorConfig {
        ConnectorConfig::builder()
            .credentials_json_file_path(self.credentials_json_file_path.clone().unwrap_or_default())
            .developer_token(self.developer_token.as_deref().unwrap_or_default())
            .maybe_customer_id(self.customer_id.clone())
            .build()
    }

    fn sync_context(&self) -> SyncContext {
        let ctx = SyncContext::new();
        match self.timeout {
            Some(secs) => ctx.with_timeout(Duration::from_secs(secs)),
            None => ctx,
        }
    }
}

async fn write_output(path: Option<&Path>, json: &[u8]) -> std::io::Result<()> {
    match path {
        Some(path) => tokio::fs::write(path, json).await,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(json).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.config();
    let connector = Connector::from_config(&config)?;

    let ctx = args.sync_context();
    let interrupt = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, cancelling sync");
            interrupt.cancel();
        }
    });

    tracing::info!(customer_id = ?config.customer_id, "starting Google Ads sync");
    let output = SyncRunner::new(&connector, ctx).run().await?;

    let json = serde_json::to_vec_pretty(&output)?;
    write_output(args.output.as_deref(), &json).await?;
    if let Some(ref path) = args.output {
        tracing::info!(path = %path.display(), "wrote sync output");
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use clap::CommandFactory;
    use googleads_connector::ErrorKind;

    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("googleads-connector").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_flags_map_to_config() {
        let args = parse(&[
            "--credentials-json-file-path",
            "/etc/googleads/credentials.json",
            "--developer-token",
            "dev-token",
            "--customer-id",
            "1234567890",
        ]);
        let config = args.config();

        assert_eq!(
            config.credentials_json_file_path(),
            Path::new("/etc/googleads/credentials.json")
        );
        assert_eq!(config.developer_token(), "dev-token");
        assert_eq!(config.customer_id.as_deref(), Some("1234567890"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_developer_token_names_flag_and_env() {
        // Built directly so a GOOGLEADS_DEVELOPER_TOKEN in the environment
        // cannot fill the setting.
        let args = Args {
            credentials_json_file_path: Some("/etc/googleads/credentials.json".into()),
            developer_token: None,
            customer_id: None,
            output: None,
            timeout: None,
        };

        let err = args.config().validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.message().contains("--developer-token"));
        assert!(err.message().contains("$GOOGLEADS_DEVELOPER_TOKEN"));
    }

    #[test]
    fn test_output_and_timeout() {
        let args = parse(&[
            "--developer-token",
            "dev-token",
            "-o",
            "graph.json",
            "--timeout",
            "30",
        ]);

        assert_eq!(args.output.as_deref(), Some(Path::new("graph.json")));
        assert!(args.sync_context().deadline().is_some());
        assert!(parse(&["--developer-token", "t"]).sync_context().deadline().is_none());
    }

    #[tokio::test]
    async fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");

        write_output(Some(&path), br#"{"grants":[]}"#).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"{"grants":[]}"#);
    }
}
