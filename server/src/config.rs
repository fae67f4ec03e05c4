//! Server configuration from CLI flags and environment variables.
//!
//! Every flag falls back to a `CRUDSTORE_*` environment variable; `main`
//! loads a `.env` file first so local overrides work without exporting.

use axum::http::HeaderValue;
use clap::Parser;
use crudstore_model::ResourceSchema;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "crudstore-server")]
#[command(about = "In-memory CRUD resource server with per-request deadlines")]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, env = "CRUDSTORE_PORT", default_value = "8080")]
    pub port: u16,

    /// Upper bound on each request's deadline, in milliseconds
    #[arg(long, env = "CRUDSTORE_REQUEST_TIMEOUT_MS", default_value = "10000")]
    pub request_timeout_ms: u64,

    /// How long to drain in-flight requests on shutdown, in seconds
    #[arg(long, env = "CRUDSTORE_SHUTDOWN_TIMEOUT_SECS", default_value = "10")]
    pub shutdown_timeout_secs: u64,

    /// Origin allowed by CORS (repeatable). CORS is off when none are given.
    #[arg(
        long = "allowed-origin",
        env = "CRUDSTORE_ALLOWED_ORIGINS",
        value_delimiter = ','
    )]
    pub allowed_origins: Vec<String>,

    /// Path to a JSON resource schema used to validate writes
    #[arg(long, env = "CRUDSTORE_SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }

    /// Parses the configured CORS origins into header values.
    pub fn origins(&self) -> Result<Vec<HeaderValue>, ConfigError> {
        self.allowed_origins
            .iter()
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .map(|o| HeaderValue::from_str(o).map_err(|_| ConfigError::InvalidOrigin(o.to_string())))
            .collect()
    }

    /// Reads the schema file, if one is configured.
    pub fn load_schema(&self) -> Result<Option<ResourceSchema>, ConfigError> {
        let Some(path) = &self.schema else {
            return Ok(None);
        };
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadSchema {
            path: path.clone(),
            source,
        })?;
        let schema = ResourceSchema::from_json(&raw).map_err(|source| ConfigError::ParseSchema {
            path: path.clone(),
            source,
        })?;
        Ok(Some(schema))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read schema file {}: {source}", .path.display())]
    ReadSchema {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid schema file {}: {source}", .path.display())]
    ParseSchema {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid CORS origin: {0}")]
    InvalidOrigin(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Args {
        let mut argv = vec!["crudstore-server"];
        argv.extend_from_slice(args);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn explicit_flags_are_parsed() {
        let args = parse(&[
            "--port",
            "9000",
            "--request-timeout-ms",
            "250",
            "--shutdown-timeout-secs",
            "3",
        ]);
        assert_eq!(args.listen_addr().port(), 9000);
        assert_eq!(args.request_timeout(), Duration::from_millis(250));
        assert_eq!(args.shutdown_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn origins_accept_repeats_and_commas() {
        let args = parse(&[
            "--allowed-origin",
            "https://labstack.com,https://labstack.net",
            "--allowed-origin",
            "https://example.org",
        ]);
        let origins = args.origins().unwrap();
        assert_eq!(origins.len(), 3);
        assert_eq!(origins[2], "https://example.org");
    }

    #[test]
    fn invalid_origin_is_rejected() {
        let args = parse(&["--allowed-origin", "bad\norigin"]);
        assert!(matches!(args.origins(), Err(ConfigError::InvalidOrigin(_))));
    }

    #[test]
    fn missing_schema_flag_means_no_schema() {
        let args = parse(&[]);
        assert!(args.load_schema().unwrap().is_none());
    }

    #[test]
    fn schema_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"name": "user", "fields": [{{"name": "name", "field_type": "text", "required": true}}]}}"#
        )
        .unwrap();

        let args = parse(&["--schema", file.path().to_str().unwrap()]);
        let schema = args.load_schema().unwrap().unwrap();
        assert_eq!(schema.name, "user");
        assert_eq!(schema.fields.len(), 1);
    }

    #[test]
    fn unreadable_schema_is_an_error() {
        let args = parse(&["--schema", "/nonexistent/crudstore/schema.json"]);
        assert!(matches!(args.load_schema(), Err(ConfigError::ReadSchema { .. })));
    }

    #[test]
    fn malformed_schema_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let args = parse(&["--schema", file.path().to_str().unwrap()]);
        assert!(matches!(args.load_schema(), Err(ConfigError::ParseSchema { .. })));
    }
}
