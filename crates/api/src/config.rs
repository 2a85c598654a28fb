use milaap_core::matching::{validate_threshold, MATCH_THRESHOLD};
use milaap_core::notification::DEFAULT_HELP_CENTER_NUMBER;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long to wait for the notification worker to drain at shutdown
    /// (default: `10`).
    pub shutdown_timeout_secs: u64,
    /// Number printed in match alerts for verification calls.
    pub help_center_number: String,
    /// Pairs must score strictly above this to be reported as matches.
    pub match_threshold: f64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `5000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `10`                    |
    /// | `HELP_CENTER_NUMBER`    | `+91-XXXXXXXXXX`        |
    /// | `MATCH_THRESHOLD`       | `0.55`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let help_center_number = std::env::var("HELP_CENTER_NUMBER")
            .unwrap_or_else(|_| DEFAULT_HELP_CENTER_NUMBER.into());

        let match_threshold: f64 = match std::env::var("MATCH_THRESHOLD") {
            Ok(raw) => raw.parse().expect("MATCH_THRESHOLD must be a number"),
            Err(_) => MATCH_THRESHOLD,
        };
        if let Err(e) = validate_threshold(match_threshold) {
            panic!("Invalid MATCH_THRESHOLD: {e}");
        }

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            help_center_number,
            match_threshold,
        }
    }
}
