use chrono_tz::Tz;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 3000 | HTTP service port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | LOG_LEVEL | info | tracing level filter |
/// | LOG_DIR | (unset) | daily-rolling log file directory |
/// | TIMEZONE | Europe/Paris | business timezone for "today" |
/// | SEED_DEMO_DATA | true | load the demo dataset at startup |
/// | REQUEST_TIMEOUT_MS | 30000 | request timeout (milliseconds) |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 SEED_DEMO_DATA=false cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API service port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// tracing level filter
    pub log_level: String,
    /// Log file directory; stdout only when unset
    pub log_dir: Option<String>,
    /// Business timezone used to derive "today" for all window logic
    pub timezone: Tz,
    /// Load the demo dataset at startup
    pub seed_demo_data: bool,
    /// Request timeout (milliseconds)
    pub request_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            timezone: std::env::var("TIMEZONE")
                .ok()
                .and_then(|tz| tz.parse().ok())
                .unwrap_or(chrono_tz::Europe::Paris),
            seed_demo_data: std::env::var("SEED_DEMO_DATA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Today's date in the configured business timezone
    pub fn today(&self) -> chrono::NaiveDate {
        chrono::Utc::now().with_timezone(&self.timezone).date_naive()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
