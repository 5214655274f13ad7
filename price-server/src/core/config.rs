/// Server configuration
///
/// # Environment variables
///
/// Every item can be overridden through the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | Runtime environment |
/// | LOG_LEVEL | info | Tracing filter level |
/// | LOG_DIR | (unset) | Daily-rolling log file directory; stdout only when unset |
/// | ALERT_LOOKBACK_MONTHS | 1 | Snapshot lookback window for alert evaluation, calendar months |
/// | BEST_DISCOUNT_DEFAULT_LIMIT | 1000 | Default result cap for best-discount queries |
/// | HISTORY_DEFAULT_SPAN_YEARS | 1 | Default price-history span on each side of today |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 LOG_LEVEL=debug cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Tracing filter level
    pub log_level: String,
    /// Log file directory, stdout only when `None`
    pub log_dir: Option<String>,
    /// Alert evaluation lookback, in calendar months
    pub alert_lookback_months: u32,
    /// Default cap for best-discount queries
    pub best_discount_default_limit: usize,
    /// Default price-history half-span, in years
    pub history_default_span_years: u32,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            alert_lookback_months: std::env::var("ALERT_LOOKBACK_MONTHS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            best_discount_default_limit: std::env::var("BEST_DISCOUNT_DEFAULT_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            history_default_span_years: std::env::var("HISTORY_DEFAULT_SPAN_YEARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 3000,
            environment: "development".into(),
            log_level: "info".into(),
            log_dir: None,
            alert_lookback_months: 1,
            best_discount_default_limit: 1000,
            history_default_span_years: 1,
        }
    }
}
