//! Server configuration loaded from environment variables.

/// Server configuration loaded from environment variables.
///
/// All fields except the session secret have defaults suitable for
/// local development. In production, override via environment
/// variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8060`).
    pub port: u16,
    /// Per-install secret keying the remember-me token derivation.
    pub session_secret: String,
    /// Validity of issued remember-me cookies, in days (default: `30`).
    pub token_validity_days: i64,
    /// Sessions idle longer than this are pruned, in seconds
    /// (default: `86400`).
    pub session_idle_secs: u64,
    /// How often the session sweeper runs, in seconds (default: `600`).
    pub sweep_interval_secs: u64,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Outbound notification webhook URL; unset disables delivery.
    pub webhook_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Required | Default   |
    /// |------------------------|----------|-----------|
    /// | `HOST`                 | no       | `0.0.0.0` |
    /// | `PORT`                 | no       | `8060`    |
    /// | `SESSION_SECRET`       | **yes**  | --        |
    /// | `TOKEN_VALIDITY_DAYS`  | no       | `30`      |
    /// | `SESSION_IDLE_SECS`    | no       | `86400`   |
    /// | `SWEEP_INTERVAL_SECS`  | no       | `600`     |
    /// | `REQUEST_TIMEOUT_SECS` | no       | `30`      |
    /// | `WEBHOOK_URL`          | no       | unset     |
    ///
    /// # Panics
    ///
    /// Panics if `SESSION_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8060".into())
            .parse()
            .expect("PORT must be a valid u16");

        let session_secret = std::env::var("SESSION_SECRET")
            .expect("SESSION_SECRET must be set in the environment");
        assert!(!session_secret.is_empty(), "SESSION_SECRET must not be empty");

        let token_validity_days: i64 = std::env::var("TOKEN_VALIDITY_DAYS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("TOKEN_VALIDITY_DAYS must be a valid i64");

        let session_idle_secs: u64 = std::env::var("SESSION_IDLE_SECS")
            .unwrap_or_else(|_| "86400".into())
            .parse()
            .expect("SESSION_IDLE_SECS must be a valid u64");

        let sweep_interval_secs: u64 = std::env::var("SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| "600".into())
            .parse()
            .expect("SWEEP_INTERVAL_SECS must be a valid u64");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let webhook_url = std::env::var("WEBHOOK_URL").ok().filter(|s| !s.is_empty());

        Self {
            host,
            port,
            session_secret,
            token_validity_days,
            session_idle_secs,
            sweep_interval_secs,
            request_timeout_secs,
            webhook_url,
        }
    }
}
