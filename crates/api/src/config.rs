use realty_core::languages::SupportedLanguages;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Languages every partner and project must be translated into.
    pub languages: SupportedLanguages,
    /// Entities backfilled in parallel by the admin sync endpoint
    /// (default: `1`, i.e. sequential).
    pub sync_concurrency: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SUPPORTED_LANGUAGES`  | `en,ka,ru`                 |
    /// | `SYNC_CONCURRENCY`     | `1`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
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

        let languages = match std::env::var("SUPPORTED_LANGUAGES") {
            Ok(raw) => SupportedLanguages::parse(&raw)
                .unwrap_or_else(|e| panic!("Invalid SUPPORTED_LANGUAGES '{raw}': {e}")),
            Err(_) => SupportedLanguages::default(),
        };

        let sync_concurrency: usize = std::env::var("SYNC_CONCURRENCY")
            .unwrap_or_else(|_| "1".into())
            .parse()
            .expect("SYNC_CONCURRENCY must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            languages,
            sync_concurrency: sync_concurrency.max(1),
        }
    }
}
