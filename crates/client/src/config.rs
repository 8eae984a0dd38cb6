/// Review backend configuration loaded from environment variables.
///
/// Both fields have defaults suitable for a local backend. In other
/// deployments, override via environment variables.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base HTTP URL of the analysis service (default: `http://127.0.0.1:8000`).
    pub base_url: String,
    /// Credential sent as the `x-api-key` header on submissions
    /// (default: empty; the header is still sent with an empty value).
    pub api_key: String,
}

impl BackendConfig {
    /// Create a configuration from explicit values.
    ///
    /// A trailing `/` on `base_url` is trimmed so endpoint paths join
    /// cleanly.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var           | Default                 |
    /// |-------------------|-------------------------|
    /// | `BACKEND_URL`     | `http://127.0.0.1:8000` |
    /// | `BACKEND_API_KEY` | empty string            |
    ///
    /// An unreachable backend is not detected here; it surfaces as a
    /// failed submission on first use.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("BACKEND_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".into());
        let api_key = std::env::var("BACKEND_API_KEY").unwrap_or_default();

        Self::new(base_url, api_key)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
