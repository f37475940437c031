use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Where the remote API configuration (`BASE_API_URL` + bearer token) lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Fetched over HTTP, e.g. `https://dashboard.example.com/config.json`.
    Url(String),
    /// Read from a local JSON file.
    File(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Url(url) => write!(f, "{url}"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub config_source: ConfigSource,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub search_debounce_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The config URL may carry a signed query string.
        let source = match &self.config_source {
            ConfigSource::Url(_) => "[url redacted]".to_string(),
            ConfigSource::File(path) => path.display().to_string(),
        };
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("config_source", &source)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("search_debounce_ms", &self.search_debounce_ms)
            .finish()
    }
}
