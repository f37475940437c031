//! Remote API configuration: base URL and bearer token.

use reqwest::{Client, Url};
use serde::Deserialize;
use sociallens_core::ConfigSource;

use crate::error::ApiError;

/// Fixed version segment prefixed to every endpoint path.
pub const API_PREFIX: &str = "api/v1/";

/// Contents of `config.json`.
#[derive(Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(rename = "BASE_API_URL")]
    pub base_api_url: String,
    #[serde(rename = "USER_AUTH_JWT_TOKEN")]
    pub user_auth_jwt_token: String,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_api_url", &self.base_api_url)
            .field("user_auth_jwt_token", &"[redacted]")
            .finish()
    }
}

/// Config after validation: the versioned API root and the token.
#[derive(Clone)]
pub(crate) struct ResolvedConfig {
    pub(crate) api_root: Url,
    pub(crate) token: String,
}

impl ResolvedConfig {
    /// Validate `config` and derive `<base>/api/v1/`.
    ///
    /// The base URL is normalised to end with exactly one slash so that the
    /// version segment is appended rather than replacing the last path segment.
    pub(crate) fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let normalised = format!("{}/{API_PREFIX}", config.base_api_url.trim_end_matches('/'));
        let api_root = Url::parse(&normalised).map_err(|e| ApiError::InvalidUrl {
            url: config.base_api_url.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            api_root,
            token: config.user_auth_jwt_token.clone(),
        })
    }

    /// Full URL for `endpoint` with percent-encoded query parameters.
    pub(crate) fn endpoint_url(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Url, ApiError> {
        let mut url = self
            .api_root
            .join(endpoint.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl {
                url: endpoint.to_string(),
                reason: e.to_string(),
            })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }
}

/// Load `config.json` from its source.
///
/// # Errors
///
/// Returns [`ApiError::Config`] when the source is unreachable, answers with a
/// non-2xx status, or does not contain valid JSON of the expected shape.
pub async fn load_api_config(http: &Client, source: &ConfigSource) -> Result<ApiConfig, ApiError> {
    let config_error = |reason: String| ApiError::Config {
        source_desc: source.to_string(),
        reason,
    };

    let body = match source {
        ConfigSource::Url(url) => {
            let response = http
                .get(url)
                .send()
                .await
                .map_err(|e| config_error(e.to_string()))?;
            if !response.status().is_success() {
                return Err(config_error(format!(
                    "Failed to load configuration (status {})",
                    response.status().as_u16()
                )));
            }
            response
                .text()
                .await
                .map_err(|e| config_error(e.to_string()))?
        }
        ConfigSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| config_error(e.to_string()))?,
    };

    serde_json::from_str(&body).map_err(|e| config_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(base: &str) -> ResolvedConfig {
        ResolvedConfig::from_config(&ApiConfig {
            base_api_url: base.to_string(),
            user_auth_jwt_token: "tok".to_string(),
        })
        .expect("valid base url")
    }

    #[test]
    fn endpoint_url_appends_version_prefix() {
        let cfg = resolved("https://api.example.com/");
        let url = cfg.endpoint_url("brands/stats", &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/v1/brands/stats");
    }

    #[test]
    fn endpoint_url_tolerates_missing_trailing_slash() {
        let cfg = resolved("https://api.example.com/dash");
        let url = cfg.endpoint_url("/users/me", &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/dash/api/v1/users/me");
    }

    #[test]
    fn endpoint_url_encodes_query() {
        let cfg = resolved("https://api.example.com/");
        let url = cfg
            .endpoint_url(
                "brands",
                &[
                    ("search", "acme & co".to_string()),
                    ("sort_by", "name_asc".to_string()),
                ],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/api/v1/brands?search=acme+%26+co&sort_by=name_asc"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = ResolvedConfig::from_config(&ApiConfig {
            base_api_url: "not a url".to_string(),
            user_auth_jwt_token: "tok".to_string(),
        });
        assert!(matches!(result, Err(ApiError::InvalidUrl { .. })));
    }

    #[test]
    fn debug_redacts_token() {
        let cfg = ApiConfig {
            base_api_url: "https://api.example.com/".to_string(),
            user_auth_jwt_token: "secret-token".to_string(),
        };
        assert!(!format!("{cfg:?}").contains("secret-token"));
    }
}
