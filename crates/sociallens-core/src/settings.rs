use serde::{Deserialize, Serialize};

/// The signed-in user, from `users/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl User {
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.email.clone()
        } else {
            full.to_string()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    pub role: String,
}

/// Body of `PUT settings/profile`; email is not editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub role: String,
}

impl From<&UserProfile> for ProfileUpdate {
    fn from(profile: &UserProfile) -> Self {
        Self {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            company: profile.company.clone(),
            role: profile.role.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedAccount {
    pub platform: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailablePlatform {
    pub platform: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedAccountsResponse {
    #[serde(default)]
    pub connected: Vec<ConnectedAccount>,
    #[serde(default)]
    pub available: Vec<AvailablePlatform>,
}

/// Body of `POST settings/connected-accounts/{platform}`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountConnect {
    pub access_token: String,
    pub username: String,
}

impl AccountConnect {
    /// Connect request with the placeholder handle `@new_<platform>`.
    #[must_use]
    pub fn for_platform(platform: &str, access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            username: format!("@new_{platform}"),
        }
    }
}

impl std::fmt::Debug for AccountConnect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountConnect")
            .field("access_token", &"[redacted]")
            .field("username", &self.username)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSettings {
    pub brand_name: String,
    pub industry: String,
    pub website_url: String,
    #[serde(default)]
    pub competitors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpServerSettings {
    pub server_url: String,
    pub api_key_masked: String,
}

/// Body of `PUT settings/mcp-server`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpServerUpdate {
    pub server_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacySettings {
    pub historical_data_days: u32,
    pub refresh_frequency_hours: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionTestResult {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub response_time_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    pub id: String,
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsOptions {
    #[serde(default)]
    pub roles: Vec<OptionItem>,
    #[serde(default)]
    pub industries: Vec<OptionItem>,
}
