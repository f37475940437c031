//! Settings page: the six settings sections, per-section saving, the MCP
//! connection test, and connected-account management.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use sociallens_api::{ApiError, SettingsApi, SettingsSection};
use sociallens_core::{
    AccountConnect, ConnectedAccountsResponse, ConnectionTestResult, McpServerSettings,
    McpServerUpdate, PrivacySettings, ProfileUpdate, SettingsOptions, User, UserProfile,
    WorkspaceForm,
};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;

pub const LOAD_SETTINGS_ERROR: &str = "Failed to load settings. Please try again.";

/// How long a section shows "Saved" before returning to idle.
pub const SAVED_RESET: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("settings section {section} has not been loaded")]
    NotLoaded { section: SettingsSection },

    #[error("failed to encode {section} settings: {source}")]
    Encode {
        section: SettingsSection,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Saved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SaveMark {
    Saving,
    Saved(Instant),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsState {
    pub profile: Option<UserProfile>,
    pub accounts: Option<ConnectedAccountsResponse>,
    pub workspace: Option<WorkspaceForm>,
    pub mcp_server: Option<McpServerSettings>,
    /// New API key typed for the MCP server; the stored key is only ever
    /// shown masked.
    pub mcp_api_key: String,
    pub privacy: Option<PrivacySettings>,
    pub options: Option<SettingsOptions>,
    pub loading: bool,
    pub error: Option<String>,
    pub testing: bool,
    pub test_result: Option<ConnectionTestResult>,
    saves: HashMap<SettingsSection, SaveMark>,
}

impl SettingsState {
    #[must_use]
    pub fn save_status(&self, section: SettingsSection) -> SaveStatus {
        match self.saves.get(&section) {
            None => SaveStatus::Idle,
            Some(SaveMark::Saving) => SaveStatus::Saving,
            Some(SaveMark::Saved(at)) if at.elapsed() < SAVED_RESET => SaveStatus::Saved,
            Some(SaveMark::Saved(_)) => SaveStatus::Idle,
        }
    }

    /// Request body for `PUT settings/{section}`.
    fn payload(&self, section: SettingsSection) -> Result<serde_json::Value, SettingsError> {
        let not_loaded = || SettingsError::NotLoaded { section };
        let encoded = match section {
            SettingsSection::Profile => {
                let profile = self.profile.as_ref().ok_or_else(not_loaded)?;
                serde_json::to_value(ProfileUpdate::from(profile))
            }
            SettingsSection::Workspace => {
                let form = self.workspace.as_ref().ok_or_else(not_loaded)?;
                serde_json::to_value(&form.settings)
            }
            SettingsSection::McpServer => {
                let server = self.mcp_server.as_ref().ok_or_else(not_loaded)?;
                serde_json::to_value(McpServerUpdate {
                    server_url: server.server_url.clone(),
                    api_key: self.mcp_api_key.clone(),
                })
            }
            SettingsSection::Privacy => {
                let privacy = self.privacy.as_ref().ok_or_else(not_loaded)?;
                serde_json::to_value(privacy)
            }
        };
        encoded.map_err(|source| SettingsError::Encode { section, source })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccountAction {
    Connect,
    Disconnect,
}

impl AccountAction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Disconnect => "disconnect",
        }
    }
}

pub struct SettingsPage<A> {
    api: Arc<A>,
    user: Option<User>,
    state: Mutex<SettingsState>,
}

impl<A: SettingsApi> SettingsPage<A> {
    /// `user` is the signed-in user, when known; its name and email take
    /// precedence over the stored profile.
    pub fn new(api: Arc<A>, user: Option<User>) -> Self {
        Self {
            api,
            user,
            state: Mutex::new(SettingsState {
                loading: true,
                ..SettingsState::default()
            }),
        }
    }

    pub async fn state(&self) -> SettingsState {
        self.state.lock().await.clone()
    }

    pub async fn dismiss_error(&self) {
        self.state.lock().await.error = None;
    }

    /// Edit the loaded sections in place.
    pub async fn update(&self, f: impl FnOnce(&mut SettingsState)) {
        f(&mut *self.state.lock().await);
    }

    /// Fetch all six sections concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first failing request; its message becomes the page
    /// error.
    pub async fn load(&self) -> Result<(), ApiError> {
        {
            let mut state = self.state.lock().await;
            state.loading = true;
            state.error = None;
        }

        let api = &self.api;
        let result = futures::try_join!(
            api.profile(),
            api.connected_accounts(),
            api.workspace(),
            api.mcp_server(),
            api.privacy(),
            api.settings_options(),
        );

        let mut state = self.state.lock().await;
        state.loading = false;
        match result {
            Ok((mut profile, accounts, workspace, mcp_server, privacy, options)) => {
                if let Some(user) = &self.user {
                    profile.first_name.clone_from(&user.first_name);
                    profile.last_name.clone_from(&user.last_name);
                    profile.email.clone_from(&user.email);
                }
                state.profile = Some(profile);
                state.accounts = Some(accounts);
                state.workspace = Some(WorkspaceForm::new(workspace));
                state.mcp_server = Some(mcp_server);
                state.privacy = Some(privacy);
                state.options = Some(options);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load settings");
                let message = e.to_string();
                state.error = Some(if message.is_empty() {
                    LOAD_SETTINGS_ERROR.to_string()
                } else {
                    message
                });
                Err(e)
            }
        }
    }

    /// Save one section. Its status goes `Saving`, then `Saved` for
    /// [`SAVED_RESET`], then back to `Idle`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NotLoaded`] when the section was never
    /// loaded, or the API error; the page error names the section.
    pub async fn save(&self, section: SettingsSection) -> Result<(), SettingsError> {
        let payload = {
            let mut state = self.state.lock().await;
            let payload = state.payload(section)?;
            state.saves.insert(section, SaveMark::Saving);
            payload
        };

        let result = self.api.save_settings(section, &payload).await;

        let mut state = self.state.lock().await;
        match result {
            Ok(()) => {
                tracing::info!(%section, "settings saved");
                state.saves.insert(section, SaveMark::Saved(Instant::now()));
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, %section, "failed to save settings");
                state.error = Some(format!("Failed to save {section}: {e}"));
                state.saves.remove(&section);
                Err(e.into())
            }
        }
    }

    /// Add the typed competitor to the workspace. Returns `false` for blank
    /// or duplicate input.
    pub async fn add_competitor(&self) -> bool {
        self.state
            .lock()
            .await
            .workspace
            .as_mut()
            .is_some_and(WorkspaceForm::add_competitor)
    }

    pub async fn remove_competitor(&self, name: &str) {
        if let Some(form) = self.state.lock().await.workspace.as_mut() {
            form.remove_competitor(name);
        }
    }

    /// Test the MCP server connection. A failed request is reported as an
    /// unsuccessful result rather than a page error.
    pub async fn test_connection(&self) -> ConnectionTestResult {
        {
            let mut state = self.state.lock().await;
            state.testing = true;
            state.test_result = None;
        }

        let result = match self.api.test_mcp_connection().await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "mcp connection test failed");
                ConnectionTestResult {
                    success: false,
                    message: e.to_string(),
                    response_time_ms: None,
                }
            }
        };

        let mut state = self.state.lock().await;
        state.testing = false;
        state.test_result = Some(result.clone());
        result
    }

    /// Connect `platform` with `access_token`, then re-fetch the accounts.
    ///
    /// # Errors
    ///
    /// Returns the API error; the page error names the action.
    pub async fn connect(&self, platform: &str, access_token: &str) -> Result<(), ApiError> {
        let body = AccountConnect::for_platform(platform, access_token);
        let result = async {
            self.api.connect_account(platform, &body).await?;
            self.api.connected_accounts().await
        }
        .await;
        self.finish_account_action(AccountAction::Connect, platform, result)
            .await
    }

    /// Disconnect `platform`, then re-fetch the accounts.
    ///
    /// # Errors
    ///
    /// Returns the API error; the page error names the action.
    pub async fn disconnect(&self, platform: &str) -> Result<(), ApiError> {
        let result = async {
            self.api.disconnect_account(platform).await?;
            self.api.connected_accounts().await
        }
        .await;
        self.finish_account_action(AccountAction::Disconnect, platform, result)
            .await
    }

    async fn finish_account_action(
        &self,
        action: AccountAction,
        platform: &str,
        result: Result<ConnectedAccountsResponse, ApiError>,
    ) -> Result<(), ApiError> {
        let mut state = self.state.lock().await;
        match result {
            Ok(accounts) => {
                tracing::info!(platform, action = action.as_str(), "account updated");
                state.accounts = Some(accounts);
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    platform,
                    action = action.as_str(),
                    "account action failed"
                );
                state.error = Some(format!("Failed to {} account: {e}", action.as_str()));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
