use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use sociallens_core::{ConnectedAccount, WorkspaceSettings};

use super::*;

#[derive(Default)]
struct FakeApi {
    fail_privacy: bool,
    fail_save: AtomicBool,
    fail_test: bool,
    saved: StdMutex<Vec<(SettingsSection, serde_json::Value)>>,
    connected: StdMutex<Vec<(String, AccountConnect)>>,
    accounts: StdMutex<Vec<ConnectedAccount>>,
}

fn server_error<T>(message: &str) -> Result<T, ApiError> {
    Err(ApiError::Status {
        status: 500,
        message: message.to_string(),
    })
}

#[async_trait]
impl SettingsApi for FakeApi {
    async fn profile(&self) -> Result<UserProfile, ApiError> {
        Ok(UserProfile {
            first_name: "Stored".to_string(),
            last_name: "Name".to_string(),
            email: "stored@acme.test".to_string(),
            company: "Acme".to_string(),
            role: "marketing".to_string(),
        })
    }
    async fn connected_accounts(&self) -> Result<ConnectedAccountsResponse, ApiError> {
        Ok(ConnectedAccountsResponse {
            connected: self.accounts.lock().unwrap().clone(),
            available: vec![],
        })
    }
    async fn workspace(&self) -> Result<WorkspaceSettings, ApiError> {
        Ok(WorkspaceSettings {
            brand_name: "Acme".to_string(),
            industry: "retail".to_string(),
            website_url: "https://acme.test".to_string(),
            competitors: vec!["Globex".to_string()],
        })
    }
    async fn mcp_server(&self) -> Result<McpServerSettings, ApiError> {
        Ok(McpServerSettings {
            server_url: "https://mcp.acme.test".to_string(),
            api_key_masked: "sk-****".to_string(),
        })
    }
    async fn privacy(&self) -> Result<PrivacySettings, ApiError> {
        if self.fail_privacy {
            return server_error("privacy unavailable");
        }
        Ok(PrivacySettings {
            historical_data_days: 90,
            refresh_frequency_hours: 24,
        })
    }
    async fn settings_options(&self) -> Result<SettingsOptions, ApiError> {
        Ok(SettingsOptions::default())
    }
    async fn save_settings(
        &self,
        section: SettingsSection,
        payload: &serde_json::Value,
    ) -> Result<(), ApiError> {
        if self.fail_save.load(Ordering::SeqCst) {
            return server_error("read only");
        }
        self.saved.lock().unwrap().push((section, payload.clone()));
        Ok(())
    }
    async fn test_mcp_connection(&self) -> Result<ConnectionTestResult, ApiError> {
        if self.fail_test {
            return server_error("unreachable");
        }
        Ok(ConnectionTestResult {
            success: true,
            message: "Connected".to_string(),
            response_time_ms: Some(42),
        })
    }
    async fn connect_account(&self, platform: &str, body: &AccountConnect) -> Result<(), ApiError> {
        self.connected
            .lock()
            .unwrap()
            .push((platform.to_string(), body.clone()));
        self.accounts.lock().unwrap().push(ConnectedAccount {
            platform: platform.to_string(),
            username: body.username.clone(),
        });
        Ok(())
    }
    async fn disconnect_account(&self, platform: &str) -> Result<(), ApiError> {
        if platform == "facebook" {
            return server_error("not connected");
        }
        self.accounts
            .lock()
            .unwrap()
            .retain(|a| a.platform != platform);
        Ok(())
    }
}

fn user() -> User {
    User {
        id: "u-1".to_string(),
        email: "ada@acme.test".to_string(),
        is_active: true,
        is_superuser: false,
        is_verified: true,
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
    }
}

async fn loaded(api: FakeApi) -> (Arc<FakeApi>, SettingsPage<FakeApi>) {
    let api = Arc::new(api);
    let page = SettingsPage::new(Arc::clone(&api), Some(user()));
    page.load().await.unwrap();
    (api, page)
}

#[tokio::test]
async fn load_overrides_profile_identity_from_user() {
    let (_, page) = loaded(FakeApi::default()).await;

    let state = page.state().await;
    assert!(!state.loading);
    let profile = state.profile.unwrap();
    assert_eq!(profile.first_name, "Ada");
    assert_eq!(profile.email, "ada@acme.test");
    assert_eq!(profile.company, "Acme");
    assert_eq!(state.privacy.map(|p| p.historical_data_days), Some(90));
}

#[tokio::test]
async fn load_keeps_stored_profile_without_user() {
    let page = SettingsPage::new(Arc::new(FakeApi::default()), None);
    page.load().await.unwrap();
    assert_eq!(
        page.state().await.profile.map(|p| p.first_name).as_deref(),
        Some("Stored")
    );
}

#[tokio::test]
async fn load_failure_shows_error_message() {
    let page = SettingsPage::new(
        Arc::new(FakeApi {
            fail_privacy: true,
            ..FakeApi::default()
        }),
        None,
    );

    page.load().await.unwrap_err();

    let state = page.state().await;
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("privacy unavailable"));
    assert!(state.profile.is_none());
}

#[tokio::test(start_paused = true)]
async fn save_marks_section_saved_then_idle() {
    let (api, page) = loaded(FakeApi::default()).await;

    page.save(SettingsSection::Profile).await.unwrap();

    let state = page.state().await;
    assert_eq!(state.save_status(SettingsSection::Profile), SaveStatus::Saved);
    assert_eq!(state.save_status(SettingsSection::Privacy), SaveStatus::Idle);

    let saved = api.saved.lock().unwrap().clone();
    assert_eq!(saved[0].0, SettingsSection::Profile);
    assert_eq!(
        saved[0].1,
        serde_json::json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "company": "Acme",
            "role": "marketing"
        })
    );

    tokio::time::advance(SAVED_RESET).await;
    assert_eq!(
        page.state().await.save_status(SettingsSection::Profile),
        SaveStatus::Idle
    );
}

#[tokio::test]
async fn mcp_save_sends_typed_key() {
    let (api, page) = loaded(FakeApi::default()).await;
    page.update(|s| s.mcp_api_key = "sk-new".to_string()).await;

    page.save(SettingsSection::McpServer).await.unwrap();

    let saved = api.saved.lock().unwrap().clone();
    assert_eq!(
        saved[0].1,
        serde_json::json!({"server_url": "https://mcp.acme.test", "api_key": "sk-new"})
    );
}

#[tokio::test]
async fn failed_save_names_section() {
    let (api, page) = loaded(FakeApi::default()).await;
    api.fail_save.store(true, Ordering::SeqCst);

    let err = page.save(SettingsSection::McpServer).await.unwrap_err();
    assert!(matches!(err, SettingsError::Api(_)));

    let state = page.state().await;
    assert_eq!(
        state.error.as_deref(),
        Some("Failed to save mcp-server: read only")
    );
    assert_eq!(state.save_status(SettingsSection::McpServer), SaveStatus::Idle);
}

#[tokio::test]
async fn save_before_load_is_rejected() {
    let page = SettingsPage::new(Arc::new(FakeApi::default()), None);
    let err = page.save(SettingsSection::Workspace).await.unwrap_err();
    assert!(matches!(
        err,
        SettingsError::NotLoaded {
            section: SettingsSection::Workspace
        }
    ));
}

#[tokio::test]
async fn competitors_are_saved_with_workspace() {
    let (api, page) = loaded(FakeApi::default()).await;

    page.update(|s| {
        if let Some(form) = s.workspace.as_mut() {
            form.competitor_input = "Initech".to_string();
        }
    })
    .await;
    assert!(page.add_competitor().await);
    assert!(!page.add_competitor().await);
    page.remove_competitor("Globex").await;

    page.save(SettingsSection::Workspace).await.unwrap();

    let saved = api.saved.lock().unwrap().clone();
    assert_eq!(saved[0].1["competitors"], serde_json::json!(["Initech"]));
}

#[tokio::test]
async fn connection_test_failure_becomes_result() {
    let (_, page) = loaded(FakeApi {
        fail_test: true,
        ..FakeApi::default()
    })
    .await;

    let result = page.test_connection().await;
    assert!(!result.success);
    assert_eq!(result.message, "unreachable");
    assert_eq!(result.response_time_ms, None);

    let state = page.state().await;
    assert!(!state.testing);
    assert!(state.error.is_none());
    assert_eq!(state.test_result, Some(result));
}

#[tokio::test]
async fn connect_then_disconnect_refreshes_accounts() {
    let (api, page) = loaded(FakeApi::default()).await;

    page.connect("tiktok", "tok-1").await.unwrap();
    let (platform, body) = api.connected.lock().unwrap()[0].clone();
    assert_eq!(platform, "tiktok");
    assert_eq!(body.username, "@new_tiktok");
    assert_eq!(body.access_token, "tok-1");
    let connected = page.state().await.accounts.unwrap().connected;
    assert_eq!(connected.len(), 1);

    page.disconnect("tiktok").await.unwrap();
    assert!(page.state().await.accounts.unwrap().connected.is_empty());
}

#[tokio::test]
async fn failed_disconnect_names_action() {
    let (_, page) = loaded(FakeApi::default()).await;

    page.disconnect("facebook").await.unwrap_err();

    assert_eq!(
        page.state().await.error.as_deref(),
        Some("Failed to disconnect account: not connected")
    );
}
