//! Typed dashboard endpoints.
//!
//! Each page controller depends only on the trait it needs, so tests can
//! substitute an in-memory fake. [`ApiClient`] implements all of them and
//! therefore [`DashboardApi`].

use async_trait::async_trait;
use sociallens_core::{
    AccountConnect, AnalysisTemplate, AnalyticsMetrics, AnalyticsPost, Brand, BrandCreate,
    BrandListResponse, BrandPatch, BrandPostVolumeEngagement, BrandStats, BrandUpdate,
    ConnectedAccountsResponse, ConnectionTestResult, FollowerGrowthTrend, McpServerSettings,
    PlatformEngagement, PostTypeDistribution, PrivacySettings, Report, SettingsOptions,
    TemplatesPayload, User, UserProfile, WorkspaceSettings,
};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::query::{AnalyticsQuery, BrandQuery, SettingsSection};

#[async_trait]
pub trait BrandsApi: Send + Sync {
    async fn list_brands(&self, query: &BrandQuery) -> Result<BrandListResponse, ApiError>;
    async fn create_brand(&self, brand: &BrandCreate) -> Result<Brand, ApiError>;
    async fn update_brand(&self, id: &str, update: &BrandUpdate) -> Result<Brand, ApiError>;
    /// Partial update with per-profile add/update/remove operations.
    async fn patch_brand(&self, id: &str, patch: &BrandPatch) -> Result<Brand, ApiError>;
    async fn delete_brand(&self, id: &str) -> Result<(), ApiError>;
    /// Ask the server to refresh the brand's social data; returns the synced record.
    async fn sync_brand(&self, id: &str) -> Result<Brand, ApiError>;
    async fn brand_stats(&self) -> Result<BrandStats, ApiError>;
}

#[async_trait]
pub trait TemplatesApi: Send + Sync {
    /// `GET templates`, optionally narrowed by a server-side search.
    async fn list_templates(&self, search: Option<&str>)
        -> Result<Vec<AnalysisTemplate>, ApiError>;
}

#[async_trait]
pub trait ReportsApi: Send + Sync {
    async fn list_reports(&self) -> Result<Vec<Report>, ApiError>;
    async fn delete_report(&self, id: i64) -> Result<(), ApiError>;
}

#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    async fn metrics(&self, query: &AnalyticsQuery) -> Result<AnalyticsMetrics, ApiError>;
    async fn engagement_by_platform(
        &self,
        query: &AnalyticsQuery,
    ) -> Result<Vec<PlatformEngagement>, ApiError>;
    async fn post_type_distribution(
        &self,
        query: &AnalyticsQuery,
    ) -> Result<Vec<PostTypeDistribution>, ApiError>;
    async fn post_volume_engagement(
        &self,
        query: &AnalyticsQuery,
    ) -> Result<Vec<BrandPostVolumeEngagement>, ApiError>;
    async fn follower_growth(&self, query: &AnalyticsQuery)
        -> Result<FollowerGrowthTrend, ApiError>;
    async fn top_posts(&self, query: &AnalyticsQuery) -> Result<Vec<AnalyticsPost>, ApiError>;
}

#[async_trait]
pub trait SettingsApi: Send + Sync {
    async fn profile(&self) -> Result<UserProfile, ApiError>;
    async fn connected_accounts(&self) -> Result<ConnectedAccountsResponse, ApiError>;
    async fn workspace(&self) -> Result<WorkspaceSettings, ApiError>;
    async fn mcp_server(&self) -> Result<McpServerSettings, ApiError>;
    async fn privacy(&self) -> Result<PrivacySettings, ApiError>;
    async fn settings_options(&self) -> Result<SettingsOptions, ApiError>;
    /// `PUT settings/{section}`; the response body is ignored.
    async fn save_settings(
        &self,
        section: SettingsSection,
        payload: &serde_json::Value,
    ) -> Result<(), ApiError>;
    async fn test_mcp_connection(&self) -> Result<ConnectionTestResult, ApiError>;
    async fn connect_account(&self, platform: &str, body: &AccountConnect)
        -> Result<(), ApiError>;
    async fn disconnect_account(&self, platform: &str) -> Result<(), ApiError>;
}

#[async_trait]
pub trait UsersApi: Send + Sync {
    async fn current_user(&self) -> Result<User, ApiError>;
}

/// Every endpoint the dashboard uses.
pub trait DashboardApi:
    BrandsApi + TemplatesApi + ReportsApi + AnalyticsApi + SettingsApi + UsersApi
{
}

impl<T> DashboardApi for T where
    T: BrandsApi + TemplatesApi + ReportsApi + AnalyticsApi + SettingsApi + UsersApi
{
}

fn empty_body() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

#[async_trait]
impl BrandsApi for ApiClient {
    async fn list_brands(&self, query: &BrandQuery) -> Result<BrandListResponse, ApiError> {
        self.get_with_query("brands", &query.to_params()).await
    }

    async fn create_brand(&self, brand: &BrandCreate) -> Result<Brand, ApiError> {
        self.post("brands", brand).await
    }

    async fn update_brand(&self, id: &str, update: &BrandUpdate) -> Result<Brand, ApiError> {
        self.put(&format!("brands/{id}"), update).await
    }

    async fn patch_brand(&self, id: &str, patch: &BrandPatch) -> Result<Brand, ApiError> {
        self.patch(&format!("brands/{id}"), patch).await
    }

    async fn delete_brand(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("brands/{id}")).await
    }

    async fn sync_brand(&self, id: &str) -> Result<Brand, ApiError> {
        self.post(&format!("brands/{id}/sync"), &empty_body()).await
    }

    async fn brand_stats(&self) -> Result<BrandStats, ApiError> {
        self.get("brands/stats").await
    }
}

#[async_trait]
impl TemplatesApi for ApiClient {
    async fn list_templates(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<AnalysisTemplate>, ApiError> {
        let query: Vec<(&str, String)> = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| vec![("search", s.to_string())])
            .unwrap_or_default();
        let payload: TemplatesPayload = self.get_with_query("templates", &query).await?;
        Ok(payload.into_templates())
    }
}

#[async_trait]
impl ReportsApi for ApiClient {
    async fn list_reports(&self) -> Result<Vec<Report>, ApiError> {
        self.get("reports").await
    }

    async fn delete_report(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("reports/{id}")).await
    }
}

#[async_trait]
impl AnalyticsApi for ApiClient {
    async fn metrics(&self, query: &AnalyticsQuery) -> Result<AnalyticsMetrics, ApiError> {
        self.get_with_query("analytics/metrics", &query.to_params())
            .await
    }

    async fn engagement_by_platform(
        &self,
        query: &AnalyticsQuery,
    ) -> Result<Vec<PlatformEngagement>, ApiError> {
        self.get_with_query("analytics/engagement-by-platform", &query.to_params())
            .await
    }

    async fn post_type_distribution(
        &self,
        query: &AnalyticsQuery,
    ) -> Result<Vec<PostTypeDistribution>, ApiError> {
        self.get_with_query("analytics/post-type-distribution", &query.to_params())
            .await
    }

    async fn post_volume_engagement(
        &self,
        query: &AnalyticsQuery,
    ) -> Result<Vec<BrandPostVolumeEngagement>, ApiError> {
        self.get_with_query("analytics/post-volume-engagement", &query.to_params())
            .await
    }

    async fn follower_growth(
        &self,
        query: &AnalyticsQuery,
    ) -> Result<FollowerGrowthTrend, ApiError> {
        self.get_with_query("analytics/follower-growth", &query.to_params())
            .await
    }

    async fn top_posts(&self, query: &AnalyticsQuery) -> Result<Vec<AnalyticsPost>, ApiError> {
        self.get_with_query("analytics/top-posts", &query.to_params())
            .await
    }
}

#[async_trait]
impl SettingsApi for ApiClient {
    async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.get("settings/profile").await
    }

    async fn connected_accounts(&self) -> Result<ConnectedAccountsResponse, ApiError> {
        self.get("settings/connected-accounts").await
    }

    async fn workspace(&self) -> Result<WorkspaceSettings, ApiError> {
        self.get("settings/workspace").await
    }

    async fn mcp_server(&self) -> Result<McpServerSettings, ApiError> {
        self.get("settings/mcp-server").await
    }

    async fn privacy(&self) -> Result<PrivacySettings, ApiError> {
        self.get("settings/privacy").await
    }

    async fn settings_options(&self) -> Result<SettingsOptions, ApiError> {
        self.get("settings/options").await
    }

    async fn save_settings(
        &self,
        section: SettingsSection,
        payload: &serde_json::Value,
    ) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .put(&format!("settings/{}", section.path()), payload)
            .await?;
        Ok(())
    }

    async fn test_mcp_connection(&self) -> Result<ConnectionTestResult, ApiError> {
        self.post("settings/mcp-server/test", &empty_body()).await
    }

    async fn connect_account(
        &self,
        platform: &str,
        body: &AccountConnect,
    ) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .post(&format!("settings/connected-accounts/{platform}"), body)
            .await?;
        Ok(())
    }

    async fn disconnect_account(&self, platform: &str) -> Result<(), ApiError> {
        self.delete(&format!("settings/connected-accounts/{platform}"))
            .await
    }
}

#[async_trait]
impl UsersApi for ApiClient {
    async fn current_user(&self) -> Result<User, ApiError> {
        self.get("users/me").await
    }
}
