pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod query;

pub use client::ApiClient;
pub use config::{load_api_config, ApiConfig, API_PREFIX};
pub use endpoints::{
    AnalyticsApi, BrandsApi, DashboardApi, ReportsApi, SettingsApi, TemplatesApi, UsersApi,
};
pub use error::ApiError;
pub use query::{AnalyticsQuery, BrandQuery, BrandSort, SettingsSection};
