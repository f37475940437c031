pub mod analytics;
pub mod app_config;
pub mod brands;
pub mod config;
pub mod error;
pub mod forms;
pub mod present;
pub mod reports;
pub mod settings;
pub mod social;
mod timestamp;

pub use analytics::{
    AnalyticsMetrics, AnalyticsPost, BrandPostVolumeEngagement, FollowerGrowthSeries,
    FollowerGrowthTrend, PlatformEngagement, PostTypeDistribution,
};
pub use app_config::{AppConfig, ConfigSource, Environment};
pub use brands::{
    Brand, BrandCreate, BrandListResponse, BrandPatch, BrandStats, BrandStatus, BrandUpdate,
    SocialPlatform, SocialProfile, SocialProfileCreate, SocialProfilePatchOp,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, ValidationError};
pub use forms::{AddBrandForm, BrandEdit, EditBrandForm, NewBrand, WorkspaceForm};
pub use reports::{
    AnalysisTemplate, BrandDisplayItem, DisplayItemKind, RawTemplate, Report, ReportBrandsConfig,
    SampleReport, TemplatesPayload,
};
pub use settings::{
    AccountConnect, AvailablePlatform, ConnectedAccount, ConnectedAccountsResponse,
    ConnectionTestResult, McpServerSettings, McpServerUpdate, OptionItem, PrivacySettings,
    ProfileUpdate, SettingsOptions, User, UserProfile, WorkspaceSettings,
};
pub use social::{infer_platform, normalize_social_url, validate_social_url};
