use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsMetrics {
    pub brands_analyzed: u64,
    pub total_posts: u64,
    pub engagements: u64,
    pub total_views: u64,
    pub avg_engagement_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformEngagement {
    pub platform: String,
    pub engagement_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTypeDistribution {
    pub post_type: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandPostVolumeEngagement {
    pub brand_name: String,
    pub post_count: u64,
    pub engagement_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowerGrowthSeries {
    pub brand_name: String,
    pub data_points: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FollowerGrowthTrend {
    pub dates: Vec<String>,
    pub brands: Vec<FollowerGrowthSeries>,
}

/// A row of the top-posts table.
///
/// Fields beyond the known ones are kept in `extra` so the table can sort by
/// any column the API sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsPost {
    pub id: String,
    pub brand_name: String,
    pub content: String,
    pub engagement_count: u64,
    pub views: u64,
    pub engagement_rate: f64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
