use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Platform tag inferred client-side from a profile URL's host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Twitter,
    Facebook,
    Instagram,
    Linkedin,
    Youtube,
    Tiktok,
    Website,
}

impl SocialPlatform {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SocialPlatform::Twitter => "twitter",
            SocialPlatform::Facebook => "facebook",
            SocialPlatform::Instagram => "instagram",
            SocialPlatform::Linkedin => "linkedin",
            SocialPlatform::Youtube => "youtube",
            SocialPlatform::Tiktok => "tiktok",
            SocialPlatform::Website => "website",
        }
    }
}

impl std::fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server-side ingestion state of a brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrandStatus {
    Pending,
    Syncing,
    Updated,
    Error,
}

impl std::fmt::Display for BrandStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BrandStatus::Pending => write!(f, "pending"),
            BrandStatus::Syncing => write!(f, "syncing"),
            BrandStatus::Updated => write!(f, "updated"),
            BrandStatus::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialProfile {
    pub id: String,
    pub platform: SocialPlatform,
    pub profile_url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "crate::timestamp::option")]
    pub last_synced_at: Option<DateTime<Utc>>,
}

/// A tracked brand as returned by the API.
///
/// `is_loading` is client-only: it marks an optimistic placeholder that the
/// server has not confirmed yet and is never sent or received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub social_profiles: Vec<SocialProfile>,
    pub status: BrandStatus,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub owner_id: String,
    #[serde(skip)]
    pub is_loading: bool,
}

impl Brand {
    /// Find an existing profile by exact URL match.
    #[must_use]
    pub fn profile_by_url(&self, url: &str) -> Option<&SocialProfile> {
        self.social_profiles.iter().find(|p| p.profile_url == url)
    }

    #[must_use]
    pub fn profile_urls(&self) -> Vec<String> {
        self.social_profiles
            .iter()
            .map(|p| p.profile_url.clone())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialProfileCreate {
    pub platform: SocialPlatform,
    pub profile_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl SocialProfileCreate {
    /// Build a create entry for `url`, inferring its platform.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        Self {
            platform: crate::social::infer_platform(url),
            profile_url: url.to_string(),
            username: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandCreate {
    pub name: String,
    pub logo_url: Option<String>,
    pub social_profiles: Vec<SocialProfileCreate>,
}

/// Full-replacement update body for `PUT brands/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_profiles: Option<Vec<SocialProfileCreate>>,
}

/// One incremental social-profile change in a `PATCH brands/{id}` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum SocialProfilePatchOp {
    Add {
        platform: SocialPlatform,
        profile_url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        username: Option<String>,
    },
    Update {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        platform: Option<SocialPlatform>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        profile_url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        username: Option<String>,
    },
    Remove {
        id: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_profiles: Option<Vec<SocialProfilePatchOp>>,
}

impl BrandPatch {
    /// Diff `brand`'s current profiles against `urls` into add/remove ops.
    ///
    /// Profiles whose URL is still present are left untouched; order of the
    /// resulting ops is removals first, then additions in `urls` order.
    #[must_use]
    pub fn profile_ops(brand: &Brand, urls: &[String]) -> Vec<SocialProfilePatchOp> {
        let removals = brand
            .social_profiles
            .iter()
            .filter(|p| !urls.contains(&p.profile_url))
            .map(|p| SocialProfilePatchOp::Remove { id: p.id.clone() });
        let additions = urls
            .iter()
            .filter(|url| brand.profile_by_url(url).is_none())
            .map(|url| SocialProfilePatchOp::Add {
                platform: crate::social::infer_platform(url),
                profile_url: url.clone(),
                username: None,
            });
        removals.chain(additions).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandListResponse {
    pub brands: Vec<Brand>,
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}

/// Aggregate counters shown in the Brands page header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandStats {
    pub total_brands: u64,
    pub total_accounts: u64,
    pub total_content: u64,
    pub total_engagements: u64,
    pub total_followers: u64,
    pub total_views: u64,
}
