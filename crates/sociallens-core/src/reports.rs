use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Minutes assumed when a template's `details` text carries no number.
const DEFAULT_ESTIMATED_MINUTES: u32 = 5;

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid number regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayItemKind {
    Logo,
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandDisplayItem {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: DisplayItemKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl BrandDisplayItem {
    /// Image reference; responses use either `logo` or `url`.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.logo.as_deref().or(self.url.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportBrandsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subheading: Option<String>,
    #[serde(default)]
    pub display: Vec<BrandDisplayItem>,
}

/// A server-generated analysis document, embeddable via `report_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    pub component_category: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    pub report_url: String,
    #[serde(default)]
    pub brands: Option<ReportBrandsConfig>,
}

impl Report {
    /// Names of the brands shown as logos, skipping separators.
    #[must_use]
    pub fn brand_names(&self) -> Vec<&str> {
        self.brands
            .iter()
            .flat_map(|cfg| cfg.display.iter())
            .filter(|item| item.kind == DisplayItemKind::Logo)
            .map(|item| item.name.as_str())
            .collect()
    }

    /// First logo item, used for headers.
    #[must_use]
    pub fn first_brand(&self) -> Option<&BrandDisplayItem> {
        self.brands
            .as_ref()?
            .display
            .iter()
            .find(|item| item.kind == DisplayItemKind::Logo)
    }

    /// Case-insensitive match on headline, explanation, or category.
    #[must_use]
    pub fn matches_search(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        let contains = |s: &str| s.to_lowercase().contains(&needle);
        self.headline.as_deref().is_some_and(contains)
            || self.explanation.as_deref().is_some_and(contains)
            || contains(self.component_category.as_str())
    }
}

/// Template shape as served by `GET templates`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTemplate {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub sample_reports: Option<Vec<SampleReport>>,
}

/// Sample report attached to a template; same shape as a listed report.
pub type SampleReport = Report;

/// `GET templates` returns either a bare array or a `{ "templates": [...] }` envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TemplatesPayload {
    List(Vec<RawTemplate>),
    Wrapped { templates: Vec<RawTemplate> },
}

impl TemplatesPayload {
    #[must_use]
    pub fn into_templates(self) -> Vec<AnalysisTemplate> {
        let raw = match self {
            TemplatesPayload::List(list) | TemplatesPayload::Wrapped { templates: list } => list,
        };
        raw.into_iter().map(AnalysisTemplate::from).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisTemplate {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub prompt: String,
    pub category: String,
    pub estimated_time_minutes: u32,
    pub sample_reports: Vec<SampleReport>,
}

impl AnalysisTemplate {
    /// Case-insensitive match on name, description, or category.
    #[must_use]
    pub fn matches_search(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        [&self.name, &self.description, &self.category]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

impl From<RawTemplate> for AnalysisTemplate {
    fn from(raw: RawTemplate) -> Self {
        let estimated_time_minutes = FIRST_NUMBER
            .find(&raw.details)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(DEFAULT_ESTIMATED_MINUTES);
        Self {
            id: raw.id,
            name: raw.title,
            description: raw.description,
            prompt: raw.prompt,
            category: raw.category,
            estimated_time_minutes,
            sample_reports: raw.sample_reports.unwrap_or_default(),
        }
    }
}
