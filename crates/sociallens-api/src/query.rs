//! Typed query parameters for the list and analytics endpoints.

use chrono::NaiveDate;

/// Sort order accepted by `GET brands`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BrandSort {
    DateAddedDesc,
    #[default]
    NameAsc,
}

impl BrandSort {
    /// Value sent as `sort_by`.
    #[must_use]
    pub fn as_param(self) -> &'static str {
        match self {
            Self::DateAddedDesc => "date_added_desc",
            Self::NameAsc => "name_asc",
        }
    }
}

impl std::str::FromStr for BrandSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date_added_desc" | "date_desc" | "newest" => Ok(Self::DateAddedDesc),
            "name_asc" | "name" => Ok(Self::NameAsc),
            other => Err(format!(
                "unknown sort '{other}' (expected date_added_desc or name_asc)"
            )),
        }
    }
}

/// Parameters for `GET brands`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandQuery {
    pub search: String,
    pub sort: Option<BrandSort>,
    pub limit: Option<u32>,
}

impl BrandQuery {
    /// Query with only a limit, as used for the "any brands yet?" check.
    #[must_use]
    pub fn limited(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Query pairs in wire order. The search text is sent as typed; an empty
    /// search is omitted.
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.search.is_empty() {
            params.push(("search", self.search.clone()));
        }
        if let Some(sort) = self.sort {
            params.push(("sort_by", sort.as_param().to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

/// Filters shared by the six analytics endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsQuery {
    /// Brand ids; empty means every brand.
    pub brand_ids: Vec<String>,
    /// Channel names; `None` means every channel.
    pub channels: Option<Vec<String>>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl AnalyticsQuery {
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.brand_ids.is_empty() {
            params.push(("brand_ids", self.brand_ids.join(",")));
        }
        if let Some(channels) = self.channels.as_ref().filter(|c| !c.is_empty()) {
            params.push(("channels", channels.join(",")));
        }
        params.push(("start_date", self.start_date.format("%Y-%m-%d").to_string()));
        params.push(("end_date", self.end_date.format("%Y-%m-%d").to_string()));
        params
    }
}

/// Settings sections that can be read and saved individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsSection {
    Profile,
    Workspace,
    McpServer,
    Privacy,
}

impl SettingsSection {
    pub const ALL: [SettingsSection; 4] = [
        Self::Profile,
        Self::Workspace,
        Self::McpServer,
        Self::Privacy,
    ];

    /// Path segment under `settings/`.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Workspace => "workspace",
            Self::McpServer => "mcp-server",
            Self::Privacy => "privacy",
        }
    }
}

impl std::fmt::Display for SettingsSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

impl std::str::FromStr for SettingsSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "profile" => Ok(Self::Profile),
            "workspace" => Ok(Self::Workspace),
            "mcp-server" | "mcp_server" | "mcp" => Ok(Self::McpServer),
            "privacy" => Ok(Self::Privacy),
            other => Err(format!(
                "unknown settings section '{other}' (expected profile, workspace, mcp-server, or privacy)"
            )),
        }
    }
}
