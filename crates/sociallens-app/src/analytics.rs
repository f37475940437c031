//! Analytics page: filter state, the six concurrent metric fetches, and the
//! sortable, paginated top-posts table.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{Datelike, Days, Local, NaiveDate, NaiveDateTime, NaiveTime};
use sociallens_api::{AnalyticsApi, AnalyticsQuery, ApiError, BrandQuery, BrandsApi};
use sociallens_core::{
    AnalyticsMetrics, AnalyticsPost, Brand, BrandPostVolumeEngagement, FollowerGrowthTrend,
    PlatformEngagement, PostTypeDistribution,
};
use tokio::sync::Mutex;

pub const LOAD_ANALYTICS_ERROR: &str = "Failed to load analytics data. Please try again later.";
pub const BRAND_OPTIONS_ERROR: &str = "Could not load brand filter options.";

/// Selection value meaning "no restriction".
pub const ALL: &str = "All";

pub const CHANNELS: [&str; 5] = ["Instagram", "TikTok", "Twitter", "Facebook", "YouTube"];

pub const POSTS_PER_PAGE: usize = 10;

/// Multi-select filter with the "All" sentinel.
///
/// Choosing "All" clears every other value; choosing anything else drops
/// "All"; deselecting the last value falls back to "All".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSelect {
    values: Vec<String>,
}

impl Default for MultiSelect {
    fn default() -> Self {
        Self {
            values: vec![ALL.to_string()],
        }
    }
}

impl MultiSelect {
    pub fn toggle(&mut self, value: &str) {
        if value == ALL {
            self.values = vec![ALL.to_string()];
            return;
        }
        self.values.retain(|v| v != ALL);
        if let Some(idx) = self.values.iter().position(|v| v == value) {
            self.values.remove(idx);
        } else {
            self.values.push(value.to_string());
        }
        if self.values.is_empty() {
            self.values.push(ALL.to_string());
        }
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        self.values.is_empty() || self.values.iter().any(|v| v == ALL)
    }

    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// Selected values, or `None` when unrestricted.
    #[must_use]
    pub fn selected(&self) -> Option<&[String]> {
        (!self.is_all()).then_some(self.values.as_slice())
    }

    /// Dropdown button text.
    #[must_use]
    pub fn label(&self, default_text: &str) -> String {
        match self.selected() {
            None => default_text.to_string(),
            Some([single]) => single.clone(),
            Some(values) => format!("{} Selected", values.len()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DatePreset {
    Last7Days,
    #[default]
    Last30Days,
    Last90Days,
    ThisMonth,
}

impl DatePreset {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Last7Days => "last_7_days",
            Self::Last30Days => "last_30_days",
            Self::Last90Days => "last_90_days",
            Self::ThisMonth => "this_month",
        }
    }

    /// Range ending at the last second of `today`.
    #[must_use]
    pub fn range(self, today: NaiveDate) -> DateRange {
        let start_day = match self {
            Self::Last7Days => today.checked_sub_days(Days::new(7)),
            Self::Last30Days => today.checked_sub_days(Days::new(30)),
            Self::Last90Days => today.checked_sub_days(Days::new(90)),
            Self::ThisMonth => today.with_day(1),
        }
        .unwrap_or(today);
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        DateRange {
            start: start_day.and_time(NaiveTime::MIN),
            end: today.and_time(end_of_day),
            preset: Some(self),
        }
    }
}

impl std::str::FromStr for DatePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last_7_days" => Ok(Self::Last7Days),
            "last_30_days" => Ok(Self::Last30Days),
            "last_90_days" => Ok(Self::Last90Days),
            "this_month" => Ok(Self::ThisMonth),
            other => Err(format!(
                "unknown date preset '{other}' (expected last_7_days, last_30_days, last_90_days, or this_month)"
            )),
        }
    }
}

/// Reporting window. `preset` is `None` for a custom range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub preset: Option<DatePreset>,
}

impl DateRange {
    #[must_use]
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        Self {
            start: start.and_time(NaiveTime::MIN),
            end: end.and_time(end_of_day),
            preset: None,
        }
    }
}

/// Sortable top-posts columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSortKey {
    BrandName,
    Content,
    EngagementCount,
    Views,
    EngagementRate,
}

impl PostSortKey {
    fn compare(self, a: &AnalyticsPost, b: &AnalyticsPost) -> Ordering {
        match self {
            Self::BrandName => a.brand_name.cmp(&b.brand_name),
            Self::Content => a.content.cmp(&b.content),
            Self::EngagementCount => a.engagement_count.cmp(&b.engagement_count),
            Self::Views => a.views.cmp(&b.views),
            Self::EngagementRate => a
                .engagement_rate
                .partial_cmp(&b.engagement_rate)
                .unwrap_or(Ordering::Equal),
        }
    }
}

impl std::str::FromStr for PostSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brand_name" => Ok(Self::BrandName),
            "content" => Ok(Self::Content),
            "engagement_count" => Ok(Self::EngagementCount),
            "views" => Ok(Self::Views),
            "engagement_rate" => Ok(Self::EngagementRate),
            other => Err(format!("unknown sort column '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostSort {
    pub key: PostSortKey,
    pub direction: SortDirection,
}

impl Default for PostSort {
    fn default() -> Self {
        Self {
            key: PostSortKey::EngagementCount,
            direction: SortDirection::Desc,
        }
    }
}

impl PostSort {
    /// Clicking the active descending column flips it to ascending; any other
    /// click sorts that column descending.
    #[must_use]
    pub fn toggled(self, key: PostSortKey) -> Self {
        let direction = if self.key == key && self.direction == SortDirection::Desc {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        };
        Self { key, direction }
    }

    #[must_use]
    pub fn apply(self, posts: &[AnalyticsPost]) -> Vec<AnalyticsPost> {
        let mut sorted = posts.to_vec();
        sorted.sort_by(|a, b| {
            let ord = self.key.compare(a, b);
            match self.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
        sorted
    }
}

/// Visible slice of the top-posts table.
#[derive(Debug, Clone, PartialEq)]
pub struct PostsPage {
    pub posts: Vec<AnalyticsPost>,
    pub page: usize,
    /// 1-based index of the first row shown.
    pub first: usize,
    /// 1-based index of the last row shown.
    pub last: usize,
    pub total: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsState {
    pub brands: Vec<Brand>,
    pub metrics: Option<AnalyticsMetrics>,
    pub platforms: Vec<PlatformEngagement>,
    pub post_types: Vec<PostTypeDistribution>,
    pub performance: Vec<BrandPostVolumeEngagement>,
    pub growth: Option<FollowerGrowthTrend>,
    pub top_posts: Vec<AnalyticsPost>,
    pub loading: bool,
    pub error: Option<String>,
    pub brand_filter: MultiSelect,
    pub channel_filter: MultiSelect,
    pub range: DateRange,
    pub sort: PostSort,
    pub page: usize,
}

impl AnalyticsState {
    fn new(today: NaiveDate) -> Self {
        Self {
            brands: Vec::new(),
            metrics: None,
            platforms: Vec::new(),
            post_types: Vec::new(),
            performance: Vec::new(),
            growth: None,
            top_posts: Vec::new(),
            loading: true,
            error: None,
            brand_filter: MultiSelect::default(),
            channel_filter: MultiSelect::default(),
            range: DatePreset::default().range(today),
            sort: PostSort::default(),
            page: 1,
        }
    }

    /// Query for the current filters. Brands are selected by name and sent
    /// by id.
    #[must_use]
    pub fn query(&self) -> AnalyticsQuery {
        AnalyticsQuery {
            brand_ids: self
                .brands
                .iter()
                .filter(|b| self.brand_filter.contains(&b.name))
                .map(|b| b.id.clone())
                .collect(),
            channels: self.channel_filter.selected().map(<[String]>::to_vec),
            start_date: self.range.start.date(),
            end_date: self.range.end.date(),
        }
    }

    #[must_use]
    pub fn posts_page(&self) -> PostsPage {
        let sorted = self.sort.apply(&self.top_posts);
        let total = sorted.len();
        let start = (self.page - 1) * POSTS_PER_PAGE;
        let end = (self.page * POSTS_PER_PAGE).min(total);
        let posts = sorted.get(start..end).map(<[_]>::to_vec).unwrap_or_default();
        PostsPage {
            posts,
            page: self.page,
            first: if total == 0 { 0 } else { start + 1 },
            last: end,
            total,
            has_prev: self.page > 1,
            has_next: self.page * POSTS_PER_PAGE < total,
        }
    }
}

struct Fetched {
    metrics: AnalyticsMetrics,
    platforms: Vec<PlatformEngagement>,
    post_types: Vec<PostTypeDistribution>,
    performance: Vec<BrandPostVolumeEngagement>,
    growth: FollowerGrowthTrend,
    top_posts: Vec<AnalyticsPost>,
}

pub struct AnalyticsPage<A> {
    api: Arc<A>,
    state: Mutex<AnalyticsState>,
}

impl<A: AnalyticsApi + BrandsApi> AnalyticsPage<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self::starting(api, Local::now().date_naive())
    }

    /// Page whose date presets are computed relative to `today`.
    pub fn starting(api: Arc<A>, today: NaiveDate) -> Self {
        Self {
            api,
            state: Mutex::new(AnalyticsState::new(today)),
        }
    }

    pub async fn state(&self) -> AnalyticsState {
        self.state.lock().await.clone()
    }

    pub async fn dismiss_error(&self) {
        self.state.lock().await.error = None;
    }

    /// Fetch the brand filter options, then the analytics data.
    ///
    /// # Errors
    ///
    /// Returns the first failing request; the page error is set.
    pub async fn load(&self) -> Result<(), ApiError> {
        match self.api.list_brands(&BrandQuery::default()).await {
            Ok(response) => self.state.lock().await.brands = response.brands,
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch brands for filter");
                let mut state = self.state.lock().await;
                state.error = Some(BRAND_OPTIONS_ERROR.to_string());
                state.loading = false;
                return Err(e);
            }
        }
        self.refresh().await.map(|_| ())
    }

    /// Fetch all six datasets concurrently for the current filters.
    /// Nothing is fetched until the brand list is non-empty; returns
    /// `Ok(false)` in that case.
    ///
    /// # Errors
    ///
    /// Returns the first failing request; the page error is set.
    pub async fn refresh(&self) -> Result<bool, ApiError> {
        let query = {
            let mut state = self.state.lock().await;
            if state.brands.is_empty() {
                state.loading = false;
                return Ok(false);
            }
            state.loading = true;
            state.error = None;
            state.query()
        };

        let api = &self.api;
        let result = futures::try_join!(
            api.metrics(&query),
            api.engagement_by_platform(&query),
            api.post_type_distribution(&query),
            api.post_volume_engagement(&query),
            api.follower_growth(&query),
            api.top_posts(&query),
        )
        .map(
            |(metrics, platforms, post_types, performance, growth, top_posts)| Fetched {
                metrics,
                platforms,
                post_types,
                performance,
                growth,
                top_posts,
            },
        );

        let mut state = self.state.lock().await;
        state.loading = false;
        match result {
            Ok(fetched) => {
                state.metrics = Some(fetched.metrics);
                state.platforms = fetched.platforms;
                state.post_types = fetched.post_types;
                state.performance = fetched.performance;
                state.growth = Some(fetched.growth);
                state.top_posts = fetched.top_posts;
                Ok(true)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch analytics data");
                state.error = Some(LOAD_ANALYTICS_ERROR.to_string());
                Err(e)
            }
        }
    }

    async fn change_filters(&self, f: impl FnOnce(&mut AnalyticsState)) -> Result<bool, ApiError> {
        {
            let mut state = self.state.lock().await;
            f(&mut state);
            state.page = 1;
        }
        self.refresh().await
    }

    /// # Errors
    ///
    /// See [`AnalyticsPage::refresh`].
    pub async fn toggle_brand(&self, name: &str) -> Result<bool, ApiError> {
        self.change_filters(|s| s.brand_filter.toggle(name)).await
    }

    /// # Errors
    ///
    /// See [`AnalyticsPage::refresh`].
    pub async fn toggle_channel(&self, channel: &str) -> Result<bool, ApiError> {
        self.change_filters(|s| s.channel_filter.toggle(channel))
            .await
    }

    /// # Errors
    ///
    /// See [`AnalyticsPage::refresh`].
    pub async fn set_preset(&self, preset: DatePreset, today: NaiveDate) -> Result<bool, ApiError> {
        self.change_filters(|s| s.range = preset.range(today)).await
    }

    /// # Errors
    ///
    /// See [`AnalyticsPage::refresh`].
    pub async fn set_range(&self, start: NaiveDate, end: NaiveDate) -> Result<bool, ApiError> {
        self.change_filters(|s| s.range = DateRange::custom(start, end))
            .await
    }

    pub async fn set_sort(&self, sort: PostSort) {
        self.state.lock().await.sort = sort;
    }

    /// Column header click: see [`PostSort::toggled`].
    pub async fn sort_by(&self, key: PostSortKey) {
        let mut state = self.state.lock().await;
        state.sort = state.sort.toggled(key);
    }

    pub async fn next_page(&self) {
        let mut state = self.state.lock().await;
        if state.page * POSTS_PER_PAGE < state.top_posts.len() {
            state.page += 1;
        }
    }

    pub async fn prev_page(&self) {
        let mut state = self.state.lock().await;
        if state.page > 1 {
            state.page -= 1;
        }
    }
}

#[cfg(test)]
#[path = "analytics_test.rs"]
mod tests;
