pub mod analytics;
pub mod brands;
pub mod debounce;
pub mod home;
pub mod reports;
pub mod settings;
pub mod view;

pub use analytics::{
    AnalyticsPage, AnalyticsState, DatePreset, DateRange, MultiSelect, PostSort, PostSortKey,
    PostsPage, SortDirection,
};
pub use brands::{BrandWrite, BrandsPage, BrandsState};
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use home::{HomePage, HomeState};
pub use reports::{ReportFilters, ReportsPage, ReportsState};
pub use settings::{SaveStatus, SettingsError, SettingsPage, SettingsState};
pub use view::{App, Page, View};
