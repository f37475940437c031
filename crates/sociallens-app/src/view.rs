//! Root view controller: which page is showing and the signed-in user.

use std::sync::Arc;
use std::time::Duration;

use sociallens_api::DashboardApi;
use sociallens_core::{Report, User};

use crate::analytics::AnalyticsPage;
use crate::brands::BrandsPage;
use crate::debounce::DEFAULT_DEBOUNCE;
use crate::home::HomePage;
use crate::reports::ReportsPage;
use crate::settings::SettingsPage;

/// The page currently shown. Only the reports page carries data: the report
/// to open on arrival.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum View {
    #[default]
    Home,
    Brands,
    Analytics,
    Reports {
        report: Option<Report>,
    },
    Settings,
}

impl View {
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Brands => "Brands",
            Self::Analytics => "Analytics",
            Self::Reports { .. } => "Reports",
            Self::Settings => "Settings",
        }
    }
}

/// Controller for the current view, freshly constructed on every visit.
pub enum Page<A> {
    Home(HomePage<A>),
    Brands(BrandsPage<A>),
    Analytics(AnalyticsPage<A>),
    Reports(ReportsPage<A>),
    Settings(SettingsPage<A>),
}

pub struct App<A> {
    api: Arc<A>,
    view: View,
    user: Option<User>,
    user_requested: bool,
    search_debounce: Duration,
}

impl<A: DashboardApi> App<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self::with_debounce(api, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(api: Arc<A>, search_debounce: Duration) -> Self {
        Self {
            api,
            view: View::default(),
            user: None,
            user_requested: false,
            search_debounce,
        }
    }

    #[must_use]
    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn navigate(&mut self, view: View) {
        tracing::debug!(page = view.title(), "navigate");
        self.view = view;
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Fetch the signed-in user. Only the first call reaches the API; a
    /// failure is logged and leaves the user unknown.
    pub async fn load_user(&mut self) -> Option<&User> {
        if !self.user_requested {
            self.user_requested = true;
            match self.api.current_user().await {
                Ok(user) => self.user = Some(user),
                Err(e) => tracing::error!(error = %e, "failed to fetch current user"),
            }
        }
        self.user.as_ref()
    }

    /// Build the controller for the current view. A report carried by
    /// [`View::Reports`] is handed to the reports page to open.
    pub async fn open(&self) -> Page<A> {
        let api = Arc::clone(&self.api);
        match &self.view {
            View::Home => Page::Home(HomePage::new(api)),
            View::Brands => Page::Brands(BrandsPage::new(api, self.search_debounce)),
            View::Analytics => Page::Analytics(AnalyticsPage::new(api)),
            View::Reports { report } => {
                let page = ReportsPage::new(api, self.search_debounce);
                if let Some(report) = report {
                    page.open(report.clone()).await;
                }
                Page::Reports(page)
            }
            View::Settings => Page::Settings(SettingsPage::new(api, self.user.clone())),
        }
    }
}
