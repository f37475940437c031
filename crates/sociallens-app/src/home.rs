//! Home page: analysis templates with local filtering and a server-side
//! suggestion fallback.

use std::sync::Arc;

use sociallens_api::{ApiError, BrandQuery, BrandsApi, TemplatesApi};
use sociallens_core::{AnalysisTemplate, SampleReport};
use tokio::sync::Mutex;

use crate::view::View;

pub const LOAD_HOME_ERROR: &str = "Failed to load data.";

/// Sample reports offered from a template's detail view.
pub const SAMPLE_REPORT_LIMIT: usize = 3;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeState {
    pub templates: Vec<AnalysisTemplate>,
    pub suggestions: Vec<AnalysisTemplate>,
    pub has_brands: bool,
    pub loading: bool,
    pub searching: bool,
    pub error: Option<String>,
}

pub struct HomePage<A> {
    api: Arc<A>,
    state: Mutex<HomeState>,
}

impl<A: BrandsApi + TemplatesApi> HomePage<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: Mutex::new(HomeState {
                loading: true,
                ..HomeState::default()
            }),
        }
    }

    pub async fn state(&self) -> HomeState {
        self.state.lock().await.clone()
    }

    pub async fn dismiss_error(&self) {
        self.state.lock().await.error = None;
    }

    /// Check whether any brand exists, then fetch every template.
    ///
    /// # Errors
    ///
    /// Returns the first failing request; the page error is set.
    pub async fn load(&self) -> Result<(), ApiError> {
        self.state.lock().await.loading = true;

        let result = async {
            let brands = self.api.list_brands(&BrandQuery::limited(1)).await?;
            let templates = self.api.list_templates(None).await?;
            Ok((brands.total > 0, templates))
        }
        .await;

        let mut state = self.state.lock().await;
        state.loading = false;
        match result {
            Ok((has_brands, templates)) => {
                state.has_brands = has_brands;
                state.templates = templates;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load home page");
                state.error = Some(LOAD_HOME_ERROR.to_string());
                Err(e)
            }
        }
    }

    /// Templates whose name, description, or category contain `query`
    /// (case-insensitive). A blank query returns every template.
    pub async fn filtered(&self, query: &str) -> Vec<AnalysisTemplate> {
        let query = query.trim();
        self.state
            .lock()
            .await
            .templates
            .iter()
            .filter(|t| query.is_empty() || t.matches_search(query))
            .cloned()
            .collect()
    }

    /// Ask the server for templates matching `query`. A blank query is a
    /// no-op; a failure clears the suggestions.
    pub async fn suggest(&self, query: &str) -> Vec<AnalysisTemplate> {
        let query = query.trim();
        if query.is_empty() {
            return self.state.lock().await.suggestions.clone();
        }
        self.state.lock().await.searching = true;

        let result = self.api.list_templates(Some(query)).await;

        let mut state = self.state.lock().await;
        state.searching = false;
        state.suggestions = match result {
            Ok(templates) => templates,
            Err(e) => {
                tracing::error!(error = %e, query, "template suggestion failed");
                Vec::new()
            }
        };
        state.suggestions.clone()
    }
}

/// The sample reports shown for `template`.
#[must_use]
pub fn sample_reports(template: &AnalysisTemplate) -> &[SampleReport] {
    let end = template.sample_reports.len().min(SAMPLE_REPORT_LIMIT);
    &template.sample_reports[..end]
}

/// Navigation target for opening a sample report.
#[must_use]
pub fn view_sample(report: &SampleReport) -> View {
    View::Reports {
        report: Some(report.clone()),
    }
}
