//! Reports page: the report list with client-side filters, optimistic
//! deletion, and the report viewer selection.

use std::sync::Arc;
use std::time::Duration;

use sociallens_api::{ApiError, BrandQuery, BrandsApi, ReportsApi};
use sociallens_core::{Brand, Report};
use tokio::sync::Mutex;

use crate::debounce::Debouncer;

pub const FETCH_REPORTS_ERROR: &str = "Failed to fetch reports. Please try again later.";
pub const DELETE_REPORT_ERROR: &str = "Failed to delete report. Reverting changes.";

/// Active filters. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilters {
    /// Settled search text.
    pub search: String,
    pub brand: Option<String>,
    pub report_type: Option<String>,
}

impl ReportFilters {
    #[must_use]
    pub fn matches(&self, report: &Report) -> bool {
        let search = self.search.trim();
        let search_match = search.is_empty() || report.matches_search(search);
        let brand_match = self
            .brand
            .as_deref()
            .is_none_or(|brand| report.brand_names().contains(&brand));
        let type_match = self
            .report_type
            .as_deref()
            .is_none_or(|kind| report.component_category == kind);
        search_match && brand_match && type_match
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportsState {
    pub reports: Vec<Report>,
    /// Brands offered in the brand filter.
    pub brands: Vec<Brand>,
    pub filters: ReportFilters,
    /// Report open in the viewer.
    pub selected: Option<Report>,
    pub loading: bool,
    pub error: Option<String>,
    pending_initial: Option<Report>,
}

impl ReportsState {
    /// Open the report handed over by navigation once reports are loaded,
    /// preferring the fetched copy with the same id.
    fn resolve_initial(&mut self) {
        if self.reports.is_empty() {
            return;
        }
        if let Some(initial) = self.pending_initial.take() {
            let report = self
                .reports
                .iter()
                .find(|r| r.id == initial.id)
                .cloned()
                .unwrap_or(initial);
            self.selected = Some(report);
        }
    }
}

pub struct ReportsPage<A> {
    api: Arc<A>,
    state: Mutex<ReportsState>,
    debouncer: Debouncer,
}

impl<A: ReportsApi + BrandsApi> ReportsPage<A> {
    pub fn new(api: Arc<A>, search_debounce: Duration) -> Self {
        Self {
            api,
            state: Mutex::new(ReportsState {
                loading: true,
                ..ReportsState::default()
            }),
            debouncer: Debouncer::new(search_debounce),
        }
    }

    pub async fn state(&self) -> ReportsState {
        self.state.lock().await.clone()
    }

    pub async fn dismiss_error(&self) {
        self.state.lock().await.error = None;
    }

    /// Fetch reports and, alongside, the brands for the brand filter.
    /// A brand failure is only logged.
    ///
    /// # Errors
    ///
    /// Returns the reports request's error; the page error is set.
    pub async fn load(&self) -> Result<(), ApiError> {
        {
            let mut state = self.state.lock().await;
            state.loading = true;
            state.error = None;
        }

        let brand_query = BrandQuery::default();
        let (reports, brands) = tokio::join!(
            self.api.list_reports(),
            self.api.list_brands(&brand_query)
        );

        let mut state = self.state.lock().await;
        state.loading = false;
        match brands {
            Ok(response) => state.brands = response.brands,
            Err(e) => tracing::error!(error = %e, "failed to fetch brands for filter"),
        }
        match reports {
            Ok(reports) => {
                state.reports = reports;
                state.resolve_initial();
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch reports");
                state.error = Some(FETCH_REPORTS_ERROR.to_string());
                Err(e)
            }
        }
    }

    /// Honour a report passed in through navigation. It is shown as soon as
    /// the list is loaded, replaced by the fetched copy when one exists.
    pub async fn open(&self, initial: Report) {
        let mut state = self.state.lock().await;
        state.pending_initial = Some(initial);
        state.resolve_initial();
    }

    /// Open the loaded report with `id` in the viewer.
    pub async fn view(&self, id: i64) -> Option<Report> {
        let mut state = self.state.lock().await;
        let report = state.reports.iter().find(|r| r.id == id).cloned()?;
        state.selected = Some(report.clone());
        Some(report)
    }

    pub async fn close(&self) {
        let mut state = self.state.lock().await;
        state.selected = None;
        state.pending_initial = None;
    }

    /// Submit search text; applied once settled. Returns `false` when a
    /// newer search superseded this one.
    pub async fn search(&self, text: impl Into<String>) -> bool {
        match self.debouncer.settle(text.into()).await {
            Some(text) => {
                self.state.lock().await.filters.search = text;
                true
            }
            None => false,
        }
    }

    pub async fn set_brand_filter(&self, brand: Option<String>) {
        self.state.lock().await.filters.brand = brand;
    }

    pub async fn set_type_filter(&self, report_type: Option<String>) {
        self.state.lock().await.filters.report_type = report_type;
    }

    pub async fn filtered(&self) -> Vec<Report> {
        let state = self.state.lock().await;
        state
            .reports
            .iter()
            .filter(|r| state.filters.matches(r))
            .cloned()
            .collect()
    }

    /// Distinct report categories in first-seen order.
    pub async fn report_types(&self) -> Vec<String> {
        let state = self.state.lock().await;
        let mut types: Vec<String> = Vec::new();
        for report in &state.reports {
            if !types.contains(&report.component_category) {
                types.push(report.component_category.clone());
            }
        }
        types
    }

    /// Optimistically remove a report, then delete it on the server.
    ///
    /// # Errors
    ///
    /// Returns the API error after putting the report back where it was.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let removed = {
            let mut state = self.state.lock().await;
            state
                .reports
                .iter()
                .position(|r| r.id == id)
                .map(|idx| (idx, state.reports.remove(idx)))
        };

        match self.api.delete_report(id).await {
            Ok(()) => {
                tracing::info!(report_id = id, "report deleted");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, report_id = id, "failed to delete report");
                let mut state = self.state.lock().await;
                if let Some((idx, report)) = removed {
                    let at = idx.min(state.reports.len());
                    state.reports.insert(at, report);
                }
                state.error = Some(DELETE_REPORT_ERROR.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "reports_test.rs"]
mod tests;
