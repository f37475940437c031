use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::json;
use sociallens_core::{BrandCreate, BrandListResponse, BrandPatch, BrandStats, BrandUpdate};

use super::*;

fn report(id: i64, category: &str, headline: &str, brands: &[&str]) -> Report {
    let display: Vec<serde_json::Value> = brands
        .iter()
        .enumerate()
        .map(|(i, name)| json!({"id": i, "type": "logo", "name": name}))
        .collect();
    serde_json::from_value(json!({
        "id": id,
        "component_category": category,
        "headline": headline,
        "explanation": null,
        "report_url": format!("https://reports.test/{id}"),
        "brands": { "display": display }
    }))
    .unwrap()
}

struct FakeApi {
    reports: Vec<Report>,
    fail_reports: bool,
    fail_brands: bool,
    fail_delete: AtomicBool,
}

impl FakeApi {
    fn new(reports: Vec<Report>) -> Self {
        Self {
            reports,
            fail_reports: false,
            fail_brands: false,
            fail_delete: AtomicBool::new(false),
        }
    }
}

fn server_error<T>() -> Result<T, ApiError> {
    Err(ApiError::Status {
        status: 500,
        message: "boom".to_string(),
    })
}

#[async_trait]
impl ReportsApi for FakeApi {
    async fn list_reports(&self) -> Result<Vec<Report>, ApiError> {
        if self.fail_reports {
            return server_error();
        }
        Ok(self.reports.clone())
    }

    async fn delete_report(&self, _id: i64) -> Result<(), ApiError> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return server_error();
        }
        Ok(())
    }
}

#[async_trait]
impl BrandsApi for FakeApi {
    async fn list_brands(&self, _: &BrandQuery) -> Result<BrandListResponse, ApiError> {
        if self.fail_brands {
            return server_error();
        }
        Ok(BrandListResponse {
            brands: vec![],
            total: 0,
            skip: 0,
            limit: 100,
        })
    }
    async fn create_brand(&self, _: &BrandCreate) -> Result<Brand, ApiError> {
        server_error()
    }
    async fn update_brand(&self, _: &str, _: &BrandUpdate) -> Result<Brand, ApiError> {
        server_error()
    }
    async fn patch_brand(&self, _: &str, _: &BrandPatch) -> Result<Brand, ApiError> {
        server_error()
    }
    async fn delete_brand(&self, _: &str) -> Result<(), ApiError> {
        server_error()
    }
    async fn sync_brand(&self, _: &str) -> Result<Brand, ApiError> {
        server_error()
    }
    async fn brand_stats(&self) -> Result<BrandStats, ApiError> {
        server_error()
    }
}

fn sample_reports() -> Vec<Report> {
    vec![
        report(1, "Brand Health", "Acme sentiment is rising", &["Acme"]),
        report(2, "Competition", "Acme vs Globex", &["Acme", "Globex"]),
        report(3, "Brand Health", "Globex engagement dips", &["Globex"]),
    ]
}

async fn loaded(api: FakeApi) -> (Arc<FakeApi>, ReportsPage<FakeApi>) {
    let api = Arc::new(api);
    let page = ReportsPage::new(Arc::clone(&api), Duration::from_millis(300));
    page.load().await.unwrap();
    (api, page)
}

#[tokio::test]
async fn filters_combine() {
    let (_, page) = loaded(FakeApi::new(sample_reports())).await;

    page.set_brand_filter(Some("Globex".to_string())).await;
    let ids: Vec<i64> = page.filtered().await.iter().map(|r| r.id).collect();
    assert_eq!(ids, [2, 3]);

    page.set_type_filter(Some("Brand Health".to_string())).await;
    let ids: Vec<i64> = page.filtered().await.iter().map(|r| r.id).collect();
    assert_eq!(ids, [3]);

    page.set_brand_filter(None).await;
    page.set_type_filter(None).await;
    assert_eq!(page.filtered().await.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn search_applies_after_settling() {
    let (_, page) = loaded(FakeApi::new(sample_reports())).await;

    let (first, second) = tokio::join!(page.search("acme"), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        page.search("dips").await
    });
    assert!(!first);
    assert!(second);

    let ids: Vec<i64> = page.filtered().await.iter().map(|r| r.id).collect();
    assert_eq!(ids, [3]);
}

#[tokio::test]
async fn report_types_keep_first_seen_order() {
    let (_, page) = loaded(FakeApi::new(sample_reports())).await;
    assert_eq!(page.report_types().await, ["Brand Health", "Competition"]);
}

#[tokio::test]
async fn brand_filter_failure_is_not_a_page_error() {
    let (_, page) = loaded(FakeApi {
        fail_brands: true,
        ..FakeApi::new(sample_reports())
    })
    .await;

    let state = page.state().await;
    assert!(state.error.is_none());
    assert_eq!(state.reports.len(), 3);
}

#[tokio::test]
async fn reports_failure_sets_error() {
    let api = Arc::new(FakeApi {
        fail_reports: true,
        ..FakeApi::new(vec![])
    });
    let page = ReportsPage::new(api, Duration::from_millis(300));

    page.load().await.unwrap_err();

    let state = page.state().await;
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some(FETCH_REPORTS_ERROR));
}

#[tokio::test]
async fn failed_delete_restores_report() {
    let (api, page) = loaded(FakeApi::new(sample_reports())).await;
    api.fail_delete.store(true, Ordering::SeqCst);

    page.delete(2).await.unwrap_err();

    let state = page.state().await;
    assert_eq!(state.reports, sample_reports());
    assert_eq!(state.error.as_deref(), Some(DELETE_REPORT_ERROR));
}

#[tokio::test]
async fn delete_removes_report() {
    let (_, page) = loaded(FakeApi::new(sample_reports())).await;
    page.delete(1).await.unwrap();
    assert_eq!(page.state().await.reports.len(), 2);
}

#[tokio::test]
async fn initial_report_is_replaced_by_fetched_copy() {
    let api = Arc::new(FakeApi::new(sample_reports()));
    let page = ReportsPage::new(api, Duration::from_millis(300));

    let stale = report(2, "Competition", "stale headline", &[]);
    page.open(stale).await;
    assert!(page.state().await.selected.is_none());

    page.load().await.unwrap();
    let selected = page.state().await.selected.unwrap();
    assert_eq!(selected.headline.as_deref(), Some("Acme vs Globex"));

    page.close().await;
    assert!(page.state().await.selected.is_none());
}

#[tokio::test]
async fn unknown_initial_report_is_shown_as_is() {
    let (_, page) = loaded(FakeApi::new(sample_reports())).await;
    page.open(report(99, "Growth", "sample", &[])).await;
    assert_eq!(page.state().await.selected.map(|r| r.id), Some(99));
}

#[tokio::test]
async fn view_selects_loaded_report() {
    let (_, page) = loaded(FakeApi::new(sample_reports())).await;
    assert_eq!(page.view(3).await.map(|r| r.id), Some(3));
    assert!(page.view(42).await.is_none());
    assert_eq!(page.state().await.selected.map(|r| r.id), Some(3));
}
