//! Brands page: the brand list, its aggregate stats, and the optimistic
//! add/edit/delete flows.
//!
//! Every mutation updates the local list before the server answers and then
//! either reconciles it with the server's record or rolls back its own change.
//! The state lock is only held between awaits, so flows on different brands
//! may interleave; each one touches only the brand it changed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sociallens_api::{ApiError, BrandQuery, BrandSort, BrandsApi};
use sociallens_core::{
    infer_platform, Brand, BrandEdit, BrandPatch, BrandStats, BrandStatus, NewBrand,
    SocialProfile, SocialProfilePatchOp,
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::debounce::Debouncer;

pub const FETCH_BRANDS_ERROR: &str =
    "Failed to fetch brands. Please ensure the server is running and accessible.";
pub const FETCH_STATS_ERROR: &str = "Failed to fetch stats.";
pub const LOAD_PAGE_ERROR: &str = "Failed to load page data.";
pub const ADD_BRAND_ERROR: &str = "Failed to add brand. Please try again.";
pub const UPDATE_BRAND_ERROR: &str = "Failed to update brand. Reverting changes.";
pub const DELETE_BRAND_ERROR: &str = "Failed to delete brand. Reverting changes.";

/// Owner recorded on placeholders until the server assigns the real one.
pub const TEMP_OWNER: &str = "temp-owner";

/// How an edit is written to the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BrandWrite {
    /// `PUT brands/{id}` with the full profile list.
    #[default]
    Replace,
    /// `PATCH brands/{id}` with per-profile add/remove operations.
    Patch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrandsState {
    pub brands: Vec<Brand>,
    pub stats: Option<BrandStats>,
    pub loading: bool,
    pub error: Option<String>,
    pub last_updated: DateTime<Utc>,
    pub query: BrandQuery,
}

impl BrandsState {
    fn new() -> Self {
        Self {
            brands: Vec::new(),
            stats: None,
            loading: true,
            error: None,
            last_updated: Utc::now(),
            query: BrandQuery {
                sort: Some(BrandSort::default()),
                ..BrandQuery::default()
            },
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.brands.iter().position(|b| b.id == id)
    }

    fn replace(&mut self, id: &str, brand: Brand) -> bool {
        match self.position(id) {
            Some(idx) => {
                self.brands[idx] = brand;
                true
            }
            None => false,
        }
    }
}

/// Millisecond clock that never hands out the same value twice.
#[derive(Debug, Default)]
struct TempIdClock {
    last: AtomicU64,
}

impl TempIdClock {
    fn next(&self) -> String {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        let prev = match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| {
                Some(now.max(prev + 1))
            }) {
            Ok(prev) | Err(prev) => prev,
        };
        now.max(prev + 1).to_string()
    }
}

fn draft_profile(url: &str, now: DateTime<Utc>) -> SocialProfile {
    SocialProfile {
        id: Uuid::new_v4().to_string(),
        platform: infer_platform(url),
        profile_url: url.to_string(),
        username: None,
        created_at: now,
        last_synced_at: None,
    }
}

fn placeholder(temp_id: &str, new: &NewBrand) -> Brand {
    let now = Utc::now();
    Brand {
        id: temp_id.to_string(),
        name: new.name.clone(),
        description: None,
        logo_url: new.logo_url.clone(),
        social_profiles: new
            .social_urls
            .iter()
            .map(|url| draft_profile(url, now))
            .collect(),
        status: BrandStatus::Pending,
        created_at: now,
        updated_at: now,
        owner_id: TEMP_OWNER.to_string(),
        is_loading: true,
    }
}

/// The brand as it should look while the edit is in flight: existing
/// profiles are kept when their URL survives, new URLs get a draft profile.
fn optimistic_edit(current: &Brand, edit: &BrandEdit) -> Brand {
    let now = Utc::now();
    Brand {
        name: edit.name.clone(),
        logo_url: edit.logo_url.clone(),
        status: BrandStatus::Syncing,
        social_profiles: edit
            .social_urls
            .iter()
            .map(|url| {
                current
                    .profile_by_url(url)
                    .cloned()
                    .unwrap_or_else(|| draft_profile(url, now))
            })
            .collect(),
        ..current.clone()
    }
}

fn patch_for(edit: &BrandEdit, original: Option<&Brand>) -> BrandPatch {
    let social_profiles = match original {
        Some(brand) => BrandPatch::profile_ops(brand, &edit.social_urls),
        None => edit
            .social_urls
            .iter()
            .map(|url| SocialProfilePatchOp::Add {
                platform: infer_platform(url),
                profile_url: url.clone(),
                username: None,
            })
            .collect(),
    };
    BrandPatch {
        name: Some(edit.name.clone()),
        description: None,
        logo_url: edit.logo_url.clone(),
        social_profiles: Some(social_profiles),
    }
}

/// Controller for the Brands page.
pub struct BrandsPage<A> {
    api: Arc<A>,
    state: Mutex<BrandsState>,
    debouncer: Debouncer,
    temp_ids: TempIdClock,
}

impl<A: BrandsApi> BrandsPage<A> {
    pub fn new(api: Arc<A>, search_debounce: Duration) -> Self {
        Self {
            api,
            state: Mutex::new(BrandsState::new()),
            debouncer: Debouncer::new(search_debounce),
            temp_ids: TempIdClock::default(),
        }
    }

    async fn with_state<R>(&self, f: impl FnOnce(&mut BrandsState) -> R) -> R {
        let mut state = self.state.lock().await;
        f(&mut state)
    }

    /// Copy of the current page state for rendering.
    pub async fn state(&self) -> BrandsState {
        self.with_state(|s| s.clone()).await
    }

    pub async fn find(&self, id: &str) -> Option<Brand> {
        self.with_state(|s| s.position(id).map(|idx| s.brands[idx].clone()))
            .await
    }

    pub async fn dismiss_error(&self) {
        self.with_state(|s| s.error = None).await;
    }

    /// Initial page load: brand list and stats side by side.
    ///
    /// # Errors
    ///
    /// Returns the first failure; both errors are also reflected in the state.
    pub async fn load(&self) -> Result<(), ApiError> {
        let (brands, stats) = tokio::join!(self.refresh(), self.refresh_stats());
        brands.and(stats)
    }

    /// Fetch the list with the current (already settled) query.
    ///
    /// # Errors
    ///
    /// Returns the API error; the list is cleared and the page error set.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let query = self
            .with_state(|s| {
                s.loading = true;
                s.error = None;
                s.query.clone()
            })
            .await;

        let result = self.api.list_brands(&query).await;

        self.with_state(|s| {
            s.loading = false;
            match result {
                Ok(response) => {
                    s.brands = response.brands;
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to fetch brands");
                    s.brands.clear();
                    s.error = Some(FETCH_BRANDS_ERROR.to_string());
                    Err(e)
                }
            }
        })
        .await
    }

    /// # Errors
    ///
    /// Returns the API error; stats are cleared and the page error set.
    pub async fn refresh_stats(&self) -> Result<(), ApiError> {
        let result = self.api.brand_stats().await;
        self.with_state(|s| match result {
            Ok(stats) => {
                s.stats = Some(stats);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch stats");
                let message = if s.error.is_some() {
                    LOAD_PAGE_ERROR
                } else {
                    FETCH_STATS_ERROR
                };
                s.error = Some(message.to_string());
                s.stats = None;
                Err(e)
            }
        })
        .await
    }

    /// Submit new search text. Fetches only once the input has settled;
    /// returns `Ok(false)` when a newer search superseded this one.
    ///
    /// # Errors
    ///
    /// See [`BrandsPage::refresh`].
    pub async fn search(&self, text: impl Into<String>) -> Result<bool, ApiError> {
        let Some(text) = self.debouncer.settle(text.into()).await else {
            return Ok(false);
        };
        self.with_state(|s| s.query.search = text).await;
        self.refresh().await.map(|()| true)
    }

    /// # Errors
    ///
    /// See [`BrandsPage::refresh`].
    pub async fn set_sort(&self, sort: BrandSort) -> Result<(), ApiError> {
        self.with_state(|s| s.query.sort = Some(sort)).await;
        self.refresh().await
    }

    /// Replace the list query without fetching; the next refresh uses it.
    pub async fn set_query(&self, query: BrandQuery) {
        self.with_state(|s| s.query = query).await;
    }

    async fn after_mutation(&self) {
        // A stats failure is already recorded on the page.
        let _ = self.refresh_stats().await;
        self.with_state(|s| s.last_updated = Utc::now()).await;
    }

    /// Optimistically add a brand, then create and sync it on the server.
    ///
    /// # Errors
    ///
    /// Returns the failing step's error after removing the placeholder.
    pub async fn add(&self, new: NewBrand) -> Result<Brand, ApiError> {
        let temp_id = self.temp_ids.next();
        let draft = placeholder(&temp_id, &new);
        self.with_state(|s| {
            s.brands.insert(0, draft);
            s.brands.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        })
        .await;

        let result = async {
            let created = self.api.create_brand(&new.to_create()).await?;
            self.api.sync_brand(&created.id).await
        }
        .await;

        match result {
            Ok(synced) => {
                let confirmed = Brand {
                    is_loading: false,
                    ..synced
                };
                self.with_state(|s| s.replace(&temp_id, confirmed.clone()))
                    .await;
                self.after_mutation().await;
                tracing::info!(brand_id = %confirmed.id, name = %confirmed.name, "brand added");
                Ok(confirmed)
            }
            Err(e) => {
                tracing::error!(error = %e, name = %new.name, "failed to add brand");
                self.with_state(|s| {
                    s.brands.retain(|b| b.id != temp_id);
                    s.error = Some(ADD_BRAND_ERROR.to_string());
                })
                .await;
                Err(e)
            }
        }
    }

    /// Optimistically apply an edit, then write and sync it on the server.
    ///
    /// # Errors
    ///
    /// Returns the failing step's error after restoring the brand's pre-edit
    /// record.
    pub async fn edit(&self, edit: BrandEdit, write: BrandWrite) -> Result<Brand, ApiError> {
        let original = self
            .with_state(|s| {
                let idx = s.position(&edit.id)?;
                let original = s.brands[idx].clone();
                s.brands[idx] = optimistic_edit(&original, &edit);
                Some(original)
            })
            .await;

        let result = async {
            let saved = match write {
                BrandWrite::Replace => self.api.update_brand(&edit.id, &edit.to_update()).await?,
                BrandWrite::Patch => {
                    let patch = patch_for(&edit, original.as_ref());
                    self.api.patch_brand(&edit.id, &patch).await?
                }
            };
            self.api.sync_brand(&saved.id).await
        }
        .await;

        match result {
            Ok(synced) => {
                self.with_state(|s| s.replace(&synced.id, synced.clone()))
                    .await;
                self.after_mutation().await;
                tracing::info!(brand_id = %synced.id, "brand updated");
                Ok(synced)
            }
            Err(e) => {
                tracing::error!(error = %e, brand_id = %edit.id, "failed to update brand");
                self.with_state(|s| {
                    if let Some(original) = original {
                        s.replace(&edit.id, original);
                    }
                    s.error = Some(UPDATE_BRAND_ERROR.to_string());
                })
                .await;
                Err(e)
            }
        }
    }

    /// Optimistically remove a brand, then delete it on the server.
    ///
    /// # Errors
    ///
    /// Returns the API error after putting the brand back where it was.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let removed = self
            .with_state(|s| s.position(id).map(|idx| (idx, s.brands.remove(idx))))
            .await;

        match self.api.delete_brand(id).await {
            Ok(()) => {
                self.after_mutation().await;
                tracing::info!(brand_id = %id, "brand deleted");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, brand_id = %id, "failed to delete brand");
                self.with_state(|s| {
                    if let Some((idx, brand)) = removed {
                        let at = idx.min(s.brands.len());
                        s.brands.insert(at, brand);
                    }
                    s.error = Some(DELETE_BRAND_ERROR.to_string());
                })
                .await;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "brands_test.rs"]
mod tests;
