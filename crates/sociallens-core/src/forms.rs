//! Form state for the add/edit brand dialogs and the workspace settings
//! section.
//!
//! Validation happens entirely client-side: a failing check records an inline
//! message on the form and returns the error, and the caller must not issue
//! any request.

use crate::brands::{Brand, BrandCreate, BrandUpdate, SocialProfileCreate};
use crate::error::ValidationError;
use crate::settings::WorkspaceSettings;
use crate::social::validate_social_url;

/// Validated input for creating a brand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBrand {
    pub name: String,
    pub logo_url: Option<String>,
    pub social_urls: Vec<String>,
}

impl NewBrand {
    #[must_use]
    pub fn to_create(&self) -> BrandCreate {
        BrandCreate {
            name: self.name.clone(),
            logo_url: self.logo_url.clone(),
            social_profiles: self
                .social_urls
                .iter()
                .map(|url| SocialProfileCreate::from_url(url))
                .collect(),
        }
    }
}

/// Validated input for updating an existing brand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandEdit {
    pub id: String,
    pub name: String,
    pub logo_url: Option<String>,
    pub social_urls: Vec<String>,
}

impl BrandEdit {
    #[must_use]
    pub fn to_update(&self) -> BrandUpdate {
        BrandUpdate {
            name: Some(self.name.clone()),
            description: None,
            logo_url: self.logo_url.clone(),
            social_profiles: Some(
                self.social_urls
                    .iter()
                    .map(|url| SocialProfileCreate::from_url(url))
                    .collect(),
            ),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Validate `raw` and append it to `staged`.
///
/// Blank input is ignored. Returns `Ok(true)` when a URL was staged.
fn stage_into(staged: &mut Vec<String>, raw: &str) -> Result<bool, ValidationError> {
    let Some(input) = non_empty(raw) else {
        return Ok(false);
    };
    if staged.contains(&input) {
        return Err(ValidationError::DuplicateUrl { input });
    }
    validate_social_url(&input)?;
    staged.push(input);
    Ok(true)
}

#[derive(Debug, Clone, Default)]
pub struct AddBrandForm {
    pub name: String,
    pub logo_url: String,
    /// Text currently typed in the social URL box.
    pub social_input: String,
    staged_urls: Vec<String>,
    error: Option<ValidationError>,
}

impl AddBrandForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn staged_urls(&self) -> &[String] {
        &self.staged_urls
    }

    /// Inline error message, if the last action failed validation.
    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// Stage the text in `social_input`, clearing it on success.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidUrl`] or
    /// [`ValidationError::DuplicateUrl`]; the input is left in place.
    pub fn stage_input(&mut self) -> Result<(), ValidationError> {
        let input = std::mem::take(&mut self.social_input);
        match self.stage(&input) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.social_input = input;
                Err(e)
            }
        }
    }

    /// Stage `raw` directly.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidUrl`] or
    /// [`ValidationError::DuplicateUrl`].
    pub fn stage(&mut self, raw: &str) -> Result<(), ValidationError> {
        match stage_into(&mut self.staged_urls, raw) {
            Ok(_) => {
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    pub fn remove_url(&mut self, index: usize) {
        if index < self.staged_urls.len() {
            self.staged_urls.remove(index);
        }
    }

    /// Validate the whole form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NameRequired`] for a blank name and
    /// [`ValidationError::NoSocialUrls`] when nothing is staged.
    pub fn submit(&mut self) -> Result<NewBrand, ValidationError> {
        let result = match non_empty(&self.name) {
            None => Err(ValidationError::NameRequired),
            Some(_) if self.staged_urls.is_empty() => Err(ValidationError::NoSocialUrls),
            Some(name) => Ok(NewBrand {
                name,
                logo_url: non_empty(&self.logo_url),
                social_urls: self.staged_urls.clone(),
            }),
        };
        self.error = result.as_ref().err().cloned();
        result
    }
}

#[derive(Debug, Clone)]
pub struct EditBrandForm {
    id: String,
    pub name: String,
    pub logo_url: String,
    pub social_input: String,
    social_urls: Vec<String>,
    error: Option<ValidationError>,
}

impl EditBrandForm {
    /// Seed the form from the brand being edited.
    #[must_use]
    pub fn from_brand(brand: &Brand) -> Self {
        Self {
            id: brand.id.clone(),
            name: brand.name.clone(),
            logo_url: brand.logo_url.clone().unwrap_or_default(),
            social_input: String::new(),
            social_urls: brand.profile_urls(),
            error: None,
        }
    }

    #[must_use]
    pub fn brand_id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn social_urls(&self) -> &[String] {
        &self.social_urls
    }

    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// Stage the text in `social_input`, clearing it on success.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidUrl`] or
    /// [`ValidationError::DuplicateUrl`].
    pub fn stage_input(&mut self) -> Result<(), ValidationError> {
        let input = std::mem::take(&mut self.social_input);
        match self.stage(&input) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.social_input = input;
                Err(e)
            }
        }
    }

    /// Stage `raw` directly.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidUrl`] or
    /// [`ValidationError::DuplicateUrl`].
    pub fn stage(&mut self, raw: &str) -> Result<(), ValidationError> {
        match stage_into(&mut self.social_urls, raw) {
            Ok(_) => {
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    pub fn remove_url(&mut self, index: usize) {
        if index < self.social_urls.len() {
            self.social_urls.remove(index);
        }
    }

    /// Remove a URL by value; no-op when absent.
    pub fn remove_url_value(&mut self, url: &str) {
        self.social_urls.retain(|u| u != url);
    }

    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NameRequired`] for a blank name.
    pub fn submit(&mut self) -> Result<BrandEdit, ValidationError> {
        let result = non_empty(&self.name)
            .map(|name| BrandEdit {
                id: self.id.clone(),
                name,
                logo_url: non_empty(&self.logo_url),
                social_urls: self.social_urls.clone(),
            })
            .ok_or(ValidationError::NameRequired);
        self.error = result.as_ref().err().cloned();
        result
    }
}

/// Editable copy of the workspace settings section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceForm {
    pub settings: WorkspaceSettings,
    pub competitor_input: String,
}

impl WorkspaceForm {
    #[must_use]
    pub fn new(settings: WorkspaceSettings) -> Self {
        Self {
            settings,
            competitor_input: String::new(),
        }
    }

    /// Add the typed competitor. Returns `false` for blank or duplicate input,
    /// which leaves the form unchanged.
    pub fn add_competitor(&mut self) -> bool {
        let Some(name) = non_empty(&self.competitor_input) else {
            return false;
        };
        if self.settings.competitors.contains(&name) {
            return false;
        }
        self.settings.competitors.push(name);
        self.competitor_input.clear();
        true
    }

    pub fn remove_competitor(&mut self, name: &str) {
        self.settings.competitors.retain(|c| c != name);
    }
}

#[cfg(test)]
#[path = "forms_test.rs"]
mod tests;
