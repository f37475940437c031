use thiserror::Error;

/// Errors raised while loading application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Client-side form validation failures.
///
/// These block submission before any request is issued; the `Display` text is
/// the inline message shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Brand name is required.")]
    NameRequired,

    #[error("Please add at least one social URL.")]
    NoSocialUrls,

    #[error("Please enter a valid URL.")]
    InvalidUrl { input: String },

    #[error("This URL has already been added.")]
    DuplicateUrl { input: String },
}
