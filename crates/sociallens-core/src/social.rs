//! Social profile URL handling: normalization, validation, platform inference.
//!
//! Handle-style input such as `tiktok.com/@brand` is tolerated by
//! percent-encoding every `@` before parsing, and scheme-less input gets
//! `https://` prepended. Nothing here touches the network.

use reqwest::Url;

use crate::brands::SocialPlatform;
use crate::error::ValidationError;

/// Ordered detection rules; the first domain matching the host wins.
const PLATFORM_RULES: [(&str, SocialPlatform); 7] = [
    ("facebook.com", SocialPlatform::Facebook),
    ("x.com", SocialPlatform::Twitter),
    ("twitter.com", SocialPlatform::Twitter),
    ("instagram.com", SocialPlatform::Instagram),
    ("linkedin.com", SocialPlatform::Linkedin),
    ("youtube.com", SocialPlatform::Youtube),
    ("tiktok.com", SocialPlatform::Tiktok),
];

/// Rewrite raw user input into a parseable absolute URL string.
#[must_use]
pub fn normalize_social_url(raw: &str) -> String {
    let encoded = raw.replace('@', "%40");
    if encoded.starts_with("http") {
        encoded
    } else {
        format!("https://{encoded}")
    }
}

/// Validate raw user input as a social profile URL.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidUrl`] when the normalized input does not
/// parse as a URL.
pub fn validate_social_url(raw: &str) -> Result<Url, ValidationError> {
    Url::parse(&normalize_social_url(raw)).map_err(|_| ValidationError::InvalidUrl {
        input: raw.to_string(),
    })
}

/// Infer the platform of a profile URL from its host.
///
/// Empty, unparseable, or unrecognised input falls back to
/// [`SocialPlatform::Website`].
#[must_use]
pub fn infer_platform(raw: &str) -> SocialPlatform {
    if raw.is_empty() {
        return SocialPlatform::Website;
    }
    let Ok(url) = Url::parse(&normalize_social_url(raw)) else {
        return SocialPlatform::Website;
    };
    let Some(host) = url.host_str() else {
        return SocialPlatform::Website;
    };
    let host = host.strip_prefix("www.").unwrap_or(host);

    PLATFORM_RULES
        .iter()
        .find(|(domain, _)| host.ends_with(*domain))
        .map_or(SocialPlatform::Website, |(_, platform)| *platform)
}
