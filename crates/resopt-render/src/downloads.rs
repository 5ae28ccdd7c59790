//! Artifact links and the share hand-off

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use resopt_core::ArtifactKind;
use url::Url;

/// Default share hand-off prefix.
pub const DEFAULT_SHARE_BASE: &str = "https://wa.me/?text=";

/// Everything except unreserved characters and `/`.
const SHARE_TEXT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Resolve an artifact URL from the payload.
///
/// Relative paths are joined onto `base`. Anything that does not end up as
/// http(s) is dropped.
pub fn resolve_artifact_url(raw: &str, base: Option<&Url>) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => base?.join(raw).ok()?,
        Err(e) => {
            tracing::debug!("Dropping unparseable artifact URL {:?}: {}", raw, e);
            return None;
        }
    };

    match url.scheme() {
        "http" | "https" => Some(url),
        other => {
            tracing::warn!("Dropping artifact URL with scheme {:?}", other);
            None
        }
    }
}

/// Message body shared for an artifact.
pub fn share_text(kind: ArtifactKind, url: &Url) -> String {
    format!("Check out my optimized resume: {}\n{}", kind.label(), url)
}

/// Share hand-off URL for an artifact.
pub fn share_url(share_base: &str, kind: ArtifactKind, url: &Url) -> String {
    let text = share_text(kind, url);
    format!("{share_base}{}", utf8_percent_encode(&text, SHARE_TEXT))
}
