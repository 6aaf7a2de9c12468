#![forbid(unsafe_code)]

use tracing::debug;
use url::Url;

use crate::{
    kind::{SourceKind, ADAPTIVE_EXTENSIONS, NATIVE_EXTENSIONS},
    resolved::ResolvedSource,
    rewrite::{fallback_url, is_placeholder_host},
};

/// Resolver configuration.
#[derive(Clone, Debug, Default)]
pub struct SourceOptions {
    /// Substitute placeholder hosts with the demo fallback stream.
    ///
    /// Off by default: the substitution exists to keep showcase installs
    /// rendering video, and silently masks misconfigured camera URLs.
    pub demo_rewrites: bool,
}

impl SourceOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the demo-URL rewrite.
    #[must_use]
    pub fn with_demo_rewrites(mut self, enabled: bool) -> Self {
        self.demo_rewrites = enabled;
        self
    }
}

/// Classify a raw camera URL.
///
/// Pure function, no network I/O:
/// - blank input -> `Embed` with no effective URL (nothing to show);
/// - `.m3u8`/`.m3u` paths -> `AdaptiveStream`;
/// - progressive media extensions (mp4, webm, ...) -> `Native`;
/// - everything else, including unparseable input -> `Embed`.
///
/// With demo rewrites enabled, URLs on placeholder hosts are swapped for
/// the fixed fallback stream and the original is kept in `rewritten_from`.
#[must_use]
pub fn resolve(raw: &str, options: &SourceOptions) -> ResolvedSource {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return ResolvedSource {
            raw: String::new(),
            kind: SourceKind::Embed,
            effective: None,
            rewritten_from: None,
        };
    }

    let Ok(parsed) = Url::parse(trimmed) else {
        debug!(raw = trimmed, "source did not parse as an absolute URL");
        return ResolvedSource {
            raw: trimmed.to_string(),
            kind: SourceKind::Embed,
            effective: None,
            rewritten_from: None,
        };
    };

    if options.demo_rewrites && is_placeholder_host(&parsed) {
        let fallback = fallback_url();
        debug!(from = %parsed, to = %fallback, "placeholder host rewritten to demo stream");
        return ResolvedSource {
            raw: trimmed.to_string(),
            kind: SourceKind::AdaptiveStream,
            effective: Some(fallback),
            rewritten_from: Some(parsed),
        };
    }

    let kind = classify(&parsed);
    debug!(url = %parsed, ?kind, "source classified");

    ResolvedSource {
        raw: trimmed.to_string(),
        kind,
        effective: Some(parsed),
        rewritten_from: None,
    }
}

fn classify(url: &Url) -> SourceKind {
    let ext = url
        .path()
        .rsplit('.')
        .next()
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if ADAPTIVE_EXTENSIONS.contains(&ext.as_str()) {
        SourceKind::AdaptiveStream
    } else if NATIVE_EXTENSIONS.contains(&ext.as_str()) {
        SourceKind::Native
    } else {
        SourceKind::Embed
    }
}
