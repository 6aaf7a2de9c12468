#![forbid(unsafe_code)]

use url::Url;

use crate::kind::{mime_for_extension, SourceKind};

/// Outcome of classifying one raw camera URL.
///
/// `effective` is `None` when there is nothing to load: the input was blank,
/// or it did not parse as an absolute URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSource {
    /// The operator-supplied input, trimmed.
    pub raw: String,
    /// How the preview should attempt playback.
    pub kind: SourceKind,
    /// The URL to actually load, after any demo rewrite.
    pub effective: Option<Url>,
    /// Original URL when a demo rewrite fired, so callers can report it.
    pub rewritten_from: Option<Url>,
}

impl ResolvedSource {
    /// True when the input was blank: the preview has nothing to show and
    /// should stay idle.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// MIME hint for the native capability check, derived from the path
    /// extension of the effective URL.
    #[must_use]
    pub fn mime_hint(&self) -> Option<&'static str> {
        let url = self.effective.as_ref()?;
        let ext = url.path().rsplit('.').next()?;
        mime_for_extension(&ext.to_ascii_lowercase())
    }
}
