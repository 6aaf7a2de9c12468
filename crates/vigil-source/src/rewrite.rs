#![forbid(unsafe_code)]

//! Opt-in substitution of placeholder hosts with a working demo stream.
//!
//! Camera records created from documentation templates often carry URLs on
//! reserved or example hosts that will never resolve. When demo rewrites
//! are enabled, those are swapped for a public test stream so a showcase
//! install still renders video. The rewrite is off by default: masking a
//! misconfigured URL hides exactly the failure the preview exists to
//! surface, so production setups let acquisition fail honestly.

use url::Url;

/// Known-good fallback adaptive stream used when a placeholder host is
/// rewritten.
pub const DEMO_FALLBACK_URL: &str = "https://test-streams.mux.dev/x36xhzz/x36xhzz.m3u8";

/// Hosts that are documentation placeholders, never reachable cameras.
///
/// Matched against the URL host exactly or as a parent-domain suffix.
pub const PLACEHOLDER_HOSTS: &[&str] = &[
    "example.com",
    "example.org",
    "example.net",
    "camera.invalid",
    "placeholder.local",
];

/// Whether `url` points at a placeholder host from the allowlist.
pub(crate) fn is_placeholder_host(url: &Url) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    PLACEHOLDER_HOSTS
        .iter()
        .any(|p| host == *p || host.ends_with(&format!(".{p}")))
}

/// The fixed fallback URL. The constant is verified by tests.
pub(crate) fn fallback_url() -> Url {
    Url::parse(DEMO_FALLBACK_URL).expect("demo fallback URL is valid")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn fallback_constant_parses() {
        let url = fallback_url();
        assert_eq!(url.host_str(), Some("test-streams.mux.dev"));
        assert!(url.path().ends_with(".m3u8"));
    }

    #[rstest]
    #[case("https://example.com/live", true)]
    #[case("https://cam3.example.com/live", true)]
    #[case("rtsp://camera.invalid/stream", true)]
    #[case("https://cdn.real-site.io/stream.m3u8", false)]
    #[case("https://notexample.com/live", false)]
    fn placeholder_host_matching(#[case] input: &str, #[case] expected: bool) {
        let url = Url::parse(input).unwrap();
        assert_eq!(is_placeholder_host(&url), expected);
    }
}
