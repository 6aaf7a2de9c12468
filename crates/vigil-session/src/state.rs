#![forbid(unsafe_code)]

use std::fmt;

/// Why an acquisition attempt settled in `Failed`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailureReason {
    /// No viable playback path on this runtime.
    Unsupported,
    /// Neither a ready nor an error signal arrived within the bound.
    Timeout,
    /// The playback backend reported a fatal error.
    Stream(String),
}

impl FailureReason {
    /// Stable token for logs and event payloads.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unsupported => "unsupported",
            Self::Timeout => "timeout",
            Self::Stream(_) => "stream-error",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stream(detail) => write!(f, "stream-error: {detail}"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// State of the current preview request.
///
/// `Playing` and `Failed` are terminal for the request: no further
/// transitions happen until a new `open` starts a new request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AcquisitionState {
    /// No request in flight; nothing rendered.
    #[default]
    Idle,
    /// An attempt is running and racing its timeout.
    Loading,
    /// The stream came up and playback was started.
    Playing,
    /// The attempt settled in failure; terminal for this request.
    Failed(FailureReason),
}

impl AcquisitionState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether the request has reached a terminal outcome.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Playing | Self::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(FailureReason::Unsupported, "unsupported")]
    #[case(FailureReason::Timeout, "timeout")]
    #[case(FailureReason::Stream("bad manifest".into()), "stream-error")]
    fn failure_tokens(#[case] reason: FailureReason, #[case] expected: &str) {
        assert_eq!(reason.as_str(), expected);
    }

    #[test]
    fn stream_failure_display_carries_detail() {
        let reason = FailureReason::Stream("connection refused".into());
        assert_eq!(reason.to_string(), "stream-error: connection refused");
    }

    #[rstest]
    #[case(AcquisitionState::Idle, false)]
    #[case(AcquisitionState::Loading, false)]
    #[case(AcquisitionState::Playing, true)]
    #[case(AcquisitionState::Failed(FailureReason::Timeout), true)]
    fn settled_states(#[case] state: AcquisitionState, #[case] settled: bool) {
        assert_eq!(state.is_settled(), settled);
    }
}
