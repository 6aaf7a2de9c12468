#![forbid(unsafe_code)]

use vigil_session::AcquisitionState;

/// Message shown while the stream is being acquired.
pub const CONNECTING_MESSAGE: &str = "Connecting to the camera stream…";

/// Generic failure message. The concrete failure reason is logged and
/// published on the event bus, not shown to the operator.
pub const ERROR_MESSAGE: &str =
    "Unable to display the camera. The URL is incorrect or the camera is not active.";

/// Icon accompanying a surface variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceIcon {
    Warning,
}

/// What the host should draw for the current acquisition state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceView {
    /// Nothing rendered; the host dialog stays closed.
    Hidden,
    /// Indeterminate progress indicator with a connecting message.
    Connecting { message: &'static str },
    /// The video/embedding surface, visible and interactive.
    Video { native_controls: bool },
    /// Error icon with a fixed human-readable message.
    ErrorPanel {
        icon: SurfaceIcon,
        message: &'static str,
    },
}

/// Render the acquisition state. Pure: same state, same view.
#[must_use]
pub fn render(state: &AcquisitionState) -> SurfaceView {
    match state {
        AcquisitionState::Idle => SurfaceView::Hidden,
        AcquisitionState::Loading => SurfaceView::Connecting {
            message: CONNECTING_MESSAGE,
        },
        AcquisitionState::Playing => SurfaceView::Video {
            native_controls: true,
        },
        AcquisitionState::Failed(_) => SurfaceView::ErrorPanel {
            icon: SurfaceIcon::Warning,
            message: ERROR_MESSAGE,
        },
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use vigil_session::FailureReason;

    use super::*;

    #[rstest]
    #[case(AcquisitionState::Idle, SurfaceView::Hidden)]
    #[case(
        AcquisitionState::Loading,
        SurfaceView::Connecting { message: CONNECTING_MESSAGE }
    )]
    #[case(
        AcquisitionState::Playing,
        SurfaceView::Video { native_controls: true }
    )]
    fn renders_each_state(#[case] state: AcquisitionState, #[case] expected: SurfaceView) {
        assert_eq!(render(&state), expected);
    }

    #[rstest]
    #[case(FailureReason::Unsupported)]
    #[case(FailureReason::Timeout)]
    #[case(FailureReason::Stream("ECONNREFUSED".into()))]
    fn every_failure_renders_the_same_generic_panel(#[case] reason: FailureReason) {
        let view = render(&AcquisitionState::Failed(reason));
        assert_eq!(
            view,
            SurfaceView::ErrorPanel {
                icon: SurfaceIcon::Warning,
                message: ERROR_MESSAGE,
            }
        );
    }

    #[test]
    fn rendering_is_pure() {
        let state = AcquisitionState::Loading;
        assert_eq!(render(&state), render(&state));
    }
}
