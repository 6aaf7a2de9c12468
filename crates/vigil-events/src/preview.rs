#![forbid(unsafe_code)]

/// Events emitted during a stream preview session.
#[derive(Clone, Debug)]
pub enum PreviewEvent {
    /// A preview was opened for the given URL and acquisition started.
    Opened { url: String },
    /// The source URL was rewritten to a demo fallback stream.
    SourceRewritten { from: String, to: String },
    /// The stream signalled it is playable; playback was started.
    Ready,
    /// Acquisition failed and the session is terminal for this request.
    Failed { reason: String },
    /// The preview was closed and all resources released.
    Closed,
}
