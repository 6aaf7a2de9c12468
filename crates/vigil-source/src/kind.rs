#![forbid(unsafe_code)]

//! Transport classification for a preview URL.

/// How a stream URL should be presented on the preview surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// A full web page (or anything we cannot play directly); shown in an
    /// embedding surface such as an iframe.
    Embed,
    /// An HTTP-segmented stream (URL ending with `.m3u8`/`.m3u`) requiring a
    /// client-side manifest parser.
    AdaptiveStream,
    /// A progressive media file the surface may be able to play directly.
    Native,
}

/// Path extensions that classify as adaptive streams.
pub(crate) const ADAPTIVE_EXTENSIONS: &[&str] = &["m3u8", "m3u"];

/// Path extensions that classify as native progressive media.
pub(crate) const NATIVE_EXTENSIONS: &[&str] = &[
    "mp4", "m4v", "webm", "ogg", "ogv", "mov", "mp3", "aac", "wav",
];

/// MIME hint for a media extension, used for the native capability check.
pub(crate) fn mime_for_extension(ext: &str) -> Option<&'static str> {
    let mime = match ext {
        "m3u8" | "m3u" => "application/vnd.apple.mpegurl",
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "ogg" | "ogv" => "video/ogg",
        "mov" => "video/quicktime",
        "mp3" => "audio/mpeg",
        "aac" => "audio/aac",
        "wav" => "audio/wav",
        _ => return None,
    };
    Some(mime)
}
