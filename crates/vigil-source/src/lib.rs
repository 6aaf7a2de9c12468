#![forbid(unsafe_code)]

//! Stream source classification for camera preview URLs.
//!
//! Given the raw URL stored on a camera record, decide *how* the preview
//! widget should try to show it: feed it to an adaptive-stream decoder,
//! hand it to the native media surface, or fall back to embedding the
//! page. Classification is pure; no network I/O happens here.

mod kind;
mod resolved;
mod resolver;
mod rewrite;

pub use kind::SourceKind;
pub use resolved::ResolvedSource;
pub use resolver::{resolve, SourceOptions};
pub use rewrite::{DEMO_FALLBACK_URL, PLACEHOLDER_HOSTS};
