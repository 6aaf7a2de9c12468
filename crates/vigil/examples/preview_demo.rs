//! Drive a preview against scripted backends and print each surface.
//!
//! Run with `RUST_LOG=vigil_session=debug,vigil_playback=trace` to watch
//! the acquisition race in the logs.

use std::{sync::Arc, time::Duration};

use tracing_subscriber::EnvFilter;
use vigil::prelude::*;
use vigil_playback::{
    testing::{ScriptedDecoder, ScriptedSurface},
    DecoderEvent,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("vigil_session=debug,vigil_playback=debug")),
        )
        .init();

    let registry = MemoryRegistry::new();
    let hall = registry
        .add(NewCamera::new(
            "Exam Hall",
            "https://cams.example.io/hall/master.m3u8",
        ))
        .expect("valid camera record");

    let decoder = Arc::new(ScriptedDecoder::new(true));
    let surface = Arc::new(ScriptedSurface::new(false));
    let mut preview = Preview::new(
        PreviewConfig::new().with_acquire_timeout(Duration::from_secs(5)),
        Arc::clone(&decoder) as Arc<dyn AdaptiveDecoder>,
        surface,
    );

    preview.open_camera(&hall);
    println!("after open: {:?}", preview.view());

    // The scripted decoder stands in for the streaming library; a real
    // backend would emit this once the manifest loads.
    tokio::time::sleep(Duration::from_millis(200)).await;
    decoder.emit(DecoderEvent::ManifestReady);
    tokio::time::sleep(Duration::from_millis(10)).await;
    println!("after manifest: {:?}", preview.view());

    preview.close();
    println!("after close: {:?}", preview.view());
}
