#![forbid(unsafe_code)]

//! Unified event bus for the vigil monitoring pipeline.

mod bus;
mod event;
mod predict;
mod preview;
mod registry;

pub use bus::EventBus;
pub use event::Event;
pub use predict::PredictEvent;
pub use preview::PreviewEvent;
pub use registry::RegistryEvent;
