#![forbid(unsafe_code)]

use crate::{PredictEvent, PreviewEvent, RegistryEvent};

/// Unified event for the full monitoring pipeline.
///
/// Hierarchical: each subsystem has its own variant with a sub-enum.
#[derive(Clone, Debug)]
pub enum Event {
    /// Stream preview event.
    Preview(PreviewEvent),
    /// Camera registry event.
    Registry(RegistryEvent),
    /// Inference request event.
    Predict(PredictEvent),
}

impl From<PreviewEvent> for Event {
    fn from(e: PreviewEvent) -> Self {
        Self::Preview(e)
    }
}

impl From<RegistryEvent> for Event {
    fn from(e: RegistryEvent) -> Self {
        Self::Registry(e)
    }
}

impl From<PredictEvent> for Event {
    fn from(e: PredictEvent) -> Self {
        Self::Predict(e)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn preview_is_closed(event: &PreviewEvent) -> bool {
        matches!(event, PreviewEvent::Closed)
    }

    fn preview_is_ready(event: &PreviewEvent) -> bool {
        matches!(event, PreviewEvent::Ready)
    }

    #[rstest]
    #[case(PreviewEvent::Closed, preview_is_closed)]
    #[case(PreviewEvent::Ready, preview_is_ready)]
    fn preview_event_into_event(
        #[case] preview_event: PreviewEvent,
        #[case] check: fn(&PreviewEvent) -> bool,
    ) {
        let event: Event = preview_event.into();
        assert!(matches!(event, Event::Preview(inner) if check(&inner)));
    }

    #[test]
    fn registry_event_into_event() {
        let event: Event = RegistryEvent::CameraRemoved { id: 3 }.into();
        assert!(matches!(
            event,
            Event::Registry(RegistryEvent::CameraRemoved { id: 3 })
        ));
    }

    #[test]
    fn predict_event_into_event() {
        let event: Event = PredictEvent::Completed { detections: 2 }.into();
        assert!(matches!(
            event,
            Event::Predict(PredictEvent::Completed { detections: 2 })
        ));
    }
}
